//! Stack-language source parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`stream`]: Pushback token reader the parser pulls from
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Grammar
//!
//! ```text
//! program     := { statement | declaration | definition }
//! statement   := number | identifier | '+' | '-' | '*' | '/' | MOD
//!              | '=' | '<' | '>' | '<=' | '>=' | DROP | DUP | SWAP
//!              | comment | '@' | '!' | if | while | QUIT
//! declaration := VARIABLE identifier [ number CELLS ]
//! definition  := ':' identifier { statement } ';'
//! if          := IF { statement } [ ELSE { statement } ] THEN
//! while       := WHILE { statement } REPEAT
//! ```
//!
//! Keywords are case-insensitive. Statements are valid in any body; the
//! declaration and definition forms are top-level only.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent over a pushback token reader. The language
//! is flat enough that no precedence handling exists at all; every operator
//! is a postfix statement.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod stream;

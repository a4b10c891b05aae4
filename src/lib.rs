//! # Introduction
//!
//! stax parses and executes a small Forth-flavored stack language: programs
//! push 64-bit integers onto one shared evaluation stack, operate on its top
//! values, and read and write cells of a linear memory built up by
//! `VARIABLE` declarations. When a program ends, the remaining stack is
//! printed to stdout as a JSON array.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → TokenReader → Parser → AST → Machine → JSON stack
//! ```
//!
//! 1. [`parser`] — tokenises the source (with token pushback for the one
//!    two-token lookahead in the grammar) and builds an AST.
//! 2. [`machine`] — walks the AST once, executing statements against the
//!    shared stack and address space; comments can carry debug directives
//!    that write diagnostics to stderr.
//! 3. [`memory`] — the evaluation [`memory::stack::Stack`] and the
//!    [`memory::space::AddressSpace`] of declared variables.
//!
//! ## Supported language
//!
//! Literals: 64-bit signed integers. Arithmetic: `+ - * / MOD` (wrapping).
//! Comparison: `= < > <= >=`, pushing 1 or 0. Stack: `DROP DUP SWAP`.
//! Memory: `VARIABLE name [n CELLS]` declares, a bare name pushes the base
//! address, `@` fetches, `!` stores. Control flow: `IF/ELSE/THEN`,
//! `WHILE/REPEAT`, `QUIT`. Functions: `: name body ;`, expanded inline at
//! the point of call. Keywords are case-insensitive.

pub mod machine;
pub mod memory;
pub mod parser;

//! Recursive descent parser for the stack language
//!
//! One token of context is enough almost everywhere; the `NUMBER CELLS`
//! suffix of a variable declaration needs two, which the pushback reader
//! provides. Parsing stops at the first error, and nothing of the failed
//! program survives.

use crate::parser::ast::{CompareOp, MathOp, Program, SourceLocation, Statement};
use crate::parser::lexer::{Lexer, Token};
use crate::parser::stream::TokenReader;
use std::fmt;
use std::rc::Rc;

/// Parser error type
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser for the stack language
pub struct Parser {
    tokens: TokenReader,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self {
            tokens: TokenReader::new(Lexer::new(source)),
        }
    }

    /// Parse the entire program (statements plus top-level declarations).
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        loop {
            if let Some(statement) = self.parse_common()? {
                program.statements.push(statement);
                continue;
            }

            match self.tokens.next() {
                Token::Eof(_) => return Ok(program),
                Token::Variable(loc) => {
                    let declaration = self.parse_variable_declaration(loc)?;
                    program.statements.push(declaration);
                }
                Token::Colon(loc) => {
                    let definition = self.parse_function_definition(loc)?;
                    program.statements.push(definition);
                }
                other => {
                    return Err(ParseError {
                        message: format!("unexpected token: {}", other),
                        location: other.location(),
                    });
                }
            }
        }
    }

    /// Parse one statement of the kind valid in any body. Consumes nothing
    /// and returns `None` when the next token starts something else, such as
    /// a declaration or a closing keyword.
    fn parse_common(&mut self) -> Result<Option<Statement>, ParseError> {
        let statement = match self.tokens.next() {
            Token::Number(text, location) => {
                let value = text.parse().map_err(|_| ParseError {
                    message: format!("invalid number literal '{}'", text),
                    location,
                })?;
                Statement::Push { value, location }
            }
            Token::Ident(name, location) => Statement::Call { name, location },

            Token::Plus(location) => Statement::Math {
                op: MathOp::Add,
                location,
            },
            Token::Minus(location) => Statement::Math {
                op: MathOp::Sub,
                location,
            },
            Token::Star(location) => Statement::Math {
                op: MathOp::Mul,
                location,
            },
            Token::Slash(location) => Statement::Math {
                op: MathOp::Div,
                location,
            },
            Token::Mod(location) => Statement::Math {
                op: MathOp::Mod,
                location,
            },

            Token::Eq(location) => Statement::Compare {
                op: CompareOp::Eq,
                location,
            },
            Token::Lt(location) => Statement::Compare {
                op: CompareOp::Lt,
                location,
            },
            Token::Gt(location) => Statement::Compare {
                op: CompareOp::Gt,
                location,
            },
            Token::Le(location) => Statement::Compare {
                op: CompareOp::Le,
                location,
            },
            Token::Ge(location) => Statement::Compare {
                op: CompareOp::Ge,
                location,
            },

            Token::Drop(location) => Statement::Drop { location },
            Token::Dup(location) => Statement::Dup { location },
            Token::Swap(location) => Statement::Swap { location },

            Token::Comment(text, location) => Statement::Comment {
                text: comment_body(&text),
                location,
            },

            Token::At(location) => Statement::Fetch { location },
            Token::Bang(location) => Statement::Store { location },

            Token::If(location) => self.parse_if(location)?,
            Token::While(location) => self.parse_while(location)?,
            Token::Quit(location) => Statement::Quit { location },

            _ => {
                self.tokens.unread();
                return Ok(None);
            }
        };

        Ok(Some(statement))
    }

    /// Parse `VARIABLE name` with an optional `n CELLS` suffix. The `VARIABLE`
    /// keyword is already consumed.
    fn parse_variable_declaration(
        &mut self,
        location: SourceLocation,
    ) -> Result<Statement, ParseError> {
        let name = match self.tokens.next() {
            Token::Ident(name, _) => name,
            other => {
                return Err(ParseError {
                    message: format!("expected variable identifier, found {}", other),
                    location: other.location(),
                });
            }
        };

        // Two-token lookahead for the size suffix; anything else is the
        // start of the next statement and goes back.
        let size = self.tokens.next();
        let suffix = self.tokens.next();

        let cells = match (&size, &suffix) {
            (Token::Number(text, number_location), Token::Cells(_)) => {
                let count: i64 = text.parse().map_err(|_| ParseError {
                    message: format!("invalid cell count '{}'", text),
                    location: *number_location,
                })?;
                if count < 1 {
                    return Err(ParseError {
                        message: "array cannot have less than 1 cell".to_string(),
                        location: *number_location,
                    });
                }
                count as usize
            }
            _ => {
                self.tokens.unread();
                self.tokens.unread();
                1
            }
        };

        Ok(Statement::Declare {
            name,
            cells,
            location,
        })
    }

    /// Parse `: name body ;`. The colon is already consumed.
    fn parse_function_definition(
        &mut self,
        location: SourceLocation,
    ) -> Result<Statement, ParseError> {
        let name = match self.tokens.next() {
            Token::Ident(name, _) => name,
            other => {
                return Err(ParseError {
                    message: format!("expected function identifier, found {}", other),
                    location: other.location(),
                });
            }
        };

        let mut body = Vec::new();
        loop {
            if let Some(statement) = self.parse_common()? {
                body.push(statement);
                continue;
            }

            match self.tokens.next() {
                Token::Semicolon(_) => break,
                other => {
                    return Err(ParseError {
                        message: format!("expected statement or ';', found {}", other),
                        location: other.location(),
                    });
                }
            }
        }

        Ok(Statement::Define {
            name,
            body: Rc::from(body),
            location,
        })
    }

    /// Parse `IF body [ELSE else_body] THEN`. The `IF` is already consumed.
    fn parse_if(&mut self, location: SourceLocation) -> Result<Statement, ParseError> {
        let mut body = Vec::new();
        let mut else_body: Option<Vec<Statement>> = None;

        loop {
            if let Some(statement) = self.parse_common()? {
                match else_body.as_mut() {
                    Some(else_body) => else_body.push(statement),
                    None => body.push(statement),
                }
                continue;
            }

            match self.tokens.next() {
                Token::Then(_) => break,
                Token::Else(else_location) => {
                    if else_body.is_some() {
                        return Err(ParseError {
                            message: "already in else".to_string(),
                            location: else_location,
                        });
                    }
                    else_body = Some(Vec::new());
                }
                other => {
                    return Err(ParseError {
                        message: format!("expected statement, 'ELSE' or 'THEN', found {}", other),
                        location: other.location(),
                    });
                }
            }
        }

        Ok(Statement::If {
            body,
            else_body,
            location,
        })
    }

    /// Parse `WHILE body REPEAT`. The `WHILE` is already consumed.
    fn parse_while(&mut self, location: SourceLocation) -> Result<Statement, ParseError> {
        let mut body = Vec::new();

        loop {
            if let Some(statement) = self.parse_common()? {
                body.push(statement);
                continue;
            }

            match self.tokens.next() {
                Token::Repeat(_) => break,
                other => {
                    return Err(ParseError {
                        message: format!("expected statement or 'REPEAT', found {}", other),
                        location: other.location(),
                    });
                }
            }
        }

        Ok(Statement::While { body, location })
    }
}

/// Strip the enclosing parentheses off a comment lexeme.
fn comment_body(text: &str) -> String {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

//! Runtime error types for the execution engine
//!
//! This module defines [`RuntimeError`], which represents all errors that can
//! occur during program execution (as opposed to parse errors or system
//! errors).
//!
//! All runtime errors are fatal: execution halts at the failing statement and
//! the final-stack artifact is never printed. Only the failing statement's
//! own effect is prevented; whatever earlier statements did to the stack and
//! memory stands.

use crate::memory::Cell;
use crate::parser::ast::{MathOp, SourceLocation};
use std::fmt;

/// What a name in the shared variable/function namespace refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
}

/// Runtime errors that can occur during execution
#[derive(Debug, Clone)]
pub enum RuntimeError {
    /// An operation needed more stack values than were present
    StackUnderflow {
        operation: &'static str,
        needed: usize,
        depth: usize,
        location: SourceLocation,
    },

    /// An identifier that names neither a variable nor a function
    UnknownIdentifier {
        name: String,
        location: SourceLocation,
    },

    /// An address outside every declared variable's cells
    BadAddress {
        address: Cell,
        location: SourceLocation,
    },

    /// A declaration reusing a name already bound in the shared namespace
    NameInUse {
        name: String,
        declaring: SymbolKind,
        existing: SymbolKind,
        location: SourceLocation,
    },

    /// Division or modulus with a zero divisor
    DivisionByZero {
        op: MathOp,
        location: SourceLocation,
    },

    /// A `debug var` directive naming an undeclared variable
    UnknownDebugVariable {
        name: String,
        location: SourceLocation,
    },
}

impl RuntimeError {
    /// Where in the source the failing statement sits.
    pub fn location(&self) -> SourceLocation {
        match self {
            RuntimeError::StackUnderflow { location, .. }
            | RuntimeError::UnknownIdentifier { location, .. }
            | RuntimeError::BadAddress { location, .. }
            | RuntimeError::NameInUse { location, .. }
            | RuntimeError::DivisionByZero { location, .. }
            | RuntimeError::UnknownDebugVariable { location, .. } => *location,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::StackUnderflow {
                operation,
                needed,
                depth,
                location,
            } => {
                write!(
                    f,
                    "'{}' needs {} stack value(s), found {} at line {}",
                    operation, needed, depth, location.line
                )
            }
            RuntimeError::UnknownIdentifier { name, location } => {
                write!(
                    f,
                    "cannot resolve identifier '{}' at line {}",
                    name, location.line
                )
            }
            RuntimeError::BadAddress { address, location } => {
                write!(
                    f,
                    "could not resolve address {} at line {}",
                    address, location.line
                )
            }
            RuntimeError::NameInUse {
                name,
                declaring,
                existing,
                location,
            } => {
                let message = match (declaring, existing) {
                    (SymbolKind::Variable, SymbolKind::Variable) => {
                        format!("cannot redeclare variable '{}'", name)
                    }
                    (SymbolKind::Variable, SymbolKind::Function) => format!(
                        "cannot declare variable '{}': a function with this name already exists",
                        name
                    ),
                    (SymbolKind::Function, SymbolKind::Variable) => format!(
                        "cannot define function '{}': a variable with this name already exists",
                        name
                    ),
                    (SymbolKind::Function, SymbolKind::Function) => {
                        format!("cannot redefine function '{}'", name)
                    }
                };
                write!(f, "{} at line {}", message, location.line)
            }
            RuntimeError::DivisionByZero { op, location } => {
                let what = if *op == MathOp::Mod {
                    "modulus"
                } else {
                    "division"
                };
                write!(f, "{} by zero at line {}", what, location.line)
            }
            RuntimeError::UnknownDebugVariable { name, location } => {
                write!(
                    f,
                    "cannot debug unknown variable '{}' at line {}",
                    name, location.line
                )
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

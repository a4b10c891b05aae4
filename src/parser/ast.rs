// AST definitions for the stack language

use crate::memory::Cell;
use std::rc::Rc;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Arithmetic operators. Both operands are popped, left below right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl MathOp {
    /// The operator as written in source.
    pub fn symbol(&self) -> &'static str {
        match self {
            MathOp::Add => "+",
            MathOp::Sub => "-",
            MathOp::Mul => "*",
            MathOp::Div => "/",
            MathOp::Mod => "MOD",
        }
    }
}

/// Comparison operators. The result is pushed as 1 (true) or 0 (false).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    /// The operator as written in source.
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }
}

/// Statements in the language
#[derive(Debug, Clone)]
pub enum Statement {
    /// `VARIABLE name` or `VARIABLE name n CELLS`; top-level only
    Declare {
        name: String,
        cells: usize,
        location: SourceLocation,
    },

    /// `: name body ;`; top-level only. The body is shared with the machine
    /// once the definition executes.
    Define {
        name: String,
        body: Rc<[Statement]>,
        location: SourceLocation,
    },

    /// Numeric literal, pushed onto the stack
    Push {
        value: Cell,
        location: SourceLocation,
    },

    /// Bare identifier: pushes a variable's base address or runs a function
    Call {
        name: String,
        location: SourceLocation,
    },

    /// `+`, `-`, `*`, `/` or `MOD`
    Math {
        op: MathOp,
        location: SourceLocation,
    },

    /// `=`, `<`, `>`, `<=` or `>=`
    Compare {
        op: CompareOp,
        location: SourceLocation,
    },

    /// `DROP`: discard the top value
    Drop { location: SourceLocation },

    /// `DUP`: push a copy of the top value
    Dup { location: SourceLocation },

    /// `SWAP`: exchange the top two values
    Swap { location: SourceLocation },

    /// `( ... )` with the parentheses stripped; may carry a debug directive
    Comment {
        text: String,
        location: SourceLocation,
    },

    /// `@`: pop an address, push the cell stored there
    Fetch { location: SourceLocation },

    /// `!`: pop an address then a value, write the value to the cell
    Store { location: SourceLocation },

    /// `IF body THEN` or `IF body ELSE else_body THEN`
    If {
        body: Vec<Statement>,
        else_body: Option<Vec<Statement>>,
        location: SourceLocation,
    },

    /// `WHILE body REPEAT`; the condition is popped before every iteration
    While {
        body: Vec<Statement>,
        location: SourceLocation,
    },

    /// `QUIT`: halt the whole program
    Quit { location: SourceLocation },
}

impl Statement {
    /// Get the source location of this statement
    pub fn location(&self) -> &SourceLocation {
        match self {
            Statement::Declare { location, .. }
            | Statement::Define { location, .. }
            | Statement::Push { location, .. }
            | Statement::Call { location, .. }
            | Statement::Math { location, .. }
            | Statement::Compare { location, .. }
            | Statement::Drop { location }
            | Statement::Dup { location }
            | Statement::Swap { location }
            | Statement::Comment { location, .. }
            | Statement::Fetch { location }
            | Statement::Store { location }
            | Statement::If { location, .. }
            | Statement::While { location, .. }
            | Statement::Quit { location } => location,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}

// Execution engine for the stack language

use crate::machine::errors::{RuntimeError, SymbolKind};
use crate::memory::space::{AddressSpace, Variable};
use crate::memory::stack::Stack;
use crate::memory::Cell;
use crate::parser::ast::{CompareOp, MathOp, Program, SourceLocation, Statement};
use log::{debug, trace};
use rustc_hash::FxHashMap;
use std::io::{self, Write};
use std::rc::Rc;

/// The machine that executes a parsed program.
///
/// Statements run in source order, exactly once, top to bottom. Declarations
/// are statements too: a name exists only after execution has passed its
/// declaration. Functions run inline on the caller's stack and memory, so
/// the machine never has more state than what is declared here.
pub struct Machine {
    /// Declared variables in declaration order; defines the address space
    pub(crate) space: AddressSpace,

    /// Variable name → base address, kept consistent with `space`
    pub(crate) addresses: FxHashMap<String, Cell>,

    /// Function name → body, shared with the AST node that defined it
    pub(crate) functions: FxHashMap<String, Rc<[Statement]>>,

    /// The evaluation stack
    pub(crate) stack: Stack,

    /// Set by `QUIT`; every body loop stops once this is true
    pub(crate) halted: bool,

    /// Where debug directives write; stderr outside of tests
    pub(crate) debug_sink: Box<dyn Write>,
}

impl Machine {
    /// Create a machine whose debug directives write to stderr.
    pub fn new() -> Self {
        Self::with_debug_sink(Box::new(io::stderr()))
    }

    /// Create a machine with a custom debug sink.
    pub fn with_debug_sink(debug_sink: Box<dyn Write>) -> Self {
        Machine {
            space: AddressSpace::new(),
            addresses: FxHashMap::default(),
            functions: FxHashMap::default(),
            stack: Stack::new(),
            halted: false,
            debug_sink,
        }
    }

    /// Run the program from start to finish.
    pub fn execute(&mut self, program: &Program) -> Result<(), RuntimeError> {
        self.run_body(&program.statements)
    }

    /// The evaluation stack, bottom to top.
    pub fn stack(&self) -> &[Cell] {
        self.stack.values()
    }

    /// Whether a `QUIT` ended the run early.
    pub fn halted(&self) -> bool {
        self.halted
    }

    /// Execute a statement sequence, stopping as soon as the machine halts.
    fn run_body(&mut self, body: &[Statement]) -> Result<(), RuntimeError> {
        for statement in body {
            self.exec_statement(statement)?;
            if self.halted {
                break;
            }
        }
        Ok(())
    }

    /// Execute a single statement
    fn exec_statement(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
        let location = *statement.location();

        match statement {
            Statement::Declare { name, cells, .. } => {
                self.declare_variable(name, *cells, location)
            }
            Statement::Define { name, body, .. } => self.define_function(name, body, location),
            Statement::Push { value, .. } => {
                self.stack.push(*value);
                Ok(())
            }
            Statement::Call { name, .. } => self.call_identifier(name, location),
            Statement::Math { op, .. } => self.math_operation(*op, location),
            Statement::Compare { op, .. } => self.compare_operation(*op, location),
            Statement::Drop { .. } => self.pop_one("DROP", location).map(|_| ()),
            Statement::Dup { .. } => {
                let top = self.peek_top("DUP", location)?;
                self.stack.push(top);
                Ok(())
            }
            Statement::Swap { .. } => {
                if !self.stack.swap_top() {
                    return Err(RuntimeError::StackUnderflow {
                        operation: "SWAP",
                        needed: 2,
                        depth: self.stack.len(),
                        location,
                    });
                }
                Ok(())
            }
            Statement::Comment { text, .. } => self.comment(text, location),
            Statement::Fetch { .. } => self.fetch(location),
            Statement::Store { .. } => self.store(location),
            Statement::If { body, else_body, .. } => {
                self.exec_if(body, else_body.as_deref(), location)
            }
            Statement::While { body, .. } => self.exec_while(body, location),
            Statement::Quit { .. } => {
                trace!("QUIT at line {}", location.line);
                self.halted = true;
                Ok(())
            }
        }
    }

    /// Declare a variable at the current end of the address space.
    fn declare_variable(
        &mut self,
        name: &str,
        cells: usize,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        self.check_name_free(name, SymbolKind::Variable, location)?;

        let address = self.space.end();
        debug!("variable '{}' gets {} cell(s) at address {}", name, cells, address);
        self.addresses.insert(name.to_string(), address);
        self.space.append(Variable::new(name, cells));
        Ok(())
    }

    /// Register a function body under its name.
    fn define_function(
        &mut self,
        name: &str,
        body: &Rc<[Statement]>,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        self.check_name_free(name, SymbolKind::Function, location)?;

        debug!("function '{}' defined with {} statement(s)", name, body.len());
        self.functions.insert(name.to_string(), Rc::clone(body));
        Ok(())
    }

    /// Variables and functions share one namespace; a name is bound once,
    /// forever.
    fn check_name_free(
        &self,
        name: &str,
        declaring: SymbolKind,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let existing = if self.addresses.contains_key(name) {
            SymbolKind::Variable
        } else if self.functions.contains_key(name) {
            SymbolKind::Function
        } else {
            return Ok(());
        };

        Err(RuntimeError::NameInUse {
            name: name.to_string(),
            declaring,
            existing,
            location,
        })
    }

    /// A bare identifier: a variable pushes its base address, a function
    /// runs its body inline on the caller's stack and memory.
    fn call_identifier(
        &mut self,
        name: &str,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        if let Some(&address) = self.addresses.get(name) {
            self.stack.push(address);
            return Ok(());
        }

        if let Some(body) = self.functions.get(name) {
            trace!("inlining function '{}'", name);
            let body = Rc::clone(body);
            return self.run_body(&body);
        }

        Err(RuntimeError::UnknownIdentifier {
            name: name.to_string(),
            location,
        })
    }

    /// Pop right then left, push the result. Arithmetic wraps on overflow;
    /// division truncates toward zero and `i64::MIN / -1` wraps.
    fn math_operation(&mut self, op: MathOp, location: SourceLocation) -> Result<(), RuntimeError> {
        let (lhs, rhs) = self.pop_two(op.symbol(), location)?;

        let result = match op {
            MathOp::Add => lhs.wrapping_add(rhs),
            MathOp::Sub => lhs.wrapping_sub(rhs),
            MathOp::Mul => lhs.wrapping_mul(rhs),
            MathOp::Div => {
                if rhs == 0 {
                    return Err(RuntimeError::DivisionByZero { op, location });
                }
                lhs.wrapping_div(rhs)
            }
            MathOp::Mod => {
                if rhs == 0 {
                    return Err(RuntimeError::DivisionByZero { op, location });
                }
                lhs.wrapping_rem(rhs)
            }
        };

        self.stack.push(result);
        Ok(())
    }

    /// Pop right then left, push 1 when the comparison holds, 0 otherwise.
    fn compare_operation(
        &mut self,
        op: CompareOp,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let (lhs, rhs) = self.pop_two(op.symbol(), location)?;

        let truth = match op {
            CompareOp::Eq => lhs == rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Le => lhs <= rhs,
            CompareOp::Ge => lhs >= rhs,
        };

        self.stack.push(Cell::from(truth));
        Ok(())
    }

    /// `@`: pop an address, push the cell stored there.
    fn fetch(&mut self, location: SourceLocation) -> Result<(), RuntimeError> {
        let address = self.pop_one("@", location)?;
        let value = self
            .space
            .cell(address)
            .ok_or(RuntimeError::BadAddress { address, location })?;
        self.stack.push(value);
        Ok(())
    }

    /// `!`: the address sits on top with the value below it; pop both and
    /// overwrite the cell.
    fn store(&mut self, location: SourceLocation) -> Result<(), RuntimeError> {
        let (value, address) = self.pop_two("!", location)?;
        let cell = self
            .space
            .cell_mut(address)
            .ok_or(RuntimeError::BadAddress { address, location })?;
        *cell = value;
        Ok(())
    }

    /// Pop the condition once, then run one body or the other.
    fn exec_if(
        &mut self,
        body: &[Statement],
        else_body: Option<&[Statement]>,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let condition = self.pop_one("IF", location)?;

        if condition != 0 {
            self.run_body(body)
        } else if let Some(else_body) = else_body {
            self.run_body(else_body)
        } else {
            Ok(())
        }
    }

    /// Pop a fresh condition before every iteration; the body is expected to
    /// leave the next one on the stack. Nothing is re-evaluated implicitly.
    fn exec_while(
        &mut self,
        body: &[Statement],
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        loop {
            let condition = self.pop_one("WHILE", location)?;
            if condition == 0 {
                return Ok(());
            }

            self.run_body(body)?;
            if self.halted {
                return Ok(());
            }
        }
    }

    fn pop_one(
        &mut self,
        operation: &'static str,
        location: SourceLocation,
    ) -> Result<Cell, RuntimeError> {
        let depth = self.stack.len();
        self.stack.pop().ok_or(RuntimeError::StackUnderflow {
            operation,
            needed: 1,
            depth,
            location,
        })
    }

    fn pop_two(
        &mut self,
        operation: &'static str,
        location: SourceLocation,
    ) -> Result<(Cell, Cell), RuntimeError> {
        let depth = self.stack.len();
        self.stack.pop2().ok_or(RuntimeError::StackUnderflow {
            operation,
            needed: 2,
            depth,
            location,
        })
    }

    fn peek_top(
        &self,
        operation: &'static str,
        location: SourceLocation,
    ) -> Result<Cell, RuntimeError> {
        self.stack.last().ok_or(RuntimeError::StackUnderflow {
            operation,
            needed: 1,
            depth: 0,
            location,
        })
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

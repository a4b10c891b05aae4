//! Evaluation stack
//!
//! The single stack of [`Cell`]s that every operation in the language reads
//! and writes. This type only reports whether a pop was possible; the engine
//! turns a failed pop into a runtime error naming the operation.

use super::Cell;

/// The evaluation stack.
#[derive(Debug, Clone)]
pub struct Stack {
    values: Vec<Cell>,
}

impl Stack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Stack { values: Vec::new() }
    }

    /// Push a value on top.
    pub fn push(&mut self, value: Cell) {
        self.values.push(value);
    }

    /// Pop the top value.
    pub fn pop(&mut self) -> Option<Cell> {
        self.values.pop()
    }

    /// Pop the top two values as `(below, top)`. Pops nothing when fewer
    /// than two values are present.
    pub fn pop2(&mut self) -> Option<(Cell, Cell)> {
        if self.values.len() < 2 {
            return None;
        }
        let top = self.values.pop()?;
        let below = self.values.pop()?;
        Some((below, top))
    }

    /// The top value without consuming it.
    pub fn last(&self) -> Option<Cell> {
        self.values.last().copied()
    }

    /// Exchange the top two values in place. Returns `false` when fewer
    /// than two values are present.
    pub fn swap_top(&mut self) -> bool {
        let depth = self.values.len();
        if depth < 2 {
            return false;
        }
        self.values.swap(depth - 2, depth - 1);
        true
    }

    /// Bottom-to-top view of the whole stack.
    pub fn values(&self) -> &[Cell] {
        &self.values
    }

    /// Current depth.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the stack holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

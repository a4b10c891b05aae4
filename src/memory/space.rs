//! Linear address space of declared variables
//!
//! Every `VARIABLE` declaration appends a region of zeroed cells at the end
//! of the space. Fetch and store resolve an address by scanning the regions
//! in declaration order; an address below 0 or at or past the end of the
//! last region resolves to nothing.

use super::Cell;

/// A named region of cells declared with `VARIABLE`.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Name the region was declared under
    pub name: String,

    /// Number of cells, at least 1
    pub size: usize,

    /// Cell storage, zero-initialized
    pub data: Vec<Cell>,
}

impl Variable {
    /// Create a region of `size` zeroed cells.
    pub fn new(name: &str, size: usize) -> Self {
        Variable {
            name: name.to_string(),
            size,
            data: vec![0; size],
        }
    }
}

/// All declared variables, concatenated in declaration order.
#[derive(Debug, Clone)]
pub struct AddressSpace {
    regions: Vec<Variable>,
}

impl AddressSpace {
    /// Create an empty address space.
    pub fn new() -> Self {
        AddressSpace {
            regions: Vec::new(),
        }
    }

    /// Total cell count, which is also the base address the next declared
    /// variable will get.
    pub fn end(&self) -> Cell {
        self.regions.iter().map(|v| v.size as Cell).sum()
    }

    /// Append a region at the end of the space.
    pub fn append(&mut self, variable: Variable) {
        self.regions.push(variable);
    }

    /// Find the region containing `address` and the offset within it.
    pub fn resolve(&self, address: Cell) -> Option<(&Variable, usize)> {
        if address < 0 {
            return None;
        }

        let mut base: Cell = 0;
        for variable in &self.regions {
            let end = base + variable.size as Cell;
            if address < end {
                return Some((variable, (address - base) as usize));
            }
            base = end;
        }
        None
    }

    /// Read the cell at `address`.
    pub fn cell(&self, address: Cell) -> Option<Cell> {
        self.resolve(address)
            .map(|(variable, offset)| variable.data[offset])
    }

    /// Mutable access to the cell at `address`.
    pub fn cell_mut(&mut self, address: Cell) -> Option<&mut Cell> {
        if address < 0 {
            return None;
        }

        let mut base: Cell = 0;
        for variable in &mut self.regions {
            let end = base + variable.size as Cell;
            if address < end {
                return Some(&mut variable.data[(address - base) as usize]);
            }
            base = end;
        }
        None
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

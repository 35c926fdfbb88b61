use crate::*;

/// One factor of a multiplication prompt.
pub type Operand = u8;

/// Product of two operands, at most `OPERAND_MAX * OPERAND_MAX`.
pub type Product = u8;

/// Linear position of a cell inside the grid.
pub type CellIndex = usize;

/// Operand pair `(a, b)` of a prompt `a X b`.
pub type Operands = (Operand, Operand);

pub const OPERAND_MIN: Operand = 2;
pub const OPERAND_MAX: Operand = 9;

/// Number of cells along either side of the grid.
pub const GRID_SIDE: usize = (OPERAND_MAX - OPERAND_MIN + 1) as usize;

/// Total number of cells in the grid.
pub const CELL_COUNT: usize = GRID_SIDE * GRID_SIDE;

pub const fn is_operand(value: Operand) -> bool {
    value >= OPERAND_MIN && value <= OPERAND_MAX
}

/// Row-major position of `(a, b)`, i.e. `(a - 2) * 8 + (b - 2)`.
pub fn index_of((a, b): Operands) -> Result<CellIndex> {
    if is_operand(a) && is_operand(b) {
        Ok(usize::from(a - OPERAND_MIN) * GRID_SIDE + usize::from(b - OPERAND_MIN))
    } else {
        Err(GridError::InvalidOperands(a, b))
    }
}

/// Inverse of [`index_of`].
pub fn operands_at(index: CellIndex) -> Result<Operands> {
    if index >= CELL_COUNT {
        return Err(GridError::InvalidIndex(index));
    }
    // both quotient and remainder are below GRID_SIDE, so they fit an Operand
    let row = (index / GRID_SIDE) as Operand;
    let col = (index % GRID_SIDE) as Operand;
    Ok((OPERAND_MIN + row, OPERAND_MIN + col))
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Operands {
    type Output = [usize; 2];

    /// Expects validated operands.
    fn to_nd_index(self) -> Self::Output {
        [
            usize::from(self.0 - OPERAND_MIN),
            usize::from(self.1 - OPERAND_MIN),
        ]
    }
}

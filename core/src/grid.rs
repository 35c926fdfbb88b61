use alloc::rc::Rc;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The full table of prompts for operands `2..=9`, ordered row-major by `(a, b)`.
///
/// Cell storage is shared between grids, toggling produces a new grid and only
/// copies the storage when it is shared, so a previously returned grid never
/// changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAnswerGrid")]
pub struct AnswerGrid {
    cells: Rc<Array2<AnswerCell>>,
}

/// Unchecked wire form of [`AnswerGrid`].
#[derive(Deserialize)]
struct RawAnswerGrid {
    cells: Array2<AnswerCell>,
}

impl TryFrom<RawAnswerGrid> for AnswerGrid {
    type Error = GridError;

    fn try_from(raw: RawAnswerGrid) -> Result<Self> {
        let cells = raw.cells;
        if cells.dim() != (GRID_SIDE, GRID_SIDE) {
            return Err(GridError::InvalidBoardShape);
        }
        // cells are valid on their own, they also have to sit at their own position
        for ((row, col), cell) in cells.indexed_iter() {
            if cell.operands().to_nd_index() != [row, col] {
                let (a, b) = cell.operands();
                return Err(GridError::InvalidCell(a, b));
            }
        }
        log::debug!(
            "answer grid restored, {} revealed",
            cells.iter().filter(|cell| cell.is_revealed()).count()
        );
        Ok(Self {
            cells: Rc::new(cells),
        })
    }
}

impl AnswerGrid {
    pub fn new() -> Self {
        let cells = Array2::from_shape_fn((GRID_SIDE, GRID_SIDE), |(row, col)| {
            // row and col are below GRID_SIDE
            AnswerCell::new((OPERAND_MIN + row as Operand, OPERAND_MIN + col as Operand))
        });
        log::debug!("answer grid built with {} cells", cells.len());
        Self {
            cells: Rc::new(cells),
        }
    }

    /// Grid with every product already visible.
    pub fn fully_revealed() -> Self {
        let mut grid = Self::new();
        Rc::make_mut(&mut grid.cells)
            .iter_mut()
            .for_each(AnswerCell::flip);
        grid
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: CellIndex) -> Result<&AnswerCell> {
        let operands = operands_at(index)?;
        Ok(&self.cells[operands.to_nd_index()])
    }

    pub fn cell_for(&self, operands: Operands) -> Result<&AnswerCell> {
        index_of(operands)?;
        Ok(&self.cells[operands.to_nd_index()])
    }

    /// Cells in index order.
    pub fn iter(&self) -> impl Iterator<Item = &AnswerCell> {
        self.cells.iter()
    }

    /// Returns a grid where only the cell at `index` has its reveal state flipped.
    pub fn try_toggle(&self, index: CellIndex) -> Result<Self> {
        let operands = operands_at(index)?;
        let mut next = self.clone();
        let cell = &mut Rc::make_mut(&mut next.cells)[operands.to_nd_index()];
        cell.flip();
        log::trace!(
            "toggle cell {} ({:?}): revealed={}",
            index,
            operands,
            cell.is_revealed()
        );
        Ok(next)
    }

    /// Like [`Self::try_toggle`], but an invalid index is a bug in the caller and panics.
    #[track_caller]
    pub fn toggle(&self, index: CellIndex) -> Self {
        match self.try_toggle(index) {
            Ok(next) => next,
            Err(err) => panic!("cannot toggle: {err}"),
        }
    }

    pub fn toggle_operands(&self, operands: Operands) -> Result<Self> {
        self.try_toggle(index_of(operands)?)
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_revealed()).count()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.cells.iter().all(AnswerCell::is_revealed)
    }

    /// Cheap identity check, `true` means nothing changed between the two grids.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }
}

impl Default for AnswerGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<CellIndex> for AnswerGrid {
    type Output = AnswerCell;

    #[track_caller]
    fn index(&self, index: CellIndex) -> &Self::Output {
        match self.cell(index) {
            Ok(cell) => cell,
            Err(err) => panic!("{err}"),
        }
    }
}

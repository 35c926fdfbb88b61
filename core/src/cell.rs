use alloc::format;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// One quiz entry of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAnswerCell")]
pub struct AnswerCell {
    operand_a: Operand,
    operand_b: Operand,
    product: Product,
    revealed: bool,
    prompt: String,
}

impl AnswerCell {
    /// Expects validated operands.
    pub(crate) fn new((a, b): Operands) -> Self {
        Self {
            operand_a: a,
            operand_b: b,
            product: a * b,
            revealed: false,
            prompt: format!("{a} X {b}"),
        }
    }

    pub const fn operand_a(&self) -> Operand {
        self.operand_a
    }

    pub const fn operand_b(&self) -> Operand {
        self.operand_b
    }

    pub const fn operands(&self) -> Operands {
        (self.operand_a, self.operand_b)
    }

    pub const fn product(&self) -> Product {
        self.product
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// What the cell shows: the product once revealed, the prompt otherwise.
    pub const fn display(&self) -> CellDisplay {
        if self.revealed {
            CellDisplay::Product(self.product)
        } else {
            CellDisplay::Prompt(self.operand_a, self.operand_b)
        }
    }

    pub(crate) fn flip(&mut self) {
        self.revealed = !self.revealed;
    }
}

/// Unchecked wire form of [`AnswerCell`].
#[derive(Deserialize)]
struct RawAnswerCell {
    operand_a: Operand,
    operand_b: Operand,
    product: Product,
    revealed: bool,
    prompt: String,
}

impl TryFrom<RawAnswerCell> for AnswerCell {
    type Error = GridError;

    fn try_from(raw: RawAnswerCell) -> Result<Self> {
        let operands = (raw.operand_a, raw.operand_b);
        index_of(operands)?;
        let mut cell = AnswerCell::new(operands);
        if cell.product != raw.product || cell.prompt != raw.prompt {
            return Err(GridError::InvalidCell(raw.operand_a, raw.operand_b));
        }
        cell.revealed = raw.revealed;
        Ok(cell)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellDisplay {
    Prompt(Operand, Operand),
    Product(Product),
}

impl CellDisplay {
    pub const fn is_product(self) -> bool {
        matches!(self, Self::Product(_))
    }
}

impl fmt::Display for CellDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt(a, b) => write!(f, "{a} X {b}"),
            Self::Product(product) => write!(f, "{product}"),
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Cell index {0} is outside of the grid")]
    InvalidIndex(usize),
    #[error("Operands ({0}, {1}) are outside of the table range")]
    InvalidOperands(u8, u8),
    #[error("Board shape does not match the table")]
    InvalidBoardShape,
    #[error("Cell ({0}, {1}) does not match its position or product")]
    InvalidCell(u8, u8),
}

pub type Result<T> = core::result::Result<T, GridError>;

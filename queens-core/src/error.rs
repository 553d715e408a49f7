use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("grid size N={0} not supported (must be 5..=15)")]
    InvalidGridSize(u8),

    #[error("malformed board string: {0}")]
    MalformedBoardString(String),

    #[error("board string has {found} cells, expected {expected}")]
    CellCountMismatch { expected: usize, found: usize },

    #[error("invalid cell byte {0:?}")]
    InvalidCellByte(String),

    #[error("color {0} out of range for grid size N={1}")]
    ColorOutOfRange(u8, u8),
}

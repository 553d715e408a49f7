use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PermError {
    #[error("grid size N={0} not supported (must be 5..=15)")]
    InvalidBoardSize(u8),

    #[error("I/O error on permutation cache: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt permutation cache at {path}: {reason}")]
    CorruptCache { path: PathBuf, reason: String },
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Core(#[from] queens_core::CoreError),

    /// Kept as a typed variant for API parity with the original's
    /// malloc-failure paths. Unreachable under Rust's allocator, which
    /// aborts rather than returning null.
    #[error("solver scratch allocation failed")]
    AllocationFailed,
}

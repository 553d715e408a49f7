use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error(transparent)]
    Core(#[from] queens_core::CoreError),

    #[error(transparent)]
    Perm(#[from] queens_perm::PermError),

    #[error("board generation exhausted {attempts} attempts without a unique-solution board")]
    AttemptsExhausted { attempts: u32 },
}

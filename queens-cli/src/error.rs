use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] queens_core::CoreError),

    #[error(transparent)]
    Perm(#[from] queens_perm::PermError),

    #[error(transparent)]
    Gen(#[from] queens_gen::GenError),

    #[error(transparent)]
    Solve(#[from] queens_solver::SolveError),

    #[error("exactly one of --generate, --generate_and_solve, --solve_step, --print_from_string is required")]
    NoCommandSelected,

    #[error("solver made no progress after {0} steps")]
    SolveStalled(u32),
}

mod error;
mod render;

use clap::Parser;
use error::CliError;
use queens_core::{MAX_SIZE, MIN_SIZE};
use queens_gen::BoardGenConfig;
use queens_perm::{PermutationStore, PermutationStoreConfig};
use queens_solver::{StrategyTag, incremental_solve};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::path::PathBuf;

/// Maximum incremental-solve steps `--generate_and_solve` will print before
/// giving up and reporting a stall.
const MAX_SOLVE_STEPS: u32 = 500;

#[derive(Parser, Debug)]
#[command(name = "queens-cli", version, about = "Generate and solve Queens puzzles")]
struct Cli {
    /// Generate a unique-solution board for N (5..=15) and print it.
    #[arg(long = "generate", value_name = "N", value_parser = clap::value_parser!(u8).range(MIN_SIZE as i64..=MAX_SIZE as i64))]
    generate: Option<u8>,

    /// As --generate, then print each incremental solver step and its strategy tag.
    #[arg(long = "generate_and_solve", value_name = "N", value_parser = clap::value_parser!(u8).range(MIN_SIZE as i64..=MAX_SIZE as i64))]
    generate_and_solve: Option<u8>,

    /// Parse a serialized board (see the `NN|HH,...` codec), apply one
    /// solver call, print the updated board and its serialization.
    #[arg(long = "solve_step", value_name = "BOARD")]
    solve_step: Option<String>,

    /// Parse and print a serialized board.
    #[arg(long = "print_from_string", value_name = "BOARD")]
    print_from_string: Option<String>,

    /// RNG seed for generation and stepwise solving. Random if omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the permutation cache files. Defaults to a
    /// subdirectory of the system temp directory.
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,
}

#[cfg(feature = "telemetry-subscriber")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("queens_gen=info,queens_solver=info,queens_perm=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(not(feature = "telemetry-subscriber"))]
fn init_tracing() {}

fn main() {
    init_tracing();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            use clap::error::ErrorKind;
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            err.print().ok();
            std::process::exit(code);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let cache_dir = cli.cache_dir.clone().unwrap_or_else(|| std::env::temp_dir().join("queens-permutations"));
    let store = PermutationStore::new(PermutationStoreConfig::new(cache_dir, true));

    match (cli.generate, cli.generate_and_solve, &cli.solve_step, &cli.print_from_string) {
        (Some(n), None, None, None) => cmd_generate(&store, n, &mut rng),
        (None, Some(n), None, None) => cmd_generate_and_solve(&store, n, &mut rng),
        (None, None, Some(board_string), None) => cmd_solve_step(board_string, &mut rng),
        (None, None, None, Some(board_string)) => cmd_print_from_string(board_string),
        _ => Err(CliError::NoCommandSelected),
    }
}

fn cmd_generate(store: &PermutationStore, n: u8, rng: &mut ChaCha20Rng) -> Result<(), CliError> {
    let config = BoardGenConfig::default();
    let board = queens_gen::generate(store, n, &config, rng)?;
    print!("{}", render::render(&board));
    println!("{}", queens_core::codec::serialize(&board));
    Ok(())
}

fn cmd_generate_and_solve(store: &PermutationStore, n: u8, rng: &mut ChaCha20Rng) -> Result<(), CliError> {
    let config = BoardGenConfig::default();
    let mut board = queens_gen::generate(store, n, &config, rng)?;
    print!("{}", render::render(&board));

    for step in 1..=MAX_SOLVE_STEPS {
        let tag = incremental_solve(&mut board, rng)?;
        println!("step {step}: {tag:?}");
        print!("{}", render::render(&board));
        match tag {
            StrategyTag::Solved | StrategyTag::Failed => return Ok(()),
            _ => {}
        }
    }

    Err(CliError::SolveStalled(MAX_SOLVE_STEPS))
}

fn cmd_solve_step(board_string: &str, rng: &mut ChaCha20Rng) -> Result<(), CliError> {
    let mut board = queens_core::codec::parse(board_string)?;
    let tag = incremental_solve(&mut board, rng)?;
    println!("{tag:?}");
    print!("{}", render::render(&board));
    println!("{}", queens_core::codec::serialize(&board));
    Ok(())
}

fn cmd_print_from_string(board_string: &str) -> Result<(), CliError> {
    let board = queens_core::codec::parse(board_string)?;
    print!("{}", render::render(&board));
    Ok(())
}

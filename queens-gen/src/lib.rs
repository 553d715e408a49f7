#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod config;
mod error;
mod generator;
mod oracle;

use queens_core::Board;
use queens_perm::PermutationStore;
use rand::Rng;

pub use config::BoardGenConfig;
pub use error::GenError;

#[cfg(feature = "tracing")]
use tracing::{instrument, trace};

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

/// Generate a unique-solution board of size `n`: seed a random permutation,
/// flood-fill the rest by color, and retry until the uniqueness oracle
/// accepts (or `config.max_attempts` is exhausted).
#[cfg_attr(feature = "tracing", instrument(skip(store, config, rng), fields(n)))]
pub fn generate<R: Rng + ?Sized>(
    store: &PermutationStore,
    n: u8,
    config: &BoardGenConfig,
    rng: &mut R,
) -> Result<Board, GenError> {
    let all = store.get_all(n)?;

    for attempt in 0..config.max_attempts {
        let perm = store.get_random(n, rng)?;
        let mut board = Board::new(n)?;
        generator::seed_from_permutation(&mut board, &perm);
        generator::flood_fill(&mut board, config, rng);

        if oracle::has_unique_solution(&board, &all) {
            trace!(attempt, "gen.accepted");
            return Ok(board);
        }
    }

    Err(GenError::AttemptsExhausted { attempts: config.max_attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use queens_perm::PermutationStoreConfig;
    use rand::SeedableRng;

    #[test]
    fn generate_produces_a_board_the_oracle_accepts() {
        let dir = std::env::temp_dir().join(format!("queens-gen-test-{}", std::process::id()));
        let store = PermutationStore::new(PermutationStoreConfig::new(&dir, false));
        let config = BoardGenConfig::default();
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(99);

        let board = generate(&store, 5, &config, &mut rng).expect("generation should succeed for N=5");

        for row in 0..5 {
            for col in 0..5 {
                assert_ne!(board.cell(row, col).color(), 0);
            }
        }
        let exactly_one_queen_per_column = (0..5).all(|col| (0..5).filter(|&row| board.cell(row, col).has_solution_queen()).count() == 1);
        assert!(exactly_one_queen_per_column);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn generate_satisfies_board_invariants_for_n_5_through_7() {
        let dir = std::env::temp_dir().join(format!("queens-gen-test-invariants-{}", std::process::id()));
        let store = PermutationStore::new(PermutationStoreConfig::new(&dir, false));
        let config = BoardGenConfig::default();

        for (seed, n) in [(10u64, 5u8), (20, 6), (30, 7)] {
            let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(seed);
            let board = generate(&store, n, &config, &mut rng).expect("generation should succeed");
            let all = store.get_all(n).unwrap();

            // Every cell colored 1..=n, no cell left at the transient 0.
            for row in 0..n {
                for col in 0..n {
                    let color = board.cell(row, col).color();
                    assert!(color >= 1 && color <= n, "({row},{col}) has color {color}, n={n}");
                }
            }

            // Exactly one queen per column, and the oracle accepts the board.
            for col in 0..n {
                let queens_in_col = (0..n).filter(|&row| board.cell(row, col).has_solution_queen()).count();
                assert_eq!(queens_in_col, 1, "column {col} should have exactly one queen");
            }
            assert!(oracle::has_unique_solution(&board, &all), "generated board for n={n} should have a unique solution");
        }

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn generate_rejects_out_of_range_size() {
        let dir = std::env::temp_dir().join(format!("queens-gen-test-range-{}", std::process::id()));
        let store = PermutationStore::new(PermutationStoreConfig::new(&dir, false));
        let config = BoardGenConfig::default();
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(1);

        assert!(matches!(generate(&store, 4, &config, &mut rng), Err(GenError::Perm(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }
}

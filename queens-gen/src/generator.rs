//! Multi-pass stochastic flood fill, seeded by a permutation from the
//! permutation store.

use queens_core::Board;
use rand::Rng;
use smallvec::SmallVec;

use crate::config::BoardGenConfig;

#[cfg(feature = "tracing")]
use tracing::trace;

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

/// Seed `board` with one solution-queen per column, colored `1..=n`, from a
/// permutation whose entry `perm[c]` is the row of column `c`'s queen.
pub(crate) fn seed_from_permutation(board: &mut Board, perm: &[u8]) {
    for (col, &row) in perm.iter().enumerate() {
        let cell = board.cell_mut(row, col as u8);
        cell.set_solution_queen(true);
        cell.set_color(col as u8 + 1);
    }
}

/// In-bounds neighbors of `(row, col)`, fixed order up/down/left/right,
/// restricted to the sampled axis.
fn candidate_neighbors(n: u8, row: u8, col: u8, only_horizontal: bool, only_vertical: bool) -> SmallVec<[(u8, u8); 4]> {
    let mut out = SmallVec::new();
    let include_vertical = !only_horizontal;
    let include_horizontal = !only_vertical;

    if include_vertical {
        if row > 0 {
            out.push((row - 1, col));
        }
        if row + 1 < n {
            out.push((row + 1, col));
        }
    }
    if include_horizontal {
        if col > 0 {
            out.push((row, col - 1));
        }
        if col + 1 < n {
            out.push((row, col + 1));
        }
    }
    out
}

/// Repeatedly sweep every zero-colored cell, copying a neighbor's color in,
/// until none remain. Termination is guaranteed only in expectation; the
/// acceptance loop in [`crate::generate`] retries the rare stall.
pub(crate) fn flood_fill<R: Rng + ?Sized>(board: &mut Board, config: &BoardGenConfig, rng: &mut R) {
    let n = board.size();
    let mut pass = 0u32;

    loop {
        let mut remaining = 0u32;

        for row in 0..n {
            for col in 0..n {
                if board.cell(row, col).color() != 0 {
                    continue;
                }
                remaining += 1;

                if rng.random_range(0..100) < config.cell_skip_chance {
                    continue;
                }

                let only_horizontal = rng.random_range(0..100) < config.only_horizontal_neighbor_chance;
                let only_vertical = !only_horizontal && rng.random_range(0..100) < config.only_vertical_neighbor_chance;

                for (nr, nc) in candidate_neighbors(n, row, col, only_horizontal, only_vertical) {
                    if rng.random_range(0..100) < config.neighbor_skip_chance {
                        continue;
                    }
                    let neighbor_color = board.cell(nr, nc).color();
                    if neighbor_color != 0 {
                        board.cell_mut(row, col).set_color(neighbor_color);
                        break;
                    }
                }
            }
        }

        pass += 1;
        trace!(pass, remaining, "gen.flood_fill_pass");
        if remaining == 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_from_permutation_places_distinct_colors() {
        let mut board = Board::new(5).unwrap();
        seed_from_permutation(&mut board, &[2, 0, 4, 1, 3]);
        for (col, &row) in [2u8, 0, 4, 1, 3].iter().enumerate() {
            let cell = board.cell(row, col as u8);
            assert!(cell.has_solution_queen());
            assert_eq!(cell.color(), col as u8 + 1);
        }
    }

    #[test]
    fn candidate_neighbors_restricts_to_sampled_axis() {
        let horiz = candidate_neighbors(5, 2, 2, true, false);
        assert_eq!(horiz.len(), 2);
        assert!(horiz.iter().all(|&(r, _)| r == 2));

        let vert = candidate_neighbors(5, 2, 2, false, true);
        assert_eq!(vert.len(), 2);
        assert!(vert.iter().all(|&(_, c)| c == 2));

        let all = candidate_neighbors(5, 2, 2, false, false);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn candidate_neighbors_respects_board_edges() {
        assert_eq!(candidate_neighbors(5, 0, 0, false, false).len(), 2);
    }

    #[test]
    fn flood_fill_colors_every_cell() {
        use rand::SeedableRng;
        let mut board = Board::new(6).unwrap();
        seed_from_permutation(&mut board, &[3, 0, 5, 1, 4, 2]);
        let config = BoardGenConfig::default();
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(11);

        flood_fill(&mut board, &config, &mut rng);

        for row in 0..6 {
            for col in 0..6 {
                assert_ne!(board.cell(row, col).color(), 0, "({row},{col}) left uncolored");
            }
        }
    }
}

//! Frontier-based enumeration of complete permutations, column by column.
//!
//! Mirrors the original engine's `QueensPermutations_Generate`: start with a
//! single empty partial, and for each column try every row, keeping an
//! extension iff it doesn't reuse a row already in the partial and isn't a
//! king-step diagonal away from the previous column's row. Non-adjacent
//! columns never need checking under this weaker attack rule.

#[cfg(feature = "tracing")]
use tracing::trace;

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

/// Enumerate all complete permutations for board size `n`.
///
/// Returns a flat `Vec<u8>` of length `k * n`, where the `i`-th permutation
/// occupies `rows[i * n .. (i + 1) * n]` and `rows[i * n + c]` is the row of
/// the queen placed in column `c`.
pub fn enumerate(n: u8) -> Vec<u8> {
    let n_usize = n as usize;

    // `used` tracks which rows are already taken in each partial, as a
    // bitmask (n <= 15 fits comfortably in a u16).
    let mut frontier: Vec<(Vec<u8>, u16)> = vec![(Vec::new(), 0u16)];

    for col in 0..n_usize {
        let mut next = Vec::new();
        for (partial, used) in &frontier {
            let prev_row = partial.last().copied();
            for row in 0..n {
                if used & (1 << row) != 0 {
                    continue;
                }
                if let Some(prev) = prev_row
                    && prev.abs_diff(row) == 1
                {
                    continue;
                }
                let mut extended = partial.clone();
                extended.push(row);
                next.push((extended, used | (1 << row)));
            }
        }
        trace!(col, candidates = next.len(), "perm.frontier_advanced");
        frontier = next;
    }

    let mut out = Vec::with_capacity(frontier.len() * n_usize);
    for (perm, _) in frontier {
        out.extend_from_slice(&perm);
    }
    out
}

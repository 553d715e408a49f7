/// Flood-fill probabilities and retry budget, explicit and caller-owned.
///
/// Replaces the original's process-wide config object (see the redesign
/// note in the board model) with a value threaded into [`crate::generate`].
/// Percentages are integers in `0..=100`, compared against a `0..100`
/// uniform draw exactly like the source's `RNG_RandomRange_u32(0, 100) <
/// chance` checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGenConfig {
    /// Chance a zero-colored cell is skipped entirely this flood-fill pass.
    pub cell_skip_chance: u8,
    /// Chance a cell restricts its neighbor search to left/right.
    pub only_horizontal_neighbor_chance: u8,
    /// Chance (when not horizontal-only) a cell restricts its search to up/down.
    pub only_vertical_neighbor_chance: u8,
    /// Chance any individual candidate neighbor is skipped.
    pub neighbor_skip_chance: u8,
    /// Upper bound on acceptance-loop retries before giving up.
    pub max_attempts: u32,
}

impl BoardGenConfig {
    pub fn new(
        cell_skip_chance: u8,
        only_horizontal_neighbor_chance: u8,
        only_vertical_neighbor_chance: u8,
        neighbor_skip_chance: u8,
        max_attempts: u32,
    ) -> Self {
        BoardGenConfig {
            cell_skip_chance,
            only_horizontal_neighbor_chance,
            only_vertical_neighbor_chance,
            neighbor_skip_chance,
            max_attempts,
        }
    }
}

impl Default for BoardGenConfig {
    /// Tuned so the flood fill converges in a handful of passes and the
    /// uniqueness oracle accepts within a few hundred attempts at N=15.
    fn default() -> Self {
        BoardGenConfig {
            cell_skip_chance: 15,
            only_horizontal_neighbor_chance: 30,
            only_vertical_neighbor_chance: 30,
            neighbor_skip_chance: 10,
            max_attempts: 10_000,
        }
    }
}

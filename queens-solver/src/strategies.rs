//! The twelve-strategy deduction ladder, one function per rule.
//!
//! Every strategy mutates `board` in place and is safe to call repeatedly:
//! once it has nothing left to do, calling it again is a no-op. The
//! dispatcher in `lib.rs` decides whether a given call "fired" by comparing
//! the board before and after, exactly like the original strategy-function
//! table it's modeled on.

use queens_core::Board;

fn color_count(size: u8) -> usize {
    size as usize + 1
}

/// 1. Invalid-queen sanity: a player-placed queen that the solution doesn't
/// back is a mistake. Only runs once any solution-queen bit is present
/// anywhere on the board.
pub(crate) fn invalid_queen(board: &mut Board) {
    let n = board.size();
    let solution_known = (0..n).any(|r| (0..n).any(|c| board.cell(r, c).has_solution_queen()));
    if !solution_known {
        return;
    }

    for row in 0..n {
        for col in 0..n {
            let cell = board.cell(row, col);
            if cell.has_player_queen() && !cell.has_solution_queen() {
                board.cell_mut(row, col).set_player_queen(false);
                return;
            }
        }
    }
}

/// 2. Invalid-elimination sanity: the known solution queen was eliminated
/// by an earlier (wrong) deduction.
pub(crate) fn invalid_elimination(board: &mut Board) {
    let n = board.size();
    for row in 0..n {
        for col in 0..n {
            let cell = board.cell(row, col);
            if cell.has_solution_queen() && cell.is_eliminated() {
                board.cell_mut(row, col).set_eliminated(false);
                return;
            }
        }
    }
}

/// 3. Every placed queen's row, column, and king-step diagonals are dead
/// ground for every other queen.
pub(crate) fn eliminate_queen_surrounding(board: &mut Board) {
    let n = board.size();
    for row in 0..n {
        for col in 0..n {
            if board.cell(row, col).has_player_queen() {
                for i in 0..n {
                    board.cell_mut(row, i).set_eliminated(true);
                    board.cell_mut(i, col).set_eliminated(true);
                }
                for (nr, nc) in board.diagonal_neighbors(row, col) {
                    board.cell_mut(nr, nc).set_eliminated(true);
                }
            }
        }
    }
}

/// 4. Every placed queen's color is spent everywhere else on the board.
pub(crate) fn eliminate_leftover_colors(board: &mut Board) {
    let n = board.size();
    for row in 0..n {
        for col in 0..n {
            if board.cell(row, col).has_player_queen() {
                let color = board.cell(row, col).color();
                for i in 0..n {
                    for j in 0..n {
                        if board.cell(i, j).color() == color {
                            board.cell_mut(i, j).set_eliminated(true);
                        }
                    }
                }
            }
        }
    }
}

/// 5. A row (then column) down to its last open cell must host its queen
/// there.
pub(crate) fn last_free_row_or_column(board: &mut Board) {
    let n = board.size();

    for row in 0..n {
        let mut empty_count = 0u8;
        let mut last_free_col = 0u8;
        for col in 0..n {
            if board.cell(row, col).empty_for_solver() {
                empty_count += 1;
                last_free_col = col;
            }
        }
        if empty_count == 1 {
            board.cell_mut(row, last_free_col).set_player_queen(true);
            return;
        }
    }

    for col in 0..n {
        let mut empty_count = 0u8;
        let mut last_free_row = 0u8;
        for row in 0..n {
            if board.cell(row, col).empty_for_solver() {
                empty_count += 1;
                last_free_row = row;
            }
        }
        if empty_count == 1 {
            board.cell_mut(last_free_row, col).set_player_queen(true);
            return;
        }
    }
}

/// 6. A color down to its last open cell, with no queen placed yet, must
/// have its queen there.
pub(crate) fn only_color_remaining(board: &mut Board) {
    let n = board.size();
    let mut open = vec![0u32; color_count(n)];
    let mut placed = vec![0u32; color_count(n)];

    for row in 0..n {
        for col in 0..n {
            let cell = board.cell(row, col);
            let color = cell.color() as usize;
            if cell.empty_for_solver() {
                open[color] += 1;
            }
            if cell.has_player_queen() {
                placed[color] += 1;
            }
        }
    }

    for color in 1..=n as usize {
        if open[color] == 1 && placed[color] == 0 {
            for row in 0..n {
                for col in 0..n {
                    let cell = board.cell(row, col);
                    if cell.color() as usize == color && cell.empty_for_solver() {
                        board.cell_mut(row, col).set_player_queen(true);
                        return;
                    }
                }
            }
        }
    }
}

/// 7. A color confined to a single row (then column) locks out every other
/// color in that row (column).
pub(crate) fn region_confined_to_row_or_column(board: &mut Board) {
    let n = board.size();

    for row in 0..n {
        let mut in_row = vec![0u32; color_count(n)];
        for col in 0..n {
            let cell = board.cell(row, col);
            if cell.empty_for_solver() {
                in_row[cell.color() as usize] += 1;
            }
        }

        for color in 1..=n as usize {
            if in_row[color] <= 1 {
                continue;
            }

            let found_elsewhere = (0..n).filter(|&r| r != row).any(|r| {
                (0..n).any(|c| {
                    let cell = board.cell(r, c);
                    cell.empty_for_solver() && cell.color() as usize == color
                })
            });

            if !found_elsewhere {
                for col in 0..n {
                    if board.cell(row, col).color() as usize != color {
                        board.cell_mut(row, col).set_eliminated(true);
                    }
                }
                return;
            }
        }
    }

    for col in 0..n {
        let mut in_col = vec![0u32; color_count(n)];
        for row in 0..n {
            let cell = board.cell(row, col);
            if cell.empty_for_solver() {
                in_col[cell.color() as usize] += 1;
            }
        }

        for color in 1..=n as usize {
            if in_col[color] <= 1 {
                continue;
            }

            let found_elsewhere = (0..n).filter(|&c| c != col).any(|c| {
                (0..n).any(|r| {
                    let cell = board.cell(r, c);
                    cell.empty_for_solver() && cell.color() as usize == color
                })
            });

            if !found_elsewhere {
                for row in 0..n {
                    if board.cell(row, col).color() as usize != color {
                        board.cell_mut(row, col).set_eliminated(true);
                    }
                }
                return;
            }
        }
    }
}

/// 8. A row (then column) with open cells of only one color must place
/// that color's queen there, so the color is spent everywhere else.
pub(crate) fn single_color_fills_row_or_column(board: &mut Board) {
    let n = board.size();

    for row in 0..n {
        if let Some(color) = sole_open_color_in(board, row, n, true) {
            for other_row in (0..n).filter(|&r| r != row) {
                for col in 0..n {
                    let cell = board.cell(other_row, col);
                    if cell.empty_for_solver() && cell.color() as usize == color {
                        board.cell_mut(other_row, col).set_eliminated(true);
                    }
                }
            }
            return;
        }
    }

    for col in 0..n {
        if let Some(color) = sole_open_color_in(board, col, n, false) {
            for other_col in (0..n).filter(|&c| c != col) {
                for row in 0..n {
                    let cell = board.cell(row, other_col);
                    if cell.empty_for_solver() && cell.color() as usize == color {
                        board.cell_mut(row, other_col).set_eliminated(true);
                    }
                }
            }
            return;
        }
    }
}

fn sole_open_color_in(board: &Board, line: u8, n: u8, is_row: bool) -> Option<usize> {
    let mut present = vec![false; color_count(n)];
    for i in 0..n {
        let cell = if is_row { board.cell(line, i) } else { board.cell(i, line) };
        if cell.empty_for_solver() {
            present[cell.color() as usize] = true;
        }
    }

    let mut found = None;
    for color in 1..=n as usize {
        if present[color] {
            if found.is_some() {
                return None;
            }
            found = Some(color);
        }
    }
    found
}

fn place_queen_with_elimination(board: &mut Board, row: u8, col: u8) {
    board.cell_mut(row, col).set_player_queen(true);
    let n = board.size();
    for i in 0..n {
        board.cell_mut(row, i).set_eliminated(true);
        board.cell_mut(i, col).set_eliminated(true);
    }
    for (nr, nc) in board.diagonal_neighbors(row, col) {
        board.cell_mut(nr, nc).set_eliminated(true);
    }
}

/// 9. If placing a queen on an empty cell would eliminate the rest of its
/// row or column outright, the cell itself can never host the queen.
pub(crate) fn placement_empties_row_or_column(board: &mut Board) {
    let n = board.size();
    let mut scratch = board.clone();

    for row in 0..n {
        for col in 0..n {
            if !board.cell(row, col).empty_for_solver() {
                continue;
            }

            scratch.copy_from(board);
            place_queen_with_elimination(&mut scratch, row, col);

            let row_eliminated = (0..n).filter(|&i| scratch.cell(row, i).is_eliminated()).count();
            if row_eliminated as u8 == n - 1 {
                board.cell_mut(row, col).set_eliminated(true);
                continue;
            }

            let col_eliminated = (0..n).filter(|&i| scratch.cell(i, col).is_eliminated()).count();
            if col_eliminated as u8 == n - 1 {
                board.cell_mut(row, col).set_eliminated(true);
            }
        }
    }
}

const CUSTOM_WINDOW_PATTERNS: [[bool; 4]; 5] = [
    [true, false, true, false],
    [false, true, false, true],
    [true, false, false, true],
    [true, false, true, true],
    [true, true, false, true],
];

/// 10. N color regions confined to N rows (or columns) force every queen of
/// those colors into that band, clearing the colors everywhere outside it
/// -- or, dually, clear other colors trapped inside a band that some set of
/// colors never leaves.
pub(crate) fn n_regions_in_n_lines(board: &mut Board) {
    let n = board.size();
    let n_usize = n as usize;

    // colors_in_row[row][color] / colors_in_column[col][color]
    let mut colors_in_row = vec![vec![false; color_count(n)]; n_usize];
    let mut colors_in_col = vec![vec![false; color_count(n)]; n_usize];
    for row in 0..n {
        for col in 0..n {
            let cell = board.cell(row, col);
            if cell.empty_for_solver() {
                colors_in_row[row as usize][cell.color() as usize] = true;
                colors_in_col[col as usize][cell.color() as usize] = true;
            }
        }
    }

    let mut try_window = |window: &[bool]| -> bool {
        let rc_count = window.iter().filter(|&&b| b).count();
        if rc_count == 0 {
            return false;
        }

        let mut colors_in_window_row = vec![false; color_count(n)];
        let mut colors_in_window_col = vec![false; color_count(n)];
        for rc in 0..n_usize {
            if !window[rc] {
                continue;
            }
            for color in 1..=n as usize {
                if colors_in_row[rc][color] {
                    colors_in_window_row[color] = true;
                }
                if colors_in_col[rc][color] {
                    colors_in_window_col[color] = true;
                }
            }
        }
        let window_row_color_count = colors_in_window_row.iter().filter(|&&b| b).count();
        let window_col_color_count = colors_in_window_col.iter().filter(|&&b| b).count();

        if window_col_color_count == rc_count {
            let window_col_has_queen = (0..n_usize)
                .filter(|&c| window[c])
                .any(|c| (0..n).any(|r| board.cell(r, c as u8).has_player_queen()));
            if window_col_has_queen {
                return false;
            }
            let mut changed = false;
            for col in 0..n_usize {
                if window[col] {
                    continue;
                }
                for row in 0..n {
                    let cell = board.cell(row, col as u8);
                    if cell.empty_for_solver() && colors_in_window_col[cell.color() as usize] {
                        board.cell_mut(row, col as u8).set_eliminated(true);
                        changed = true;
                    }
                }
            }
            return changed;
        }

        if window_row_color_count == rc_count {
            let window_row_has_queen = (0..n_usize)
                .filter(|&r| window[r])
                .any(|r| (0..n).any(|c| board.cell(r as u8, c).has_player_queen()));
            if window_row_has_queen {
                return false;
            }
            let mut changed = false;
            for row in 0..n_usize {
                if window[row] {
                    continue;
                }
                for col in 0..n {
                    let cell = board.cell(row as u8, col);
                    if cell.empty_for_solver() && colors_in_window_row[cell.color() as usize] {
                        board.cell_mut(row as u8, col).set_eliminated(true);
                        changed = true;
                    }
                }
            }
            return changed;
        }

        // Dual direction: colors confined *inside* the window eliminate the
        // other colors that also live inside it.
        let mut colors_outside_window_row = vec![false; color_count(n)];
        let mut colors_outside_window_col = vec![false; color_count(n)];
        let mut outside_row_count = 0usize;
        let mut outside_col_count = 0usize;
        for color in 1..=n as usize {
            if !colors_in_window_row[color] && !colors_in_window_col[color] {
                continue;
            }
            for rc in 0..n_usize {
                if window[rc] {
                    continue;
                }
                if colors_in_row[rc][color] {
                    colors_outside_window_row[color] = true;
                }
                if colors_in_col[rc][color] {
                    colors_outside_window_col[color] = true;
                }
            }
        }
        outside_row_count += colors_outside_window_row.iter().filter(|&&b| b).count();
        outside_col_count += colors_outside_window_col.iter().filter(|&&b| b).count();

        if outside_row_count == n_usize - rc_count {
            let mut changed = false;
            for row in 0..n_usize {
                if !window[row] {
                    continue;
                }
                for col in 0..n {
                    let cell = board.cell(row as u8, col);
                    if cell.empty_for_solver() && colors_outside_window_row[cell.color() as usize] {
                        board.cell_mut(row as u8, col).set_eliminated(true);
                        changed = true;
                    }
                }
            }
            return changed;
        }

        if outside_col_count == n_usize - rc_count {
            let mut changed = false;
            for col in 0..n_usize {
                if !window[col] {
                    continue;
                }
                for row in 0..n {
                    let cell = board.cell(row, col as u8);
                    if cell.empty_for_solver() && colors_outside_window_col[cell.color() as usize] {
                        board.cell_mut(row, col as u8).set_eliminated(true);
                        changed = true;
                    }
                }
            }
            return changed;
        }

        false
    };

    let max_window = n_usize.div_ceil(2);
    for window_size in 2..=max_window {
        for start in 0..=(n_usize - window_size) {
            let mut window = vec![false; n_usize];
            window[start..start + window_size].fill(true);
            if try_window(&window) {
                return;
            }
        }
    }

    for pattern in CUSTOM_WINDOW_PATTERNS {
        for offset in 0..=(n_usize - pattern.len()) {
            let mut window = vec![false; n_usize];
            window[offset..offset + pattern.len()].copy_from_slice(&pattern);
            if try_window(&window) {
                return;
            }
        }
    }
}

/// 11. If placing a queen on an empty cell, and propagating rules 3-4,
/// would drain some color to zero candidates, that cell can't be the
/// queen.
pub(crate) fn placement_eliminates_all_colors(board: &mut Board) {
    let n = board.size();
    let mut scratch = board.clone();

    for row in 0..n {
        for col in 0..n {
            if !board.cell(row, col).empty_for_solver() {
                continue;
            }

            scratch.copy_from(board);
            place_queen_with_elimination(&mut scratch, row, col);
            eliminate_leftover_colors(&mut scratch);

            let mut open = vec![0u32; color_count(n)];
            let mut placed = vec![0u32; color_count(n)];
            for i in 0..n {
                for j in 0..n {
                    let cell = scratch.cell(i, j);
                    let color = cell.color() as usize;
                    if cell.empty_for_solver() {
                        open[color] += 1;
                    }
                    if cell.has_player_queen() {
                        placed[color] += 1;
                    }
                }
            }

            if (1..=n as usize).any(|color| open[color] == 0 && placed[color] == 0) {
                board.cell_mut(row, col).set_eliminated(true);
                return;
            }
        }
    }
}

/// Neither a row/column entirely devoid of room, nor a color with no
/// remaining candidate, has occurred.
fn is_board_valid(board: &Board) -> bool {
    let n = board.size();

    for rc in 0..n {
        let row_has_queen = (0..n).any(|i| board.cell(rc, i).has_player_queen());
        let col_has_queen = (0..n).any(|i| board.cell(i, rc).has_player_queen());
        let eliminated_row = (0..n).filter(|&i| board.cell(rc, i).is_eliminated()).count();
        let eliminated_col = (0..n).filter(|&i| board.cell(i, rc).is_eliminated()).count();
        if (!row_has_queen && eliminated_row as u8 == n) || (!col_has_queen && eliminated_col as u8 == n) {
            return false;
        }
    }

    let mut viable = vec![0u32; color_count(n)];
    for row in 0..n {
        for col in 0..n {
            let cell = board.cell(row, col);
            if cell.empty_for_solver() || cell.has_player_queen() {
                viable[cell.color() as usize] += 1;
            }
        }
    }
    (1..=n as usize).all(|color| viable[color] > 0)
}

/// A color with exactly one remaining open cell, and its position.
fn last_color_cell(board: &Board) -> Option<(u8, u8)> {
    let n = board.size();
    let mut open = vec![0u32; color_count(n)];
    for row in 0..n {
        for col in 0..n {
            let cell = board.cell(row, col);
            if cell.empty_for_solver() {
                open[cell.color() as usize] += 1;
            }
        }
    }

    for color in 1..=n as usize {
        if open[color] == 1 {
            for row in 0..n {
                for col in 0..n {
                    let cell = board.cell(row, col);
                    if cell.empty_for_solver() && cell.color() as usize == color {
                        return Some((row, col));
                    }
                }
            }
        }
    }
    None
}

/// 12. Simulate each empty cell as the queen and chase the chain of
/// resulting forced placements. A chain that runs into an invalid board
/// refutes its starting cell; the cheapest single-step refutation is acted
/// on immediately, otherwise the globally cheapest refutation is applied
/// once, at the end.
pub(crate) fn forcing_sequence_refutation(board: &mut Board, start_row: u8, start_col: u8) {
    let n = board.size();
    let mut scratch = board.clone();
    let mut best: Option<(u8, u8, u32)> = None;

    for ri in 0..n {
        let row = (start_row + ri) % n;
        for ci in 0..n {
            let col = (start_col + ci) % n;
            if !board.cell(row, col).empty_for_solver() {
                continue;
            }

            scratch.copy_from(board);
            let mut dest = (row, col);
            let mut depth = 0u32;
            let refuted = loop {
                place_queen_with_elimination(&mut scratch, dest.0, dest.1);
                eliminate_leftover_colors(&mut scratch);
                depth += 1;

                if !is_board_valid(&scratch) {
                    break true;
                }
                match last_color_cell(&scratch) {
                    Some(next) => dest = next,
                    None => break false,
                }
            };

            if refuted {
                if depth == 1 {
                    board.cell_mut(row, col).set_eliminated(true);
                    return;
                }
                if best.is_none_or(|(_, _, best_depth)| depth < best_depth) {
                    best = Some((row, col, depth));
                }
            }
        }
    }

    if let Some((row, col, _)) = best {
        board.cell_mut(row, col).set_eliminated(true);
    }
}

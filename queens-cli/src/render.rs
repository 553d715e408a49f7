//! Terminal rendering: one colored glyph per cell, ANSI SGR escapes keyed
//! by color id mod 16, matching the palette the generator's own board
//! printer used.

use queens_core::Board;

const COLORS: [&str; 16] = [
    "\x1b[0m", "\x1b[31m", "\x1b[32m", "\x1b[33m", "\x1b[34m", "\x1b[35m", "\x1b[36m", "\x1b[37m",
    "\x1b[90m", "\x1b[91m", "\x1b[92m", "\x1b[93m", "\x1b[94m", "\x1b[95m", "\x1b[96m", "\x1b[97m",
];
const RESET: &str = "\x1b[0m";

/// Render `board` as one line per row: `Q` for a queen (solution or
/// player), `x` for an eliminated cell, `.` otherwise, each tinted by
/// color id.
pub fn render(board: &Board) -> String {
    let n = board.size();
    let mut out = String::new();

    for row in 0..n {
        for col in 0..n {
            let cell = board.cell(row, col);
            let color = COLORS[(cell.color() % 16) as usize];
            let glyph = if cell.has_player_queen() || cell.has_solution_queen() {
                "Q"
            } else if cell.is_eliminated() {
                "x"
            } else {
                "."
            };
            out.push_str(color);
            out.push_str(glyph);
            out.push_str(RESET);
            out.push(' ');
        }
        out.push('\n');
    }

    out
}

//! Text codec: `NN|HH,HH,...,HH` — two decimal digits for size, then one
//! two-hex-digit byte per cell in row-major order.

use crate::board::Board;
use crate::cell::Cell;
use crate::error::CoreError;
use crate::check_size;

/// Serialize a board as `NN|HH,HH,...,HH`.
///
/// ```
/// use queens_core::{Board, codec};
/// let b = Board::new(5).unwrap();
/// let s = codec::serialize(&b);
/// assert_eq!(codec::parse(&s).unwrap(), b);
/// ```
pub fn serialize(board: &Board) -> String {
    let mut out = format!("{:02}|", board.size());
    let hex_bytes: Vec<String> = board.cells().iter().map(|c| format!("{:02X}", c.to_byte())).collect();
    out.push_str(&hex_bytes.join(","));
    out
}

pub fn parse(s: &str) -> Result<Board, CoreError> {
    let (size_part, cells_part) = s
        .split_once('|')
        .ok_or_else(|| CoreError::MalformedBoardString(s.to_string()))?;

    if size_part.len() != 2 {
        return Err(CoreError::MalformedBoardString(s.to_string()));
    }
    let size: u8 = size_part
        .parse()
        .map_err(|_| CoreError::MalformedBoardString(s.to_string()))?;
    check_size(size)?;

    let area = (size as usize) * (size as usize);
    let tokens: Vec<&str> = if cells_part.is_empty() {
        Vec::new()
    } else {
        cells_part.split(',').collect()
    };

    if tokens.len() != area {
        return Err(CoreError::CellCountMismatch {
            expected: area,
            found: tokens.len(),
        });
    }

    let mut board = Board::new(size)?;
    for (idx, token) in tokens.iter().enumerate() {
        if token.len() != 2 {
            return Err(CoreError::InvalidCellByte((*token).to_string()));
        }
        let byte = u8::from_str_radix(token, 16)
            .map_err(|_| CoreError::InvalidCellByte((*token).to_string()))?;
        let row = (idx / size as usize) as u8;
        let col = (idx % size as usize) as u8;
        board.set_cell(row, col, Cell::from_byte(byte));
    }

    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_exact() {
        let mut b = Board::new(5).unwrap();
        b.cell_mut(1, 1).set_color(3);
        b.cell_mut(2, 3).set_player_queen(true);
        let s = serialize(&b);
        let back = parse(&s).unwrap();
        assert_eq!(b, back);
    }

    #[test]
    fn rejects_cell_count_mismatch() {
        let err = parse("05|11,02,03").unwrap_err();
        assert!(matches!(err, CoreError::CellCountMismatch { .. }));
    }

    #[test]
    fn rejects_invalid_size() {
        let err = parse("04|").unwrap_err();
        assert!(matches!(err, CoreError::InvalidGridSize(4)));
    }

    #[test]
    fn spec_literal_round_trip() {
        let s = "05|11,02,03,04,05,06,17,08,09,0A,0B,0C,1D,0E,0F,10,11,12,03,14,15,16,17,08,19";
        let b = parse(s).unwrap();
        assert_eq!(serialize(&b), s);
    }
}

use crate::cell::Cell;
use crate::error::CoreError;
use crate::{check_size, king_adjacent};

/// Row-major `N x N` board of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: u8) -> Result<Board, CoreError> {
        check_size(size)?;
        let area = (size as usize) * (size as usize);
        Ok(Board {
            size,
            cells: vec![Cell::EMPTY; area],
        })
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, row: u8, col: u8) -> usize {
        debug_assert!(row < self.size && col < self.size);
        (row as usize) * (self.size as usize) + (col as usize)
    }

    pub fn cell(&self, row: u8, col: u8) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn cell_mut(&mut self, row: u8, col: u8) -> &mut Cell {
        let idx = self.index(row, col);
        &mut self.cells[idx]
    }

    pub fn set_cell(&mut self, row: u8, col: u8, cell: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    /// Reset every cell to [`Cell::EMPTY`] without reallocating.
    pub fn zero(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Deep-copy `src` into `self`, reusing `self`'s existing allocation when
    /// the sizes already match (no-op heap churn for same-size scratch boards
    /// reused across solver calls).
    pub fn copy_from(&mut self, src: &Board) {
        if self.size != src.size {
            self.size = src.size;
            self.cells.resize(src.cells.len(), Cell::EMPTY);
        }
        self.cells.copy_from_slice(&src.cells);
    }

    /// Row-major iterator over `(row, col, cell)`.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u8, u8, Cell)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &cell)| ((idx / size as usize) as u8, (idx % size as usize) as u8, cell))
    }

    /// In-bounds king-step diagonal neighbors of `(row, col)`, in the fixed
    /// order up, down, left, right as used by the strategy ladder.
    pub fn orthogonal_neighbors(&self, row: u8, col: u8) -> smallvec::SmallVec<[(u8, u8); 4]> {
        let mut out = smallvec::SmallVec::new();
        if row > 0 {
            out.push((row - 1, col));
        }
        if row + 1 < self.size {
            out.push((row + 1, col));
        }
        if col > 0 {
            out.push((row, col - 1));
        }
        if col + 1 < self.size {
            out.push((row, col + 1));
        }
        out
    }

    /// In-bounds king-step diagonal neighbors of `(row, col)` (up to 4).
    pub fn diagonal_neighbors(&self, row: u8, col: u8) -> smallvec::SmallVec<[(u8, u8); 4]> {
        let mut out = smallvec::SmallVec::new();
        for (dr, dc) in [(-1i8, -1i8), (-1, 1), (1, -1), (1, 1)] {
            let nr = row as i8 + dr;
            let nc = col as i8 + dc;
            if nr >= 0 && nc >= 0 && (nr as u8) < self.size && (nc as u8) < self.size {
                out.push((nr as u8, nc as u8));
            }
        }
        out
    }

    pub fn is_king_adjacent(&self, r1: u8, c1: u8, r2: u8, c2: u8) -> bool {
        king_adjacent(r1, c1, r2, c2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_sizes() {
        assert!(matches!(Board::new(4), Err(CoreError::InvalidGridSize(4))));
        assert!(matches!(Board::new(16), Err(CoreError::InvalidGridSize(16))));
        assert!(Board::new(5).is_ok());
        assert!(Board::new(15).is_ok());
    }

    #[test]
    fn copy_from_reuses_allocation_on_matching_size() {
        let mut dst = Board::new(5).unwrap();
        let mut src = Board::new(5).unwrap();
        src.cell_mut(2, 2).set_player_queen(true);
        let cap_before = dst.cells.capacity();
        dst.copy_from(&src);
        assert_eq!(dst.cells.capacity(), cap_before);
        assert!(dst.cell(2, 2).has_player_queen());
    }

    #[test]
    fn orthogonal_neighbors_respect_bounds() {
        let b = Board::new(5).unwrap();
        assert_eq!(b.orthogonal_neighbors(0, 0).len(), 2);
        assert_eq!(b.orthogonal_neighbors(2, 2).len(), 4);
    }

    #[test]
    fn diagonal_neighbors_match_corner_case() {
        let b = Board::new(5).unwrap();
        let mut neighbors: Vec<_> = b.diagonal_neighbors(2, 2).into_iter().collect();
        neighbors.sort();
        assert_eq!(neighbors, vec![(1, 1), (1, 3), (3, 1), (3, 3)]);
    }
}

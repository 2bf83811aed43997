//! Fixed-size rectangular board.

use crate::types::{Cell, Move};
use serde::{Deserialize, Serialize};

/// Glyphs used when a board is rendered as text, indexed by player.
const MARKS: &[u8] = b"XOABCDEFGHIJKLMNPQRSTUVWYZ";

/// Returns the text glyph for a player index.
///
/// Players beyond the glyph table reuse glyphs; text rendering is only a
/// convenience and never consulted by the rules.
pub fn mark(player: usize) -> char {
    MARKS[player % MARKS.len()] as char
}

/// An m x n grid of cells stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![Cell::Empty; rows * columns],
        }
    }

    /// Number of rows (m).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (n).
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Checks if the move lies on the board.
    pub fn contains(&self, mv: Move) -> bool {
        mv.row < self.rows && mv.column < self.columns
    }

    /// Gets the cell at a square, or `None` when off the board.
    pub fn get(&self, mv: Move) -> Option<Cell> {
        if !self.contains(mv) {
            return None;
        }
        self.cells.get(self.offset(mv)).copied()
    }

    /// Gets the cell at signed coordinates, treating anything off the board as `None`.
    pub(crate) fn get_signed(&self, row: isize, column: isize) -> Option<Cell> {
        if row < 0 || column < 0 {
            return None;
        }
        self.get(Move::new(row as usize, column as usize))
    }

    /// Checks if the square is on the board and empty.
    pub fn is_empty(&self, mv: Move) -> bool {
        matches!(self.get(mv), Some(Cell::Empty))
    }

    /// Claims a square for a player.
    ///
    /// Callers check legality first; this never overwrites an occupied cell.
    pub(crate) fn place(&mut self, mv: Move, player: usize) {
        debug_assert!(self.is_empty(mv), "placing on unavailable square {mv}");
        let offset = self.offset(mv);
        self.cells[offset] = Cell::Occupied(player);
    }

    /// Empties every cell.
    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Returns one row of cells.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over the empty squares in row-major order.
    pub fn empty_squares(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(offset, _)| Move::new(offset / self.columns, offset % self.columns))
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    fn offset(&self, mv: Move) -> usize {
        mv.row * self.columns + mv.column
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for (column, cell) in self.row(row).iter().enumerate() {
                if column > 0 {
                    f.write_str("|")?;
                }
                match cell {
                    Cell::Empty => f.write_str(".")?,
                    Cell::Occupied(player) => write!(f, "{}", mark(*player))?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(2, 3);
        assert_eq!(board.empty_squares().count(), 6);
        assert!(!board.is_full());
        assert_eq!(board.occupied(), 0);
    }

    #[test]
    fn test_out_of_bounds_is_not_empty() {
        let board = Board::new(2, 3);
        assert!(!board.is_empty(Move::new(2, 0)));
        assert!(!board.is_empty(Move::new(0, 3)));
        assert_eq!(board.get_signed(-1, 0), None);
    }

    #[test]
    fn test_empty_squares_row_major() {
        let mut board = Board::new(2, 2);
        board.place(Move::new(0, 1), 0);
        let empty: Vec<_> = board.empty_squares().collect();
        assert_eq!(empty, vec![Move::new(0, 0), Move::new(1, 0), Move::new(1, 1)]);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(2, 2);
        board.place(Move::new(0, 0), 0);
        board.place(Move::new(1, 1), 1);
        assert_eq!(board.to_string(), "X|.\n.|O");
    }
}

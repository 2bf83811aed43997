//! Win detection logic for m,n,k-games.
//!
//! Two strategies with the same result on any position reached through legal
//! play: [`scan_board`] walks every occupied cell and is the reference;
//! [`winner_through`] only inspects the lines through the last placed cell.

use crate::board::Board;
use crate::types::{Cell, Move};
use tracing::instrument;

/// One of the four line orientations on a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
pub enum Direction {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// North-west to south-east.
    Diagonal,
    /// North-east to south-west.
    AntiDiagonal,
}

impl Direction {
    /// Row and column step for one square forward along this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// Finds a player with `k` in a row anywhere on the board.
///
/// Each occupied cell is treated as the start of a run and only extended
/// forward, so a run is found once from its first cell. Each direction stops
/// at the first empty, foreign or off-board square.
#[instrument(skip(board), fields(rows = board.rows(), columns = board.columns()))]
pub fn scan_board(board: &Board, k: usize) -> Option<usize> {
    for row in 0..board.rows() {
        for column in 0..board.columns() {
            let Some(Cell::Occupied(owner)) = board.get(Move::new(row, column)) else {
                continue;
            };
            for direction in <Direction as strum::IntoEnumIterator>::iter() {
                if run_forward(board, row as isize, column as isize, direction, owner) >= k {
                    return Some(owner);
                }
            }
        }
    }
    None
}

/// Finds a `k` in a row passing through `last`.
///
/// Returns the owner of `last` when any of the four lines through it holds at
/// least `k` consecutive cells of that owner.
#[instrument(skip(board), fields(rows = board.rows(), columns = board.columns()))]
pub fn winner_through(board: &Board, last: Move, k: usize) -> Option<usize> {
    let owner = board.get(last)?.owner()?;
    let (row, column) = (last.row as isize, last.column as isize);

    for direction in <Direction as strum::IntoEnumIterator>::iter() {
        let (dr, dc) = direction.delta();
        let ahead = run_forward(board, row, column, direction, owner);
        // Step back once so the starting cell is not counted twice.
        let behind = run_backward(board, row - dr, column - dc, direction, owner);
        if ahead + behind >= k {
            return Some(owner);
        }
    }
    None
}

/// Counts consecutive cells owned by `owner`, starting at and including the given square.
fn run_forward(board: &Board, row: isize, column: isize, direction: Direction, owner: usize) -> usize {
    let (dr, dc) = direction.delta();
    let mut count = 0;
    let (mut r, mut c) = (row, column);
    while board.get_signed(r, c) == Some(Cell::Occupied(owner)) {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

fn run_backward(board: &Board, row: isize, column: isize, direction: Direction, owner: usize) -> usize {
    let (dr, dc) = direction.delta();
    let mut count = 0;
    let (mut r, mut c) = (row, column);
    while board.get_signed(r, c) == Some(Cell::Occupied(owner)) {
        count += 1;
        r -= dr;
        c -= dc;
    }
    count
}

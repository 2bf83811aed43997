//! Core value types for m,n,k-games.

use crate::error::MnkError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: the zero-based square a player wants to claim.
///
/// A move carries no validity of its own; whether it is legal depends on
/// the [`MnkGame`](crate::MnkGame) it is submitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub column: usize,
}

impl Move {
    /// Creates a new move.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A square on the board.
///
/// Pieces of one player are indistinguishable, so an occupied cell is just
/// the zero-based index of its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Claimed by the player with this index.
    Occupied(usize),
}

impl Cell {
    /// Returns the owning player, if any.
    pub fn owner(self) -> Option<usize> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }

    /// Checks if the cell is empty.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Per-square confidence values a strategy may report next to its move.
///
/// Only consumed by diagnostic views; the rules never read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveProbabilities {
    rows: usize,
    columns: usize,
    values: Vec<f32>,
}

impl MoveProbabilities {
    /// Creates a grid from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`MnkError::InvalidArgument`] if `values` does not hold exactly
    /// `rows * columns` entries.
    #[instrument(skip(values), fields(len = values.len()))]
    pub fn new(rows: usize, columns: usize, values: Vec<f32>) -> Result<Self, MnkError> {
        if values.len() != rows * columns {
            return Err(MnkError::InvalidArgument(format!(
                "expected {} probabilities for a {}x{} board, got {}",
                rows * columns,
                rows,
                columns,
                values.len()
            )));
        }
        Ok(Self {
            rows,
            columns,
            values,
        })
    }

    /// Spreads probability evenly over the given moves; everything else is zero.
    pub fn uniform(rows: usize, columns: usize, moves: &[Move]) -> Self {
        let mut values = vec![0.0; rows * columns];
        if !moves.is_empty() {
            let share = 1.0 / moves.len() as f32;
            for mv in moves.iter().filter(|mv| mv.row < rows && mv.column < columns) {
                values[mv.row * columns + mv.column] = share;
            }
        }
        Self {
            rows,
            columns,
            values,
        }
    }

    /// Returns the value for a square, or `None` when out of range.
    pub fn get(&self, row: usize, column: usize) -> Option<f32> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.values.get(row * self.columns + column).copied()
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The player got k in a row.
    Won(usize),
    /// The player submitted an illegal move and forfeited.
    IllegalMove(usize),
    /// Nobody can move any more.
    Draw,
}

impl Outcome {
    /// Returns the winner, if the game was won.
    pub fn winner(self) -> Option<usize> {
        match self {
            Outcome::Won(player) => Some(player),
            _ => None,
        }
    }

    /// Returns the player that forfeited by an illegal move.
    pub fn illegal_mover(self) -> Option<usize> {
        match self {
            Outcome::IllegalMove(player) => Some(player),
            _ => None,
        }
    }
}

/// Where a game currently stands.
///
/// A single enum keeps "winner", "illegal mover" and "draw" mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The game is still running and `current` moves next.
    InProgress {
        /// Index of the player to move.
        current: usize,
    },
    /// The game ended.
    Over(Outcome),
}

impl Status {
    /// Checks if the game has ended.
    pub fn is_over(self) -> bool {
        matches!(self, Status::Over(_))
    }

    /// Returns the outcome of a finished game.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Status::InProgress { .. } => None,
            Status::Over(outcome) => Some(outcome),
        }
    }
}

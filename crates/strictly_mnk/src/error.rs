//! Errors raised by the m,n,k state machine.

/// Error returned when the state machine is used incorrectly.
///
/// None of these describe a player mistake: an illegal move is a normal
/// outcome recorded on the game, not an error.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MnkError {
    /// A constructor argument was out of range.
    #[display("Invalid argument: {}", _0)]
    InvalidArgument(#[error(not(source))] String),

    /// A query or move was attempted after the game ended.
    #[display("Game is already over")]
    GameOver,

    /// Move probabilities do not match the board geometry.
    #[display(
        "Move probabilities are {}x{}, board is {}x{}",
        rows,
        columns,
        board_rows,
        board_columns
    )]
    ProbabilityShape {
        /// Rows in the submitted grid.
        rows: usize,
        /// Columns in the submitted grid.
        columns: usize,
        /// Rows on the board.
        board_rows: usize,
        /// Columns on the board.
        board_columns: usize,
    },

    /// The operation is not available for this game.
    #[display("{} is not supported", _0)]
    Unsupported(#[error(not(source))] &'static str),
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_errors_are_std_errors_without_source() {
        let errors = [
            MnkError::InvalidArgument("rows must be at least 1".to_string()),
            MnkError::GameOver,
            MnkError::ProbabilityShape {
                rows: 2,
                columns: 2,
                board_rows: 3,
                board_columns: 3,
            },
            MnkError::Unsupported("undo_move"),
        ];
        for err in errors {
            let dynamic: Box<dyn Error + Send + Sync> = Box::new(err.clone());
            assert!(dynamic.source().is_none());
            assert_eq!(dynamic.to_string(), err.to_string());
        }
        assert_eq!(
            MnkError::Unsupported("undo_move").to_string(),
            "undo_move is not supported"
        );
    }
}

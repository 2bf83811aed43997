//! Engine error types.

use derive_more::{Display, Error};
use strictly_mnk::MnkError;
use tracing::instrument;

/// Error raised while setting up or running a game.
///
/// Illegal moves are not errors; they end the game as a normal outcome.
/// [`EngineError::Cancelled`] is an expected way for a game to stop and is
/// never treated as a failure by the scheduling harness.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// A constructor or configuration value was out of range.
    #[display("Invalid argument: {}", _0)]
    InvalidArgument(#[error(not(source))] String),

    /// An operation was called in a state that does not allow it.
    #[display("Precondition violated: {}", _0)]
    Precondition(#[error(not(source))] String),

    /// The operation or agent variant is not available.
    #[display("{} is not supported", _0)]
    Unsupported(#[error(not(source))] String),

    /// The game was cancelled cooperatively.
    #[display("Game cancelled")]
    Cancelled,

    /// Something went wrong that ends the game session.
    #[display("Fatal error: {}", _0)]
    Fatal(#[error(not(source))] String),
}

impl EngineError {
    /// Checks if this is a cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EngineError::Cancelled)
    }

    /// Creates a fatal error with caller location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn fatal(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self::Fatal(format!("{} at {}:{}", message.into(), loc.file(), loc.line()))
    }
}

impl From<MnkError> for EngineError {
    fn from(err: MnkError) -> Self {
        match err {
            MnkError::InvalidArgument(message) => EngineError::InvalidArgument(message),
            MnkError::Unsupported(operation) => EngineError::Unsupported(operation.to_string()),
            err @ (MnkError::GameOver | MnkError::ProbabilityShape { .. }) => {
                EngineError::Precondition(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_over_maps_to_precondition() {
        let err: EngineError = MnkError::GameOver.into();
        assert_eq!(err, EngineError::Precondition("Game is already over".to_string()));
    }

    #[test]
    fn test_unsupported_maps_through() {
        let err: EngineError = MnkError::Unsupported("undo_move").into();
        assert_eq!(err, EngineError::Unsupported("undo_move".to_string()));
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_fatal_records_location() {
        let line = line!() + 1;
        let err = EngineError::fatal("boom");
        let EngineError::Fatal(message) = err else {
            panic!("expected fatal error");
        };
        assert!(message.starts_with("boom at "));
        assert!(message.ends_with(&format!("error.rs:{line}")), "{message}");
    }
}

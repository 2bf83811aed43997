//! Agents that choose moves for a seat.

mod human;
mod random;
mod roster;

pub use human::{HumanAgent, HumanInput};
pub use random::RandomAgent;
pub use roster::{AgentKind, Roster};

use crate::cancel::CancelToken;
use crate::error::EngineError;
use strictly_mnk::{MnkGame, Move, MoveProbabilities};

/// Anything that can play a seat: a person at a board, or a strategy.
///
/// The engine calls [`Agent::calculate_move`] and then reads the result back
/// with [`Agent::calculated_move`]. Lifecycle notifications let learning
/// strategies update themselves; returning an error from any of them ends the
/// game session as a fatal error.
#[async_trait::async_trait]
pub trait Agent: Send {
    /// Display name.
    fn name(&self) -> &str;

    /// Human agents get unlimited retries and no pacing delay.
    fn is_human(&self) -> bool;

    /// Works out a move for the current position.
    ///
    /// May suspend (a human waiting for input) and must return
    /// [`EngineError::Cancelled`] promptly once `cancel` fires.
    async fn calculate_move(
        &mut self,
        game: &MnkGame,
        cancel: &CancelToken,
    ) -> Result<(), EngineError>;

    /// The move found by the last [`Agent::calculate_move`] this game.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Precondition`] if no move was calculated since
    /// the last [`Agent::notify_new_game`].
    fn calculated_move(&self) -> Result<Move, EngineError>;

    /// Per-square confidence behind the last move, for strategies that have one.
    fn calculated_move_probabilities(&self) -> Option<MoveProbabilities> {
        None
    }

    /// A new game is starting; forget the previous one.
    fn notify_new_game(&mut self) -> Result<(), EngineError>;

    /// This agent won.
    fn notify_won(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    /// Another agent won.
    fn notify_lost(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    /// Nobody won.
    fn notify_draw(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    /// The last calculated move was illegal; another attempt follows unless
    /// the retry budget is spent.
    fn notify_tried_illegal_move(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    /// This agent kept submitting illegal moves and forfeited.
    fn notify_made_illegal_move(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    /// Another agent forfeited by an illegal move.
    fn notify_other_player_made_illegal_move(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}

fn no_move_yet(name: &str) -> EngineError {
    EngineError::Precondition(format!("{name} has no calculated move; call calculate_move first"))
}

//! Computer agent that plays a uniformly random legal move.

use super::{Agent, no_move_yet};
use crate::cancel::CancelToken;
use crate::error::EngineError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strictly_mnk::{MnkGame, Move};
use tracing::{debug, error, instrument};

/// Picks any legal move, all equally likely.
#[derive(Debug)]
pub struct RandomAgent {
    name: String,
    rng: StdRng,
    next_move: Option<Move>,
}

impl RandomAgent {
    /// Creates an agent with a fresh seed from the thread-local generator.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_rng(&mut rand::rng()),
            next_move: None,
        }
    }

    /// Creates an agent with a fixed seed, for reproducible games.
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
            next_move: None,
        }
    }
}

#[async_trait::async_trait]
impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        false
    }

    #[instrument(skip(self, game, _cancel), fields(agent = %self.name))]
    async fn calculate_move(
        &mut self,
        game: &MnkGame,
        _cancel: &CancelToken,
    ) -> Result<(), EngineError> {
        let moves = game.legal_moves()?;
        if moves.is_empty() {
            return Err(EngineError::Precondition("no legal moves available".to_string()));
        }
        let mv = moves[self.rng.random_range(0..moves.len())];
        debug!(mv = %mv, choices = moves.len(), "Random move chosen");
        self.next_move = Some(mv);
        Ok(())
    }

    fn calculated_move(&self) -> Result<Move, EngineError> {
        self.next_move.ok_or_else(|| no_move_yet(&self.name))
    }

    fn notify_new_game(&mut self) -> Result<(), EngineError> {
        self.next_move = None;
        Ok(())
    }

    // Only ever picks from the legal moves, so being told otherwise is a bug.
    fn notify_tried_illegal_move(&mut self) -> Result<(), EngineError> {
        error!(agent = %self.name, "Random agent tried an illegal move");
        Err(EngineError::fatal(format!("{} tried an illegal move", self.name)))
    }

    fn notify_made_illegal_move(&mut self) -> Result<(), EngineError> {
        error!(agent = %self.name, "Random agent made an illegal move");
        Err(EngineError::fatal(format!("{} made an illegal move", self.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_picks_legal_moves_only() {
        let mut agent = RandomAgent::with_seed("Rex", 3);
        let mut game = MnkGame::tic_tac_toe();
        let cancel = CancelToken::new();

        while !game.is_game_over() {
            agent.calculate_move(&game, &cancel).await.unwrap();
            let mv = agent.calculated_move().unwrap();
            assert_eq!(game.is_legal_move(mv), Ok(true));
            game.try_move(mv, None).unwrap();
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_moves() {
        let game = MnkGame::new(4, 4, 3, strictly_mnk::default_player_names(2)).unwrap();
        let cancel = CancelToken::new();
        let mut a = RandomAgent::with_seed("A", 42);
        let mut b = RandomAgent::with_seed("B", 42);
        for _ in 0..10 {
            a.calculate_move(&game, &cancel).await.unwrap();
            b.calculate_move(&game, &cancel).await.unwrap();
            assert_eq!(a.calculated_move(), b.calculated_move());
        }
    }

    #[test]
    fn test_no_move_before_calculation() {
        let mut agent = RandomAgent::new("Rex");
        assert!(matches!(agent.calculated_move(), Err(EngineError::Precondition(_))));
        assert!(matches!(agent.notify_tried_illegal_move(), Err(EngineError::Fatal(_))));
    }

    #[tokio::test]
    async fn test_fresh_agents_play_differently() {
        let game = MnkGame::new(10, 10, 5, strictly_mnk::default_player_names(2)).unwrap();
        let cancel = CancelToken::new();
        let mut a = RandomAgent::new("A");
        let mut b = RandomAgent::new("B");
        let mut a_moves = Vec::new();
        let mut b_moves = Vec::new();
        for _ in 0..20 {
            a.calculate_move(&game, &cancel).await.unwrap();
            b.calculate_move(&game, &cancel).await.unwrap();
            a_moves.push(a.calculated_move().unwrap());
            b_moves.push(b.calculated_move().unwrap());
        }
        assert_ne!(a_moves, b_moves);
    }
}

//! Turn engine: drives one m,n,k-game from reset to outcome.
//!
//! The engine is the only component that knows both the game and the agents.
//! It asks the agent in the current seat for a move, retries illegal choices,
//! holds computer moves for a minimum pacing time so people can follow the
//! game, applies the move and, once the game ends, tells every agent how it
//! went. Moves are strictly serialized; the game is never touched by two
//! moves at once.

use crate::agents::Agent;
use crate::cancel::CancelToken;
use crate::error::EngineError;
use std::time::Duration;
use strictly_mnk::{MnkGame, Move, Outcome, Status};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Retry and pacing rules for computer agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_getters::Getters)]
pub struct EnginePolicy {
    /// Minimum time between asking a computer agent and applying its move.
    pacing: Duration,
    /// Attempts a computer agent gets to find a legal move before forfeiting.
    max_attempts: u32,
}

impl EnginePolicy {
    /// Default pacing for computer moves.
    pub const DEFAULT_PACING: Duration = Duration::from_millis(1000);
    /// Default retry budget for computer agents.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

    /// Creates a policy.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidArgument`] if `max_attempts` is zero.
    pub fn new(pacing: Duration, max_attempts: u32) -> Result<Self, EngineError> {
        if max_attempts == 0 {
            return Err(EngineError::InvalidArgument(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            pacing,
            max_attempts,
        })
    }

    /// Policy without pacing, for tests and headless runs.
    pub fn unpaced() -> Self {
        Self {
            pacing: Duration::ZERO,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Default for EnginePolicy {
    fn default() -> Self {
        Self {
            pacing: Self::DEFAULT_PACING,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Where the engine is within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnginePhase {
    /// No game started yet.
    #[default]
    NotStarted,
    /// Waiting for the current agent to produce a move.
    AwaitingMove,
    /// Pacing or applying the chosen move.
    ApplyingMove,
    /// The game has ended and agents were told the outcome.
    GameOver,
}

/// Drives a game between a fixed set of agents.
///
/// Not shareable: every call must come from the task that owns the engine.
/// Independent engines may run in parallel.
pub struct TurnEngine {
    game: MnkGame,
    agents: Vec<Box<dyn Agent>>,
    policy: EnginePolicy,
    phase: EnginePhase,
}

impl TurnEngine {
    /// Creates an engine with one agent per seat of `game`, in seat order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidArgument`] if `agents` is empty or does
    /// not have one agent per player.
    #[instrument(skip_all, fields(agents = agents.len(), players = game.player_count()))]
    pub fn new(
        game: MnkGame,
        agents: Vec<Box<dyn Agent>>,
        policy: EnginePolicy,
    ) -> Result<Self, EngineError> {
        if agents.is_empty() {
            return Err(EngineError::InvalidArgument("no agents given".to_string()));
        }
        if agents.len() != game.player_count() {
            return Err(EngineError::InvalidArgument(format!(
                "{} agents for {} players",
                agents.len(),
                game.player_count()
            )));
        }
        Ok(Self {
            game,
            agents,
            policy,
            phase: EnginePhase::NotStarted,
        })
    }

    /// The game being played.
    pub fn game(&self) -> &MnkGame {
        &self.game
    }

    /// Mutable access to the game, for subscribing observers between games.
    pub fn game_mut(&mut self) -> &mut MnkGame {
        &mut self.game
    }

    /// Agents in seat order.
    pub fn agents(&self) -> &[Box<dyn Agent>] {
        &self.agents
    }

    /// Retry and pacing rules.
    pub fn policy(&self) -> EnginePolicy {
        self.policy
    }

    /// Current phase.
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Resets the game and tells every agent, in seat order, that a new game starts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cancelled`] if cancellation was requested, and
    /// propagates errors from agent notifications.
    #[instrument(skip_all)]
    pub fn new_game(&mut self, cancel: &CancelToken) -> Result<(), EngineError> {
        cancel.check()?;
        self.game.reset();
        for agent in &mut self.agents {
            agent.notify_new_game()?;
        }
        self.phase = EnginePhase::AwaitingMove;
        info!(
            rows = self.game.rows(),
            columns = self.game.columns(),
            k = self.game.k(),
            "New game"
        );
        cancel.check()
    }

    /// Plays the current game until it ends and returns the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cancelled`] if cancelled; no move is half
    /// applied and no outcome is announced in that case. Any other error is
    /// fatal for the session.
    #[instrument(skip_all)]
    pub async fn play_game(&mut self, cancel: &CancelToken) -> Result<Outcome, EngineError> {
        while let Status::InProgress { current } = self.game.status() {
            cancel.check()?;
            self.phase = EnginePhase::AwaitingMove;

            let agent = &mut self.agents[current];
            let (mv, thinking) = request_move(agent.as_mut(), &self.game, self.policy, cancel).await?;

            self.phase = EnginePhase::ApplyingMove;
            if !agent.is_human() {
                pace(self.policy.pacing.saturating_sub(thinking), cancel).await?;
            }

            let probabilities = agent.calculated_move_probabilities();
            debug!(player = current, mv = %mv, "Submitting move");
            if let Status::Over(outcome) = self.game.try_move(mv, probabilities)? {
                self.phase = EnginePhase::GameOver;
                self.announce(outcome)?;
                return Ok(outcome);
            }
        }

        self.game
            .outcome()
            .ok_or_else(|| EngineError::fatal("game loop ended without an outcome"))
    }

    /// Tells every agent how the game ended.
    fn announce(&mut self, outcome: Outcome) -> Result<(), EngineError> {
        let names = self.game.player_names();
        match outcome {
            Outcome::IllegalMove(offender) => {
                info!(player = %names[offender], "Game lost by illegal move");
                for (seat, agent) in self.agents.iter_mut().enumerate() {
                    if seat == offender {
                        agent.notify_made_illegal_move()?;
                    } else {
                        agent.notify_other_player_made_illegal_move()?;
                    }
                }
            }
            Outcome::Won(winner) => {
                info!(player = %names[winner], "Game won");
                for (seat, agent) in self.agents.iter_mut().enumerate() {
                    if seat == winner {
                        agent.notify_won()?;
                    } else {
                        agent.notify_lost()?;
                    }
                }
            }
            Outcome::Draw => {
                info!("Game drawn");
                for agent in &mut self.agents {
                    agent.notify_draw()?;
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for TurnEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let agents: Vec<_> = self.agents.iter().map(|agent| agent.name()).collect();
        f.debug_struct("TurnEngine")
            .field("game", &self.game)
            .field("agents", &agents)
            .field("policy", &self.policy)
            .field("phase", &self.phase)
            .finish()
    }
}

/// Asks an agent for moves until one is legal or its attempts run out.
///
/// Returns the move to submit, which is illegal only when a computer agent
/// exhausted its budget, and the total time spent calculating.
async fn request_move(
    agent: &mut dyn Agent,
    game: &MnkGame,
    policy: EnginePolicy,
    cancel: &CancelToken,
) -> Result<(Move, Duration), EngineError> {
    let limit = (!agent.is_human()).then_some(policy.max_attempts);
    let mut attempts: u32 = 0;
    let mut thinking = Duration::ZERO;

    loop {
        let started = Instant::now();
        agent.calculate_move(game, cancel).await?;
        thinking += started.elapsed();
        cancel.check()?;

        let mv = agent.calculated_move()?;
        attempts = attempts.saturating_add(1);
        if game.is_legal_move(mv)? {
            debug!(agent = %agent.name(), mv = %mv, attempts, "Legal move found");
            return Ok((mv, thinking));
        }

        warn!(agent = %agent.name(), mv = %mv, attempts, "Illegal move attempted");
        agent.notify_tried_illegal_move()?;
        if limit.is_some_and(|limit| attempts >= limit) {
            warn!(agent = %agent.name(), attempts, "Retry budget spent; submitting illegal move");
            return Ok((mv, thinking));
        }
    }
}

/// Waits out the remaining pacing time, unless cancelled first.
async fn pace(wait: Duration, cancel: &CancelToken) -> Result<(), EngineError> {
    cancel.check()?;
    if wait.is_zero() {
        return Ok(());
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(EngineError::Cancelled),
        _ = tokio::time::sleep(wait) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::RandomAgent;
    use strictly_mnk::default_player_names;

    fn random_engine(policy: EnginePolicy) -> TurnEngine {
        let agents: Vec<Box<dyn Agent>> = vec![
            Box::new(RandomAgent::with_seed("Player 1", 1)),
            Box::new(RandomAgent::with_seed("Player 2", 2)),
        ];
        TurnEngine::new(MnkGame::tic_tac_toe(), agents, policy).unwrap()
    }

    #[test]
    fn test_policy_rejects_zero_attempts() {
        assert!(EnginePolicy::new(Duration::ZERO, 0).is_err());
        let policy = EnginePolicy::new(Duration::from_millis(5), 3).unwrap();
        assert_eq!(*policy.max_attempts(), 3);
        assert_eq!(*policy.pacing(), Duration::from_millis(5));
    }

    #[test]
    fn test_agent_count_must_match_players() {
        let game = MnkGame::new(3, 3, 3, default_player_names(3)).unwrap();
        let agents: Vec<Box<dyn Agent>> = vec![Box::new(RandomAgent::new("Solo"))];
        assert!(matches!(
            TurnEngine::new(game, agents, EnginePolicy::unpaced()),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(TurnEngine::new(MnkGame::tic_tac_toe(), Vec::new(), EnginePolicy::unpaced()).is_err());
    }

    #[tokio::test]
    async fn test_random_game_reaches_outcome() {
        let mut engine = random_engine(EnginePolicy::unpaced());
        let cancel = CancelToken::new();
        assert_eq!(engine.phase(), EnginePhase::NotStarted);

        engine.new_game(&cancel).unwrap();
        assert_eq!(engine.phase(), EnginePhase::AwaitingMove);

        let outcome = engine.play_game(&cancel).await.unwrap();
        assert_eq!(engine.phase(), EnginePhase::GameOver);
        assert_eq!(engine.game().outcome(), Some(outcome));
        assert!(!matches!(outcome, Outcome::IllegalMove(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_computer_moves_are_paced() {
        let pacing = Duration::from_millis(250);
        let mut engine = random_engine(EnginePolicy::new(pacing, 10).unwrap());
        let cancel = CancelToken::new();
        engine.new_game(&cancel).unwrap();

        let started = Instant::now();
        engine.play_game(&cancel).await.unwrap();
        let moves = engine.game().history().len() as u32;
        assert!(started.elapsed() >= pacing * moves);
    }

    #[tokio::test]
    async fn test_new_game_honours_cancel() {
        let mut engine = random_engine(EnginePolicy::unpaced());
        let cancel = CancelToken::new();
        cancel.cancel();
        assert_eq!(engine.new_game(&cancel), Err(EngineError::Cancelled));
        assert_eq!(engine.phase(), EnginePhase::NotStarted);
    }
}

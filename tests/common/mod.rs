//! Scripted agent shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;
use strictly_mnk::{MnkGame, Move, MoveProbabilities};
use strictly_turns::{Agent, CancelToken, EngineError};

/// Shared record of every call made on the scripted agents of one game.
pub type Log = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn count(log: &Log, entry: &str) -> usize {
    log.lock().unwrap().iter().filter(|e| *e == entry).count()
}

/// Plays a fixed list of moves, repeating the last one once it runs out.
pub struct ScriptedAgent {
    name: String,
    human: bool,
    moves: Vec<Move>,
    cursor: usize,
    next_move: Option<Move>,
    thinking: Duration,
    probabilities: Option<MoveProbabilities>,
    fail_on_new_game: Option<usize>,
    new_games: usize,
    log: Log,
}

impl ScriptedAgent {
    pub fn new(name: &str, moves: &[(usize, usize)], log: &Log) -> Self {
        Self {
            name: name.to_string(),
            human: false,
            moves: moves.iter().map(|&(row, column)| Move::new(row, column)).collect(),
            cursor: 0,
            next_move: None,
            thinking: Duration::ZERO,
            probabilities: None,
            fail_on_new_game: None,
            new_games: 0,
            log: Arc::clone(log),
        }
    }

    pub fn human(mut self) -> Self {
        self.human = true;
        self
    }

    pub fn thinking(mut self, thinking: Duration) -> Self {
        self.thinking = thinking;
        self
    }

    pub fn probabilities(mut self, probabilities: MoveProbabilities) -> Self {
        self.probabilities = Some(probabilities);
        self
    }

    /// Fails the given new-game notification (1-based).
    pub fn fail_on_new_game(mut self, game: usize) -> Self {
        self.fail_on_new_game = Some(game);
        self
    }

    pub fn boxed(self) -> Box<dyn Agent> {
        Box::new(self)
    }

    fn record(&self, event: &str) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, event));
    }
}

#[async_trait::async_trait]
impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        self.human
    }

    async fn calculate_move(
        &mut self,
        _game: &MnkGame,
        cancel: &CancelToken,
    ) -> Result<(), EngineError> {
        if !self.thinking.is_zero() {
            tokio::select! {
                _ = cancel.cancelled() => return Err(EngineError::Cancelled),
                _ = tokio::time::sleep(self.thinking) => {}
            }
        }
        let index = self.cursor.min(self.moves.len() - 1);
        self.cursor += 1;
        self.next_move = Some(self.moves[index]);
        self.record("calculate");
        Ok(())
    }

    fn calculated_move(&self) -> Result<Move, EngineError> {
        self.next_move
            .ok_or_else(|| EngineError::Precondition("no move yet".to_string()))
    }

    fn calculated_move_probabilities(&self) -> Option<MoveProbabilities> {
        self.probabilities.clone()
    }

    fn notify_new_game(&mut self) -> Result<(), EngineError> {
        self.new_games += 1;
        self.cursor = 0;
        self.next_move = None;
        self.record("new_game");
        if self.fail_on_new_game == Some(self.new_games) {
            return Err(EngineError::fatal("scripted failure"));
        }
        Ok(())
    }

    fn notify_won(&mut self) -> Result<(), EngineError> {
        self.record("won");
        Ok(())
    }

    fn notify_lost(&mut self) -> Result<(), EngineError> {
        self.record("lost");
        Ok(())
    }

    fn notify_draw(&mut self) -> Result<(), EngineError> {
        self.record("draw");
        Ok(())
    }

    fn notify_tried_illegal_move(&mut self) -> Result<(), EngineError> {
        self.record("tried_illegal");
        Ok(())
    }

    fn notify_made_illegal_move(&mut self) -> Result<(), EngineError> {
        self.record("made_illegal");
        Ok(())
    }

    fn notify_other_player_made_illegal_move(&mut self) -> Result<(), EngineError> {
        self.record("other_illegal");
        Ok(())
    }
}

//! Running games one after another, and boards side by side.

use crate::cancel::CancelToken;
use crate::engine::TurnEngine;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strictly_mnk::Outcome;
use tracing::{error, info, instrument, warn};

/// Runs one game: reset, then play to the end.
///
/// Returns `Ok(None)` if the game was cancelled. Any other error is logged
/// and returned; the caller decides whether the process survives it.
#[instrument(skip_all)]
pub async fn play_single_game(
    engine: &mut TurnEngine,
    cancel: &CancelToken,
) -> Result<Option<Outcome>, EngineError> {
    let result = match engine.new_game(cancel) {
        Ok(()) => engine.play_game(cancel).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(outcome) => Ok(Some(outcome)),
        Err(EngineError::Cancelled) => {
            info!("Game cancelled");
            Ok(None)
        }
        Err(err) => {
            error!(error = %err, "Game session failed");
            Err(err)
        }
    }
}

/// How often to play, and how many games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Pause between the end of one game and the start of the next.
    pub delay: Duration,
    /// Stop after this many completed games. `None` plays until cancelled.
    pub max_games: Option<u32>,
}

impl Schedule {
    /// Default pause between games.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(4000);

    /// Creates a schedule.
    pub fn new(delay: Duration, max_games: Option<u32>) -> Self {
        Self { delay, max_games }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY, None)
    }
}

/// Tally of finished games for one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Completed games.
    pub games: u32,
    /// Wins per seat.
    pub wins: Vec<u32>,
    /// Losses by illegal move per seat.
    pub illegal_moves: Vec<u32>,
    /// Drawn games.
    pub draws: u32,
}

impl ScheduleReport {
    /// Creates an empty report for `players` seats.
    pub fn new(players: usize) -> Self {
        Self {
            games: 0,
            wins: vec![0; players],
            illegal_moves: vec![0; players],
            draws: 0,
        }
    }

    /// Counts one finished game.
    pub fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::Won(player) => self.wins[player] += 1,
            Outcome::IllegalMove(player) => self.illegal_moves[player] += 1,
            Outcome::Draw => self.draws += 1,
        }
    }
}

impl std::fmt::Display for ScheduleReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} games, {} draws", self.games, self.draws)?;
        for (seat, (wins, illegal)) in self.wins.iter().zip(&self.illegal_moves).enumerate() {
            write!(f, "; seat {}: {} wins", seat + 1, wins)?;
            if *illegal > 0 {
                write!(f, ", {illegal} forfeits")?;
            }
        }
        Ok(())
    }
}

/// Plays games on one engine until the game limit or cancellation.
///
/// Games never overlap: the delay starts when the previous game returns.
///
/// # Errors
///
/// Stops at and returns the first error other than cancellation.
#[instrument(skip_all, fields(delay_ms = schedule.delay.as_millis() as u64, max_games = ?schedule.max_games))]
pub async fn run_schedule(
    engine: &mut TurnEngine,
    schedule: &Schedule,
    cancel: &CancelToken,
) -> Result<ScheduleReport, EngineError> {
    let mut report = ScheduleReport::new(engine.game().player_count());

    loop {
        if schedule.max_games.is_some_and(|limit| report.games >= limit) {
            break;
        }
        let Some(outcome) = play_single_game(engine, cancel).await? else {
            break;
        };
        report.record(outcome);
        info!(games = report.games, "Game recorded");

        if schedule.max_games.is_some_and(|limit| report.games >= limit) {
            break;
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(schedule.delay) => {}
        }
    }

    Ok(report)
}

/// Runs every engine on its own task with the same schedule.
///
/// Boards share nothing but the cancel token. Results come back in the order
/// the engines were given.
#[instrument(skip_all, fields(boards = engines.len()))]
pub async fn run_boards(
    engines: Vec<TurnEngine>,
    schedule: Schedule,
    cancel: CancelToken,
) -> Vec<Result<ScheduleReport, EngineError>> {
    let handles: Vec<_> = engines
        .into_iter()
        .enumerate()
        .map(|(board, mut engine)| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                let result = run_schedule(&mut engine, &schedule, &cancel).await;
                if let Err(err) = &result {
                    warn!(board, error = %err, "Board stopped");
                }
                result
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(match handle.await {
            Ok(result) => result,
            Err(join_err) => Err(EngineError::fatal(format!("board task failed: {join_err}"))),
        });
    }
    results
}

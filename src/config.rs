//! Game configuration loaded from TOML.

use crate::agents::{AgentKind, HumanInput, Roster};
use crate::engine::{EnginePolicy, TurnEngine};
use crate::error::EngineError;
use crate::schedule::Schedule;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strictly_mnk::{MnkGame, default_player_names};
use tracing::{debug, info, instrument};

/// Board geometry, seats, pacing and schedule for a session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board rows (m).
    #[serde(default = "default_side")]
    rows: usize,

    /// Board columns (n).
    #[serde(default = "default_side")]
    columns: usize,

    /// Marks in a row needed to win.
    #[serde(default = "default_side")]
    k: usize,

    /// One agent kind per seat, in turn order.
    #[serde(default = "default_players")]
    players: Vec<AgentKind>,

    /// Seat names. Defaults to "Player 1", "Player 2", ...
    #[serde(default)]
    player_names: Option<Vec<String>>,

    /// Minimum time a computer move is held before it is applied.
    #[serde(default = "default_pacing_ms")]
    pacing_ms: u64,

    /// Attempts a computer agent gets to find a legal move.
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,

    /// Pause between games.
    #[serde(default = "default_delay_between_games_ms")]
    delay_between_games_ms: u64,

    /// Stop after this many games; unlimited when absent.
    #[serde(default)]
    games: Option<u32>,

    /// Independent boards played side by side.
    #[serde(default = "default_boards")]
    boards: usize,
}

fn default_side() -> usize {
    3
}

fn default_players() -> Vec<AgentKind> {
    vec![AgentKind::Human, AgentKind::Random]
}

fn default_pacing_ms() -> u64 {
    EnginePolicy::DEFAULT_PACING.as_millis() as u64
}

fn default_max_attempts() -> u32 {
    EnginePolicy::DEFAULT_MAX_ATTEMPTS
}

fn default_delay_between_games_ms() -> u64 {
    Schedule::DEFAULT_DELAY.as_millis() as u64
}

fn default_boards() -> usize {
    1
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: default_side(),
            columns: default_side(),
            k: default_side(),
            players: default_players(),
            player_names: None,
            pacing_ms: default_pacing_ms(),
            max_attempts: default_max_attempts(),
            delay_between_games_ms: default_delay_between_games_ms(),
            games: None,
            boards: default_boards(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file and validates it.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            rows = config.rows,
            columns = config.columns,
            k = config.k,
            players = config.players.len(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value can build a game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 || self.k == 0 {
            return Err(ConfigError::new(format!(
                "rows, columns and k must be positive, got {}x{} k={}",
                self.rows, self.columns, self.k
            )));
        }
        if self.players.is_empty() {
            return Err(ConfigError::new("at least one player is required".to_string()));
        }
        if let Some(kind) = self.players.iter().find(|kind| !kind.is_supported()) {
            return Err(ConfigError::new(format!("{kind} agents are not supported")));
        }
        if let Some(names) = &self.player_names {
            if names.len() != self.players.len() {
                return Err(ConfigError::new(format!(
                    "{} player names for {} players",
                    names.len(),
                    self.players.len()
                )));
            }
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::new("max_attempts must be at least 1".to_string()));
        }
        if self.boards == 0 {
            return Err(ConfigError::new("boards must be at least 1".to_string()));
        }
        if self.boards > 1 && self.players.contains(&AgentKind::Human) {
            return Err(ConfigError::new(
                "human players need a single board".to_string(),
            ));
        }
        Ok(())
    }

    /// Seat names, explicit or defaulted.
    pub fn seat_names(&self) -> Vec<String> {
        self.player_names
            .clone()
            .unwrap_or_else(|| default_player_names(self.players.len()))
    }

    /// Retry and pacing rules for the engine.
    pub fn policy(&self) -> Result<EnginePolicy, EngineError> {
        EnginePolicy::new(Duration::from_millis(self.pacing_ms), self.max_attempts)
    }

    /// Delay and game limit for the schedule.
    pub fn schedule(&self) -> Schedule {
        Schedule::new(Duration::from_millis(self.delay_between_games_ms), self.games)
    }

    /// Builds one engine with fresh agents, plus the input handle per human seat.
    #[instrument(skip(self))]
    pub fn build_engine(&self) -> Result<(TurnEngine, Vec<Option<HumanInput>>), EngineError> {
        let names = self.seat_names();
        let game = MnkGame::new(self.rows, self.columns, self.k, names.clone())?;
        let (agents, inputs) = Roster::build(&self.players, &names)?.into_parts();
        let engine = TurnEngine::new(game, agents, self.policy()?)?;
        Ok((engine, inputs))
    }

    /// Overrides board geometry.
    pub fn set_geometry(&mut self, rows: Option<usize>, columns: Option<usize>, k: Option<usize>) {
        if let Some(rows) = rows {
            self.rows = rows;
        }
        if let Some(columns) = columns {
            self.columns = columns;
        }
        if let Some(k) = k {
            self.k = k;
        }
    }

    /// Replaces the seats. Explicit names are dropped if the count changes.
    pub fn set_players(&mut self, players: Vec<AgentKind>) {
        if self.player_names.as_ref().is_some_and(|names| names.len() != players.len()) {
            self.player_names = None;
        }
        self.players = players;
    }

    /// Overrides pacing.
    pub fn set_pacing_ms(&mut self, pacing_ms: u64) {
        self.pacing_ms = pacing_ms;
    }

    /// Overrides the pause between games.
    pub fn set_delay_between_games_ms(&mut self, delay_ms: u64) {
        self.delay_between_games_ms = delay_ms;
    }

    /// Overrides the game limit.
    pub fn set_games(&mut self, games: Option<u32>) {
        self.games = games;
    }

    /// Overrides the number of boards.
    pub fn set_boards(&mut self, boards: usize) {
        self.boards = boards;
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::InvalidArgument(err.message)
    }
}

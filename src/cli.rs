//! Command-line interface for strictly_turns.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_turns::{AgentKind, ConfigError, GameConfig};
use tracing::instrument;

/// Strictly Turns - m,n,k-games between people and computer agents
#[derive(Parser, Debug)]
#[command(name = "strictly_turns")]
#[command(about = "Turn-based m,n,k-games for humans and computer agents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play on one board; human seats type `row column` on stdin
    Play {
        #[command(flatten)]
        game: GameArgs,
    },

    /// Watch several boards of computer agents play side by side
    Multi {
        #[command(flatten)]
        game: GameArgs,
    },
}

/// Settings shared by every command. Flags override the config file.
#[derive(Args, Debug, Default)]
pub struct GameArgs {
    /// Path to a TOML game config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Board rows
    #[arg(long)]
    pub rows: Option<usize>,

    /// Board columns
    #[arg(long)]
    pub columns: Option<usize>,

    /// Marks in a row needed to win
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Agent per seat, comma-separated (human, random)
    #[arg(short, long, value_delimiter = ',')]
    pub players: Option<Vec<AgentKind>>,

    /// Minimum time a computer move is shown before it is applied
    #[arg(long)]
    pub pacing_ms: Option<u64>,

    /// Pause between games
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Stop after this many games
    #[arg(short, long)]
    pub games: Option<u32>,

    /// Boards to run side by side
    #[arg(short, long)]
    pub boards: Option<usize>,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,
}

impl GameArgs {
    /// Loads the config file, if any, then applies the flags on top.
    #[instrument(skip(self, base))]
    pub fn resolve(&self, base: GameConfig) -> Result<GameConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => base,
        };
        config.set_geometry(self.rows, self.columns, self.k);
        if let Some(players) = &self.players {
            config.set_players(players.clone());
        }
        if let Some(pacing_ms) = self.pacing_ms {
            config.set_pacing_ms(pacing_ms);
        }
        if let Some(delay_ms) = self.delay_ms {
            config.set_delay_between_games_ms(delay_ms);
        }
        if self.games.is_some() {
            config.set_games(self.games);
        }
        if let Some(boards) = self.boards {
            config.set_boards(boards);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Defaults for `multi`: three boards of random agents, paced for watching.
pub fn multi_defaults() -> GameConfig {
    let mut config = GameConfig::default();
    config.set_players(vec![AgentKind::Random, AgentKind::Random]);
    config.set_pacing_ms(100);
    config.set_delay_between_games_ms(400);
    config.set_boards(3);
    config
}

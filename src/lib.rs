//! Strictly Turns library - a turn engine for m,n,k-games
//!
//! Drives human and computer agents through games played on
//! [`strictly_mnk::MnkGame`], one move at a time.
//!
//! # Architecture
//!
//! - **Agents**: anything that can play a seat ([`Agent`]); people through a
//!   [`HumanInput`] handle, or strategies such as [`RandomAgent`]
//! - **Engine**: [`TurnEngine`] asks the current agent for a move, retries
//!   illegal ones, paces computer moves and announces the outcome
//! - **Schedule**: single games, repeating games and parallel boards
//! - **View**: [`TextFrameView`] renders each position as a whole text frame
//! - **Cancellation**: [`CancelToken`] stops any of the above cleanly
//!
//! # Example
//!
//! ```no_run
//! use strictly_turns::{Agent, CancelToken, EnginePolicy, RandomAgent, TurnEngine};
//! use strictly_mnk::MnkGame;
//!
//! # async fn example() -> Result<(), strictly_turns::EngineError> {
//! let agents: Vec<Box<dyn Agent>> = vec![
//!     Box::new(RandomAgent::new("Player 1")),
//!     Box::new(RandomAgent::new("Player 2")),
//! ];
//! let mut engine = TurnEngine::new(MnkGame::tic_tac_toe(), agents, EnginePolicy::default())?;
//! let cancel = CancelToken::new();
//! engine.new_game(&cancel)?;
//! let outcome = engine.play_game(&cancel).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod agents;
mod cancel;
mod config;
mod console;
mod engine;
mod error;
mod schedule;
mod view;

// Crate-level exports - Agents
pub use agents::{Agent, AgentKind, HumanAgent, HumanInput, RandomAgent, Roster};

// Crate-level exports - Engine
pub use cancel::CancelToken;
pub use engine::{EnginePhase, EnginePolicy, TurnEngine};
pub use error::EngineError;

// Crate-level exports - Scheduling
pub use schedule::{Schedule, ScheduleReport, play_single_game, run_boards, run_schedule};

// Crate-level exports - Configuration and console
pub use config::{ConfigError, GameConfig};
pub use console::{ConsoleInput, Delivery, parse_move};

// Crate-level exports - Rendering
pub use view::{Frame, TextFrameView, render};

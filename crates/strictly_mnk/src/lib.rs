//! Pure m,n,k-game logic.
//!
//! An m,n,k-game is played on an m x n board: players take turns claiming an
//! empty square and the first to hold k squares in a line (horizontal,
//! vertical or diagonal) wins. Tic-tac-toe is the (3,3,3)-game.
//!
//! [`MnkGame`] is a self-contained state machine. It decides legality,
//! applies moves, and records exactly one outcome per game: a win, a forfeit
//! by illegal move, or a draw. It knows nothing about who is playing; a turn
//! engine asks it for the current player and legal moves and feeds moves back.
//!
//! ```
//! use strictly_mnk::{MnkGame, Move, Outcome, Status};
//!
//! let mut game = MnkGame::tic_tac_toe();
//! for mv in [Move::new(0, 0), Move::new(1, 1), Move::new(0, 1), Move::new(2, 2)] {
//!     game.try_move(mv, None)?;
//! }
//! let status = game.try_move(Move::new(0, 2), None)?;
//! assert_eq!(status, Status::Over(Outcome::Won(0)));
//! # Ok::<(), strictly_mnk::MnkError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod game;
pub mod invariants;
mod observer;
pub mod rules;
mod types;

pub use board::{Board, mark};
pub use error::MnkError;
pub use game::{MnkGame, WinCheck, default_player_names};
pub use observer::{BoardObserver, SubscriptionId};
pub use types::{Cell, Move, MoveProbabilities, Outcome, Status};

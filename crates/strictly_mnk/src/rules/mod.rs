//! Game rules for m,n,k-games.

pub mod draw;
pub mod win;

pub use draw::no_moves_left;
pub use win::{Direction, scan_board, winner_through};

//! Draw detection logic for m,n,k-games.

use crate::board::Board;
use tracing::instrument;

/// Checks if nobody can move any more.
///
/// Legality depends on occupancy alone, so an exhausted board means the next
/// player, and therefore every player, has no legal move.
#[instrument(skip(board), fields(rows = board.rows(), columns = board.columns()))]
pub fn no_moves_left(board: &Board) -> bool {
    board.is_full()
}

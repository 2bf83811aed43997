//! Monotonic board invariant: squares never change once claimed.

use super::Invariant;
use crate::board::Board;
use crate::game::MnkGame;

/// Invariant: the board is exactly the history replayed in turn order.
///
/// Every accepted move lands on an empty square and nothing else ever touches
/// the board, so replaying the history round-robin from player 0 must
/// reproduce it.
pub struct MonotonicBoardInvariant;

impl Invariant<MnkGame> for MonotonicBoardInvariant {
    fn holds(game: &MnkGame) -> bool {
        let mut replayed = Board::new(game.rows(), game.columns());

        for (turn, &mv) in game.history().iter().enumerate() {
            if !replayed.is_empty(mv) {
                return false;
            }
            replayed.place(mv, turn % game.player_count());
        }

        replayed == *game.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Move;

    #[test]
    fn test_empty_game_holds() {
        assert!(MonotonicBoardInvariant::holds(&MnkGame::tic_tac_toe()));
    }

    #[test]
    fn test_moves_hold() {
        let mut game = MnkGame::tic_tac_toe();
        for mv in [Move::new(0, 0), Move::new(1, 1), Move::new(2, 1)] {
            game.try_move(mv, None).unwrap();
        }
        assert!(MonotonicBoardInvariant::holds(&game));
    }

    #[test]
    fn test_overwritten_square_violates() {
        let mut game = MnkGame::tic_tac_toe();
        game.try_move(Move::new(1, 1), None).unwrap();
        game.board.clear();
        game.board.place(Move::new(1, 1), 1);
        assert!(!MonotonicBoardInvariant::holds(&game));
    }
}

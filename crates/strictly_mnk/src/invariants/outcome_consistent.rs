//! Outcome invariant: the recorded status agrees with the board.

use super::Invariant;
use crate::game::MnkGame;
use crate::rules::{no_moves_left, scan_board};
use crate::types::{Outcome, Status};

/// Invariant: a running game has no winner and a free square; a won game
/// shows the winner's k in a row; a drawn game has a full board and no run.
/// Every player index on the status is a real seat.
pub struct OutcomeConsistentInvariant;

impl Invariant<MnkGame> for OutcomeConsistentInvariant {
    fn holds(game: &MnkGame) -> bool {
        let players = game.player_count();
        let winner = scan_board(game.board(), game.k());
        let full = no_moves_left(game.board());

        match game.status() {
            Status::InProgress { current } => current < players && winner.is_none() && !full,
            Status::Over(Outcome::Won(player)) => player < players && winner == Some(player),
            Status::Over(Outcome::IllegalMove(player)) => player < players && winner.is_none(),
            Status::Over(Outcome::Draw) => full && winner.is_none(),
        }
    }

    fn description() -> &'static str {
        "Game status agrees with the board (single, consistent outcome)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Move;

    #[test]
    fn test_won_game_holds() {
        let mut game = MnkGame::tic_tac_toe();
        for mv in [
            Move::new(0, 0),
            Move::new(1, 1),
            Move::new(0, 1),
            Move::new(2, 2),
            Move::new(0, 2),
        ] {
            game.try_move(mv, None).unwrap();
        }
        assert_eq!(game.winner(), Some(0));
        assert!(OutcomeConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_premature_draw_violates() {
        let mut game = MnkGame::tic_tac_toe();
        game.try_move(Move::new(0, 0), None).unwrap();
        game.status = Status::Over(Outcome::Draw);
        assert!(!OutcomeConsistentInvariant::holds(&game));
    }
}

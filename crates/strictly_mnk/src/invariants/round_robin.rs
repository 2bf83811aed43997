//! Round-robin invariant: seats move in fixed order starting at player 0.

use super::Invariant;
use crate::game::MnkGame;
use crate::types::{Outcome, Status};

/// Invariant: the player to move (or the player who just ended the game)
/// follows from the number of accepted moves.
pub struct RoundRobinInvariant;

impl Invariant<MnkGame> for RoundRobinInvariant {
    fn holds(game: &MnkGame) -> bool {
        let players = game.player_count();
        let played = game.history().len();

        match game.status() {
            Status::InProgress { current } => current == played % players,
            // The forfeiting player never got a move into the history.
            Status::Over(Outcome::IllegalMove(player)) => player == played % players,
            Status::Over(Outcome::Won(player)) => {
                played > 0 && player == (played - 1) % players
            }
            Status::Over(Outcome::Draw) => true,
        }
    }

    fn description() -> &'static str {
        "Players move in round-robin order starting at player 0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Move;

    #[test]
    fn test_new_game_holds() {
        assert!(RoundRobinInvariant::holds(&MnkGame::tic_tac_toe()));
    }

    #[test]
    fn test_illegal_mover_holds() {
        let mut game = MnkGame::tic_tac_toe();
        game.try_move(Move::new(0, 0), None).unwrap();
        game.try_move(Move::new(0, 0), None).unwrap();
        assert_eq!(game.illegal_mover(), Some(1));
        assert!(RoundRobinInvariant::holds(&game));
    }

    #[test]
    fn test_skipped_turn_violates() {
        let mut game = MnkGame::tic_tac_toe();
        game.try_move(Move::new(0, 0), None).unwrap();
        game.status = Status::InProgress { current: 0 };
        assert!(!RoundRobinInvariant::holds(&game));
    }
}

//! The m,n,k-game state machine.
//!
//! Players take turns claiming empty squares on an m x n board; the first to
//! hold k squares in an unbroken horizontal, vertical or diagonal line wins.
//! Tic-tac-toe is the (3,3,3)-game. Any number of players may take part.

use crate::board::Board;
use crate::error::MnkError;
use crate::observer::{BoardObserver, Observers, SubscriptionId};
use crate::rules::{no_moves_left, scan_board, winner_through};
use crate::types::{Move, MoveProbabilities, Outcome, Status};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Strategy used to look for k in a row after each move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WinCheck {
    /// Only the lines through the square just claimed.
    #[default]
    Incremental,
    /// Every occupied square as a run start. Slower; kept as the reference.
    FullScan,
}

/// State of one m,n,k-game.
///
/// Geometry and player names are fixed at construction; [`MnkGame::reset`]
/// starts a new game on the same board. Once a game is over every move and
/// move query fails with [`MnkError::GameOver`] until the next reset.
#[derive(Debug)]
pub struct MnkGame {
    pub(crate) board: Board,
    k: usize,
    player_names: Vec<String>,
    pub(crate) status: Status,
    previous_move: Option<Move>,
    previous_probabilities: Option<MoveProbabilities>,
    pub(crate) history: Vec<Move>,
    win_check: WinCheck,
    observers: Observers,
}

impl MnkGame {
    /// Creates an empty board for the given players, ready to play.
    ///
    /// # Errors
    ///
    /// Returns [`MnkError::InvalidArgument`] if any dimension or `k` is zero,
    /// or if there are no players.
    #[instrument(skip(player_names), fields(players = player_names.len()))]
    pub fn new(
        rows: usize,
        columns: usize,
        k: usize,
        player_names: Vec<String>,
    ) -> Result<Self, MnkError> {
        if rows == 0 {
            return Err(MnkError::InvalidArgument("rows must be at least 1".to_string()));
        }
        if columns == 0 {
            return Err(MnkError::InvalidArgument("columns must be at least 1".to_string()));
        }
        if k == 0 {
            return Err(MnkError::InvalidArgument("k must be at least 1".to_string()));
        }
        if player_names.is_empty() {
            return Err(MnkError::InvalidArgument("player list is empty".to_string()));
        }
        if k > rows.max(columns) {
            warn!(rows, columns, k, "k exceeds both dimensions; no game can be won");
        }

        Ok(Self::fresh(rows, columns, k, player_names))
    }

    /// Classic tic-tac-toe for two players named "Player 1" and "Player 2".
    pub fn tic_tac_toe() -> Self {
        Self::fresh(3, 3, 3, default_player_names(2))
    }

    /// Builds an unplayed game from arguments that were already validated.
    fn fresh(rows: usize, columns: usize, k: usize, player_names: Vec<String>) -> Self {
        Self {
            board: Board::new(rows, columns),
            k,
            player_names,
            status: Status::InProgress { current: 0 },
            previous_move: None,
            previous_probabilities: None,
            history: Vec::new(),
            win_check: WinCheck::default(),
            observers: Observers::default(),
        }
    }

    /// Selects the win detection strategy.
    pub fn with_win_check(mut self, win_check: WinCheck) -> Self {
        self.win_check = win_check;
        self
    }

    /// Clears the board and starts a new game with player 0 to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.clear();
        self.status = Status::InProgress { current: 0 };
        self.previous_move = None;
        self.previous_probabilities = None;
        self.history.clear();
        debug!("Board reset");
        self.check_invariants();
        self.observers.notify(self);
    }

    /// Checks whether the current player may claim this square.
    ///
    /// # Errors
    ///
    /// Returns [`MnkError::GameOver`] if the game has ended.
    pub fn is_legal_move(&self, mv: Move) -> Result<bool, MnkError> {
        if self.status.is_over() {
            return Err(MnkError::GameOver);
        }
        Ok(self.board.is_empty(mv))
    }

    /// Lists every empty square in row-major order.
    ///
    /// Computed fresh on every call.
    ///
    /// # Errors
    ///
    /// Returns [`MnkError::GameOver`] if the game has ended.
    pub fn legal_moves(&self) -> Result<Vec<Move>, MnkError> {
        if self.status.is_over() {
            return Err(MnkError::GameOver);
        }
        Ok(self.board.empty_squares().collect())
    }

    /// Plays a move for the current player.
    ///
    /// The move and probabilities are recorded as the previous move whether
    /// or not the move is legal. An illegal move ends the game at once with
    /// the current player forfeiting. A legal move may end the game in a win
    /// or, if the next player has nothing left to play, a draw.
    ///
    /// # Errors
    ///
    /// Returns [`MnkError::GameOver`] if the game has already ended, or
    /// [`MnkError::ProbabilityShape`] if `probabilities` does not cover the
    /// board exactly. Neither changes the game.
    #[instrument(skip(self, probabilities), fields(mv = %mv))]
    pub fn try_move(
        &mut self,
        mv: Move,
        probabilities: Option<MoveProbabilities>,
    ) -> Result<Status, MnkError> {
        let Status::InProgress { current } = self.status else {
            return Err(MnkError::GameOver);
        };
        if let Some(probs) = &probabilities {
            if probs.rows() != self.rows() || probs.columns() != self.columns() {
                return Err(MnkError::ProbabilityShape {
                    rows: probs.rows(),
                    columns: probs.columns(),
                    board_rows: self.rows(),
                    board_columns: self.columns(),
                });
            }
        }

        self.previous_move = Some(mv);
        self.previous_probabilities = probabilities;

        if !self.board.is_empty(mv) {
            warn!(player = current, "Illegal move ends the game");
            self.status = Status::Over(Outcome::IllegalMove(current));
            self.check_invariants();
            self.observers.notify(self);
            return Ok(self.status);
        }

        self.board.place(mv, current);
        self.history.push(mv);

        let winner = match self.win_check {
            WinCheck::Incremental => winner_through(&self.board, mv, self.k),
            WinCheck::FullScan => scan_board(&self.board, self.k),
        };

        self.status = if let Some(winner) = winner {
            info!(winner, "Game won");
            Status::Over(Outcome::Won(winner))
        } else if no_moves_left(&self.board) {
            info!("Game drawn");
            Status::Over(Outcome::Draw)
        } else {
            Status::InProgress {
                current: (current + 1) % self.player_names.len(),
            }
        };

        debug!(player = current, status = ?self.status, "Move applied");
        self.check_invariants();
        self.observers.notify(self);
        Ok(self.status)
    }

    /// Undo is not available: boards only fill up within a game.
    ///
    /// # Errors
    ///
    /// Always returns [`MnkError::Unsupported`].
    pub fn undo_move(&mut self) -> Result<(), MnkError> {
        Err(MnkError::Unsupported("undo_move"))
    }

    /// Checks if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// How the game ended, if it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.status.outcome()
    }

    /// The winner, if any.
    pub fn winner(&self) -> Option<usize> {
        self.outcome().and_then(Outcome::winner)
    }

    /// The player that forfeited by an illegal move, if any.
    pub fn illegal_mover(&self) -> Option<usize> {
        self.outcome().and_then(Outcome::illegal_mover)
    }

    /// The player to move.
    ///
    /// # Errors
    ///
    /// Returns [`MnkError::GameOver`] if the game has ended.
    pub fn current_player(&self) -> Result<usize, MnkError> {
        match self.status {
            Status::InProgress { current } => Ok(current),
            Status::Over(_) => Err(MnkError::GameOver),
        }
    }

    /// The last move submitted, legal or not.
    pub fn previous_move(&self) -> Option<Move> {
        self.previous_move
    }

    /// Probabilities submitted with the last move.
    pub fn previous_move_probabilities(&self) -> Option<&MoveProbabilities> {
        self.previous_probabilities.as_ref()
    }

    /// Legal moves accepted so far this game, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of rows (m).
    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    /// Number of columns (n).
    pub fn columns(&self) -> usize {
        self.board.columns()
    }

    /// Run length needed to win (k).
    pub fn k(&self) -> usize {
        self.k
    }

    /// Player names in seat order.
    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }

    /// Number of players.
    pub fn player_count(&self) -> usize {
        self.player_names.len()
    }

    /// Registers an observer.
    pub fn subscribe(&mut self, observer: Arc<dyn BoardObserver>) -> SubscriptionId {
        let id = self.observers.add(observer);
        debug!(subscribers = self.observers.len(), "Observer subscribed");
        id
    }

    /// Removes an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        use crate::invariants::{InvariantSet, MnkInvariants};
        if let Err(violations) = MnkInvariants::check_all(self) {
            panic!("m,n,k invariants violated: {violations:?}");
        }
    }

    #[cfg(not(debug_assertions))]
    fn check_invariants(&self) {}
}

/// Returns "Player 1", "Player 2", ... for the given number of players.
pub fn default_player_names(count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("Player {n}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_geometry() {
        let names = default_player_names(2);
        assert!(MnkGame::new(0, 3, 3, names.clone()).is_err());
        assert!(MnkGame::new(3, 0, 3, names.clone()).is_err());
        assert!(MnkGame::new(3, 3, 0, names).is_err());
        assert!(MnkGame::new(3, 3, 3, Vec::new()).is_err());
    }

    #[test]
    fn test_tic_tac_toe_matches_general_constructor() {
        let classic = MnkGame::tic_tac_toe();
        let general = MnkGame::new(3, 3, 3, default_player_names(2)).unwrap();
        assert_eq!(classic.board(), general.board());
        assert_eq!(classic.k(), general.k());
        assert_eq!(classic.player_names(), general.player_names());
        assert_eq!(classic.status(), general.status());
        assert_eq!(classic.previous_move(), None);
        assert!(classic.previous_move_probabilities().is_none());
        assert!(classic.history().is_empty());
        assert_eq!(classic.win_check, general.win_check);
        assert_eq!(classic.observers.len(), 0);
    }

    #[test]
    fn test_round_robin_three_players() {
        let mut game = MnkGame::new(3, 3, 3, default_player_names(3)).unwrap();
        assert_eq!(game.current_player(), Ok(0));
        game.try_move(Move::new(0, 0), None).unwrap();
        assert_eq!(game.current_player(), Ok(1));
        game.try_move(Move::new(0, 1), None).unwrap();
        assert_eq!(game.current_player(), Ok(2));
        game.try_move(Move::new(0, 2), None).unwrap();
        assert_eq!(game.current_player(), Ok(0));
    }

    #[test]
    fn test_queries_fail_after_game_over() {
        let mut game = MnkGame::new(1, 1, 1, default_player_names(2)).unwrap();
        let status = game.try_move(Move::new(0, 0), None).unwrap();
        assert_eq!(status, Status::Over(Outcome::Won(0)));
        assert_eq!(game.legal_moves(), Err(MnkError::GameOver));
        assert_eq!(game.is_legal_move(Move::new(0, 0)), Err(MnkError::GameOver));
        assert_eq!(game.current_player(), Err(MnkError::GameOver));
        assert_eq!(game.try_move(Move::new(0, 0), None), Err(MnkError::GameOver));
    }

    #[test]
    fn test_out_of_bounds_is_illegal() {
        let mut game = MnkGame::tic_tac_toe();
        assert_eq!(game.is_legal_move(Move::new(3, 0)), Ok(false));
        let status = game.try_move(Move::new(0, 7), None).unwrap();
        assert_eq!(status, Status::Over(Outcome::IllegalMove(0)));
        assert_eq!(game.previous_move(), Some(Move::new(0, 7)));
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_probability_shape_checked() {
        let mut game = MnkGame::tic_tac_toe();
        let probs = MoveProbabilities::uniform(2, 2, &[Move::new(0, 0)]);
        let result = game.try_move(Move::new(0, 0), Some(probs));
        assert!(matches!(result, Err(MnkError::ProbabilityShape { .. })));
        assert_eq!(game.previous_move(), None);
        assert!(game.board().is_empty(Move::new(0, 0)));
    }

    #[test]
    fn test_probabilities_recorded() {
        let mut game = MnkGame::tic_tac_toe();
        let probs = MoveProbabilities::uniform(3, 3, &[Move::new(1, 1)]);
        game.try_move(Move::new(1, 1), Some(probs.clone())).unwrap();
        assert_eq!(game.previous_move_probabilities(), Some(&probs));
        game.try_move(Move::new(0, 0), None).unwrap();
        assert_eq!(game.previous_move_probabilities(), None);
    }

    #[test]
    fn test_undo_unsupported() {
        let mut game = MnkGame::tic_tac_toe();
        assert_eq!(game.undo_move(), Err(MnkError::Unsupported("undo_move")));
    }

    #[test]
    fn test_single_player_game() {
        let mut game = MnkGame::new(1, 3, 2, default_player_names(1)).unwrap();
        game.try_move(Move::new(0, 0), None).unwrap();
        assert_eq!(game.current_player(), Ok(0));
        let status = game.try_move(Move::new(0, 1), None).unwrap();
        assert_eq!(status, Status::Over(Outcome::Won(0)));
    }

    #[test]
    fn test_unwinnable_k_draws() {
        let mut game = MnkGame::new(2, 2, 3, default_player_names(2)).unwrap();
        for mv in [Move::new(0, 0), Move::new(0, 1), Move::new(1, 0)] {
            game.try_move(mv, None).unwrap();
        }
        let status = game.try_move(Move::new(1, 1), None).unwrap();
        assert_eq!(status, Status::Over(Outcome::Draw));
    }
}

//! Text rendering of a game, published as whole frames.
//!
//! [`TextFrameView`] subscribes to a game and, on every change, renders the
//! full position into a string and swaps it into a watch channel. Readers on
//! other threads only ever see complete frames.

use std::fmt::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use strictly_mnk::{BoardObserver, Cell, MnkGame, Outcome, Status, mark};
use tokio::sync::watch;
use tracing::trace;

/// One rendered position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Increments with every published frame, starting at 1.
    pub sequence: u64,
    /// The rendered board, status line included.
    pub text: String,
    /// Whether the game had ended when this frame was drawn.
    pub over: bool,
}

/// Observer that renders the board as text and publishes each frame.
#[derive(Debug)]
pub struct TextFrameView {
    title: Option<String>,
    sequence: AtomicU64,
    tx: watch::Sender<Frame>,
}

impl TextFrameView {
    /// Creates a view. `title` is printed above every frame, if given.
    pub fn new(title: Option<String>) -> Arc<Self> {
        let (tx, _rx) = watch::channel(Frame::default());
        Arc::new(Self {
            title,
            sequence: AtomicU64::new(0),
            tx,
        })
    }

    /// Receiver for published frames. The initial value is an empty frame
    /// with sequence 0.
    pub fn frames(&self) -> watch::Receiver<Frame> {
        self.tx.subscribe()
    }

    /// The most recently published frame.
    pub fn latest(&self) -> Frame {
        self.tx.borrow().clone()
    }
}

impl BoardObserver for TextFrameView {
    fn state_changed(&self, game: &MnkGame) {
        let mut text = String::new();
        if let Some(title) = &self.title {
            let _ = writeln!(text, "{title}");
        }
        text.push_str(&render(game));

        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        trace!(sequence, "Publishing frame");
        self.tx.send_replace(Frame {
            sequence,
            text,
            over: game.is_game_over(),
        });
    }
}

/// Renders the board with 1-based labels, the previous move in lowercase,
/// a status line and, when the last move came with them, the mover's
/// probabilities.
pub fn render(game: &MnkGame) -> String {
    let board = game.board();
    let width = board.rows().max(board.columns()).to_string().len();
    let previous = game.previous_move();
    let mut out = String::new();

    let _ = write!(out, "{:width$} ", "");
    for column in 0..board.columns() {
        let _ = write!(out, " {:>width$}", column + 1);
    }
    out.push('\n');

    for row in 0..board.rows() {
        let _ = write!(out, "{:>width$} ", row + 1);
        for (column, cell) in board.row(row).iter().enumerate() {
            let glyph = match cell {
                Cell::Empty => '.',
                Cell::Occupied(player) => {
                    let glyph = mark(*player);
                    if previous.is_some_and(|mv| mv.row == row && mv.column == column) {
                        glyph.to_ascii_lowercase()
                    } else {
                        glyph
                    }
                }
            };
            let _ = write!(out, " {glyph:>width$}");
        }
        out.push('\n');
    }

    out.push_str(&status_line(game));
    out.push('\n');

    if let Some(probabilities) = game.previous_move_probabilities() {
        out.push_str("Move probabilities:\n");
        for row in 0..probabilities.rows() {
            let line: Vec<String> = (0..probabilities.columns())
                .map(|column| {
                    let value = probabilities.get(row, column).unwrap_or_default();
                    format!("{:>4.0}%", value * 100.0)
                })
                .collect();
            let _ = writeln!(out, "{}", line.join(""));
        }
    }

    out
}

fn status_line(game: &MnkGame) -> String {
    let name = |player: usize| {
        let name = &game.player_names()[player];
        format!("{name} ({})", mark(player))
    };
    match game.status() {
        Status::InProgress { current } => format!("{} to move", name(current)),
        Status::Over(Outcome::Won(winner)) => format!("{} wins", name(winner)),
        Status::Over(Outcome::IllegalMove(offender)) => {
            format!("{} loses by illegal move", name(offender))
        }
        Status::Over(Outcome::Draw) => "Draw".to_string(),
    }
}

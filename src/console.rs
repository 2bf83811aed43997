//! Console input for human seats.
//!
//! People type `row column`, 1-based, as printed on the board. The line goes
//! to whichever human seat is waiting for a move; input while nobody waits is
//! dropped, the same as a click on an idle board.

use crate::agents::HumanInput;
use crate::error::EngineError;
use strictly_mnk::Move;
use tracing::{debug, instrument};

/// Parses `row column` (1-based, separated by spaces or a comma) into a move.
///
/// # Errors
///
/// Returns [`EngineError::InvalidArgument`] for anything other than two
/// positive integers.
pub fn parse_move(line: &str) -> Result<Move, EngineError> {
    let numbers = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .ok_or_else(|| EngineError::InvalidArgument(format!("not a square number: {part}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match numbers.as_slice() {
        [row, column] => Ok(Move::new(*row, *column)),
        _ => Err(EngineError::InvalidArgument(format!(
            "expected `row column`, got {:?}",
            line.trim()
        ))),
    }
}

/// What happened to a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// A waiting seat took the move.
    Accepted {
        /// Name of the seat that took it.
        seat: String,
        /// The move delivered.
        mv: Move,
    },
    /// No human seat was waiting.
    NotWaiting,
}

/// Routes typed moves to the human seats of one board.
#[derive(Debug, Clone, Default)]
pub struct ConsoleInput {
    seats: Vec<HumanInput>,
}

impl ConsoleInput {
    /// Creates a router over the human seats of a board.
    pub fn new(inputs: impl IntoIterator<Item = Option<HumanInput>>) -> Self {
        Self {
            seats: inputs.into_iter().flatten().collect(),
        }
    }

    /// Checks if the board has any human seat.
    pub fn has_humans(&self) -> bool {
        !self.seats.is_empty()
    }

    /// Delivers one line of input.
    #[instrument(skip(self))]
    pub fn handle_line(&self, line: &str) -> Result<Delivery, EngineError> {
        let mv = parse_move(line)?;
        for seat in &self.seats {
            if seat.submit(mv) {
                debug!(seat = %seat.name(), mv = %mv, "Move delivered");
                return Ok(Delivery::Accepted {
                    seat: seat.name().to_string(),
                    mv,
                });
            }
        }
        Ok(Delivery::NotWaiting)
    }
}

//! Human agent fed by an input handle on another thread.
//!
//! The agent and its [`HumanInput`] share a single-slot mailbox behind one
//! mutex. While the agent is waiting, the slot holds a oneshot sender; that
//! sender is the "awaiting input" flag. Arming the slot and taking the sender
//! out to deliver a move are each one critical section, so an input either
//! finds the slot armed and is delivered exactly once, or finds it empty and
//! is ignored. An input that lands between arming and the await is buffered
//! by the oneshot, never lost.

use super::{Agent, no_move_yet};
use crate::cancel::CancelToken;
use crate::error::EngineError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strictly_mnk::{MnkGame, Move};
use tokio::sync::oneshot;
use tracing::{debug, instrument};

#[derive(Debug, Default)]
struct Mailbox {
    pending: Option<oneshot::Sender<Move>>,
}

fn lock(mailbox: &Mutex<Mailbox>) -> MutexGuard<'_, Mailbox> {
    // The slot is valid in every state, so a poisoned lock is still usable.
    mailbox.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Agent whose moves come from a person, through a [`HumanInput`].
#[derive(Debug)]
pub struct HumanAgent {
    name: String,
    mailbox: Arc<Mutex<Mailbox>>,
    next_move: Option<Move>,
}

/// Cloneable handle the presentation layer uses to deliver a person's move.
#[derive(Debug, Clone)]
pub struct HumanInput {
    name: String,
    mailbox: Arc<Mutex<Mailbox>>,
}

impl HumanAgent {
    /// Creates an agent and the input handle that feeds it.
    pub fn new(name: impl Into<String>) -> (Self, HumanInput) {
        let name = name.into();
        let mailbox = Arc::new(Mutex::new(Mailbox::default()));
        let input = HumanInput {
            name: name.clone(),
            mailbox: Arc::clone(&mailbox),
        };
        (
            Self {
                name,
                mailbox,
                next_move: None,
            },
            input,
        )
    }

    fn disarm(&self) {
        lock(&self.mailbox).pending = None;
    }
}

impl HumanInput {
    /// Name of the agent this handle feeds.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Checks if the agent is currently waiting for a move.
    pub fn is_awaiting_input(&self) -> bool {
        lock(&self.mailbox)
            .pending
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }

    /// Offers a move for the square at `mv`.
    ///
    /// Returns `true` if the agent was waiting and took the move. Input that
    /// arrives while the agent is not waiting is dropped.
    #[instrument(skip(self), fields(agent = %self.name, mv = %mv))]
    pub fn submit(&self, mv: Move) -> bool {
        let mut mailbox = lock(&self.mailbox);
        let Some(tx) = mailbox.pending.take() else {
            debug!("Input ignored; not awaiting a move");
            return false;
        };
        // Sent while still holding the lock: clearing the flag and waking the
        // waiter happen together.
        let accepted = tx.send(mv).is_ok();
        debug!(accepted, "Input delivered");
        accepted
    }
}

#[async_trait::async_trait]
impl Agent for HumanAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        true
    }

    #[instrument(skip(self, game, cancel), fields(agent = %self.name))]
    async fn calculate_move(
        &mut self,
        game: &MnkGame,
        cancel: &CancelToken,
    ) -> Result<(), EngineError> {
        cancel.check()?;
        if game.legal_moves()?.is_empty() {
            return Err(EngineError::Precondition("no legal moves available".to_string()));
        }

        self.next_move = None;
        let rx = {
            let mut mailbox = lock(&self.mailbox);
            let (tx, rx) = oneshot::channel();
            mailbox.pending = Some(tx);
            rx
        };
        debug!("Awaiting input");

        let received = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(EngineError::Cancelled),
            received = rx => received.map_err(|_| EngineError::fatal("input slot was cleared while waiting")),
        };

        match received {
            Ok(mv) => {
                debug!(mv = %mv, "Input received");
                self.next_move = Some(mv);
                Ok(())
            }
            Err(err) => {
                self.disarm();
                Err(err)
            }
        }
    }

    fn calculated_move(&self) -> Result<Move, EngineError> {
        self.next_move.ok_or_else(|| no_move_yet(&self.name))
    }

    fn notify_new_game(&mut self) -> Result<(), EngineError> {
        self.disarm();
        self.next_move = None;
        Ok(())
    }

    fn notify_tried_illegal_move(&mut self) -> Result<(), EngineError> {
        debug!(agent = %self.name, "Square unavailable, waiting for another");
        Ok(())
    }
}

//! Subscription interface for state-change notifications.

use crate::game::MnkGame;
use std::sync::Arc;

/// Receives a push every time an [`MnkGame`] changes.
///
/// Observers are called synchronously on the thread that mutated the game and
/// should pull whatever they need from the game they are handed. Marshaling
/// to another thread (for example a UI thread) is the observer's job.
pub trait BoardObserver: Send + Sync {
    /// Called once per `reset` and once per accepted `try_move`.
    fn state_changed(&self, game: &MnkGame);
}

/// Handle returned by [`MnkGame::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered observers of one game.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Arc<dyn BoardObserver>)>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Arc<dyn BoardObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&self, game: &MnkGame) {
        for (_, observer) in &self.entries {
            observer.state_changed(game);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}

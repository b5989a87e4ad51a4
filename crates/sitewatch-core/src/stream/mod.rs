// ── Reactive website stream ──
//
// Subscription type for consuming website list changes from the store.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::Website;

/// A subscription to the website list.
pub struct WebsiteStream {
    receiver: watch::Receiver<Arc<Vec<Arc<Website>>>>,
}

impl WebsiteStream {
    pub(crate) fn new(mut receiver: watch::Receiver<Arc<Vec<Arc<Website>>>>) -> Self {
        receiver.mark_unchanged();
        Self { receiver }
    }

    /// Whether a change arrived that `changed()` has not yet returned.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<Vec<Arc<Website>>>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

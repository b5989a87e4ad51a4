// ── Website list cache ──
//
// Holds the last-known `getWebsites` result. Every mutation is a pure
// function of the previous snapshot (replace, append, filter, update)
// applied under the watch channel's write lock, so concurrent writers
// never lose each other's changes. After any create or delete the list
// equals what a fresh fetch would return.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::model::{Website, WebsiteId};
use crate::stream::WebsiteStream;

type Snapshot = Arc<Vec<Arc<Website>>>;

/// Ordered, id-unique list of websites.
pub struct WebsiteStore {
    websites: watch::Sender<Snapshot>,
}

impl Default for WebsiteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WebsiteStore {
    pub fn new() -> Self {
        let (websites, _) = watch::channel(Arc::new(Vec::new()));
        Self { websites }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        self.websites.borrow().clone()
    }

    pub fn get(&self, id: &WebsiteId) -> Option<Arc<Website>> {
        self.websites.borrow().iter().find(|w| &w.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.websites.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.websites.borrow().is_empty()
    }

    /// Subscribe to list changes.
    pub fn subscribe(&self) -> WebsiteStream {
        WebsiteStream::new(self.websites.subscribe())
    }

    // ── Pure updates ─────────────────────────────────────────────────

    /// Replace the whole list with a fresh fetch. Later duplicates of an
    /// id are dropped.
    pub fn replace_all(&self, websites: Vec<Website>) {
        let mut next: Vec<Arc<Website>> = Vec::with_capacity(websites.len());
        for website in websites {
            if next.iter().any(|w| w.id == website.id) {
                debug!(id = %website.id, "dropping duplicate website from list");
                continue;
            }
            next.push(Arc::new(website));
        }

        self.websites.send_if_modified(|current| {
            let changed = current.len() != next.len()
                || current.iter().zip(&next).any(|(a, b)| a != b);
            *current = Arc::new(next);
            changed
        });
    }

    /// Append a newly created website. Returns `false` (and changes
    /// nothing) if the id is already present.
    pub fn append(&self, website: Website) -> bool {
        self.websites.send_if_modified(|current| {
            if current.iter().any(|w| w.id == website.id) {
                return false;
            }
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(Arc::new(website));
            *current = Arc::new(next);
            true
        })
    }

    /// Remove exactly the entry with `id`, preserving the order of the rest.
    pub fn remove(&self, id: &WebsiteId) -> bool {
        self.websites.send_if_modified(|current| {
            if !current.iter().any(|w| &w.id == id) {
                return false;
            }
            let next: Vec<_> = current.iter().filter(|w| &w.id != id).cloned().collect();
            *current = Arc::new(next);
            true
        })
    }

    /// Replace the entry with the same id in place (mutation results that
    /// return the updated entity). Unknown ids are ignored.
    pub fn update(&self, website: Website) -> bool {
        self.websites.send_if_modified(|current| {
            let Some(pos) = current.iter().position(|w| w.id == website.id) else {
                return false;
            };
            if *current[pos] == website {
                return false;
            }
            let mut next: Vec<_> = current.iter().cloned().collect();
            next[pos] = Arc::new(website);
            *current = Arc::new(next);
            true
        })
    }
}

//! Per-path subscriber registry for document change fan-out.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;

use examify_core::traits::document_store::{DocumentChange, DocumentSubscription};

/// One registered subscriber: its ID and change sender.
#[derive(Debug)]
struct Subscriber {
    id: u64,
    sender: mpsc::UnboundedSender<DocumentChange>,
}

/// Registry mapping document paths to their active subscribers.
///
/// Each subscription is independent; removing one never affects another's
/// lifecycle. Removal is idempotent so a late unsubscribe after the store
/// has already dropped the sender is harmless.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    /// Document path → subscribers.
    channels: DashMap<String, Vec<Subscriber>>,
    /// Next subscriber ID.
    next_id: AtomicU64,
}

impl SubscriberRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber for a path and returns its subscription.
    pub fn subscribe(self: &Arc<Self>, path: &str) -> DocumentSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();
        self.channels
            .entry(path.to_string())
            .or_default()
            .push(Subscriber { id, sender });

        let registry = Arc::clone(self);
        let owned_path = path.to_string();
        DocumentSubscription::new(receiver, move || {
            registry.remove(&owned_path, id);
        })
    }

    /// Delivers a change to every subscriber of a path, in registration
    /// order. Subscribers whose receiving side is gone are pruned.
    pub fn notify(&self, path: &str, change: DocumentChange) {
        let mut dead = Vec::new();
        if let Some(subscribers) = self.channels.get(path) {
            for subscriber in subscribers.iter() {
                if subscriber.sender.send(change.clone()).is_err() {
                    dead.push(subscriber.id);
                }
            }
        }
        for id in dead {
            debug!(path, id, "Pruning closed subscriber");
            self.remove(path, id);
        }
    }

    /// Number of active subscribers for a path.
    pub fn count(&self, path: &str) -> usize {
        self.channels.get(path).map(|s| s.len()).unwrap_or(0)
    }

    fn remove(&self, path: &str, id: u64) {
        if let Some(mut subscribers) = self.channels.get_mut(path) {
            subscribers.retain(|s| s.id != id);
            if subscribers.is_empty() {
                drop(subscribers);
                self.channels.remove(path);
            }
        }
    }
}

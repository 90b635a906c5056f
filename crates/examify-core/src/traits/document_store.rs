//! Document store trait for pluggable remote database backends.

use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::result::AppResult;
use crate::types::document::Document;
use crate::types::path::{CollectionPath, DocumentPath};

/// A change notification delivered to a subscription: the document's new
/// contents, or `None` when it was deleted.
pub type DocumentChange = Option<Document>;

/// Trait for document store backends.
///
/// Implementations exist for an in-process store and a REST-backed remote
/// store. Server-timestamp sentinels (see
/// [`server_timestamp`](crate::types::document::server_timestamp)) are
/// resolved by the store at write time.
#[async_trait]
pub trait DocumentStore: Send + Sync + fmt::Debug + 'static {
    /// Return the backend type name (e.g., "memory", "rest").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read a single document. Returns `None` if it does not exist;
    /// absence is not an error.
    async fn get(&self, path: &DocumentPath) -> AppResult<Option<Document>>;

    /// Read every document in a collection, paired with its path.
    async fn list(&self, collection: &CollectionPath)
    -> AppResult<Vec<(DocumentPath, Document)>>;

    /// Write a document, replacing any existing contents.
    async fn set(&self, path: &DocumentPath, doc: Document) -> AppResult<()>;

    /// Merge fields into an existing document and return the updated
    /// contents. Fails with `NotFound` if the document does not exist.
    async fn update(&self, path: &DocumentPath, fields: Document) -> AppResult<Document>;

    /// Delete a document. Deleting an absent document is not an error.
    async fn delete(&self, path: &DocumentPath) -> AppResult<()>;

    /// Append a document to a collection with a store-assigned ID and
    /// return the new document's path.
    async fn append(&self, collection: &CollectionPath, doc: Document)
    -> AppResult<DocumentPath>;

    /// Subscribe to changes of a single document. Updates for one
    /// subscription are delivered in the order the store observed them.
    async fn subscribe(&self, path: &DocumentPath) -> AppResult<DocumentSubscription>;
}

/// An active subscription to a single document.
///
/// Dropping the subscription tears it down; teardown runs exactly once
/// and tolerates the underlying interest having already ended.
pub struct DocumentSubscription {
    receiver: mpsc::UnboundedReceiver<DocumentChange>,
    _guard: SubscriptionGuard,
}

impl DocumentSubscription {
    /// Wrap a change receiver with an unsubscribe action run on drop.
    pub fn new(
        receiver: mpsc::UnboundedReceiver<DocumentChange>,
        unsubscribe: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            receiver,
            _guard: SubscriptionGuard {
                unsubscribe: Some(Box::new(unsubscribe)),
            },
        }
    }

    /// Wait for the next change. Returns `None` once the subscription has
    /// been closed by the store.
    pub async fn next(&mut self) -> Option<DocumentChange> {
        self.receiver.recv().await
    }
}

impl fmt::Debug for DocumentSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentSubscription").finish()
    }
}

struct SubscriptionGuard {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

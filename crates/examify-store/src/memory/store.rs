//! In-memory document store implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::SecondsFormat;
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use examify_core::error::AppError;
use examify_core::result::AppResult;
use examify_core::traits::document_store::{DocumentStore, DocumentSubscription};
use examify_core::types::document::{Document, is_server_timestamp};
use examify_core::types::path::{CollectionPath, DocumentPath};

use super::clock::MonotonicClock;
use super::subscribers::SubscriberRegistry;

/// In-process document store.
///
/// Backs local deployments and tests. Server-timestamp sentinels are
/// resolved against a monotonic clock, so timestamps are authoritative
/// and strictly ordered per store instance.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    /// Document path → contents.
    documents: Arc<DashMap<String, Document>>,
    /// Active subscriptions.
    subscribers: Arc<SubscriberRegistry>,
    /// Server clock for timestamp resolution.
    clock: Arc<MonotonicClock>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active subscriptions for a document path.
    pub fn subscriber_count(&self, path: &DocumentPath) -> usize {
        self.subscribers.count(path.as_str())
    }

    /// Resolve every top-level server-timestamp sentinel in a document.
    /// All sentinels within one write resolve to the same instant.
    fn resolve_server_timestamps(&self, doc: &mut Document) {
        let mut stamp = None;
        for value in doc.values_mut() {
            if is_server_timestamp(value) {
                let instant = *stamp.get_or_insert_with(|| self.clock.next());
                *value = Value::String(instant.to_rfc3339_opts(SecondsFormat::Micros, true));
            }
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn get(&self, path: &DocumentPath) -> AppResult<Option<Document>> {
        Ok(self.documents.get(path.as_str()).map(|doc| doc.clone()))
    }

    async fn list(
        &self,
        collection: &CollectionPath,
    ) -> AppResult<Vec<(DocumentPath, Document)>> {
        let prefix = format!("{}/", collection.as_str());
        let mut entries = Vec::new();
        for entry in self.documents.iter() {
            let Some(remainder) = entry.key().strip_prefix(&prefix) else {
                continue;
            };
            // Direct children only; nested subcollection documents have
            // further slashes in the remainder.
            if remainder.contains('/') {
                continue;
            }
            entries.push((DocumentPath::parse(entry.key().clone())?, entry.value().clone()));
        }
        entries.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        Ok(entries)
    }

    async fn set(&self, path: &DocumentPath, mut doc: Document) -> AppResult<()> {
        self.resolve_server_timestamps(&mut doc);
        self.documents.insert(path.as_str().to_string(), doc.clone());
        self.subscribers.notify(path.as_str(), Some(doc));
        Ok(())
    }

    async fn update(&self, path: &DocumentPath, mut fields: Document) -> AppResult<Document> {
        self.resolve_server_timestamps(&mut fields);
        let updated = {
            let Some(mut existing) = self.documents.get_mut(path.as_str()) else {
                return Err(AppError::not_found(format!("Document {path} not found")));
            };
            for (key, value) in fields {
                existing.insert(key, value);
            }
            existing.clone()
        };
        self.subscribers.notify(path.as_str(), Some(updated.clone()));
        Ok(updated)
    }

    async fn delete(&self, path: &DocumentPath) -> AppResult<()> {
        if self.documents.remove(path.as_str()).is_some() {
            self.subscribers.notify(path.as_str(), None);
        }
        Ok(())
    }

    async fn append(
        &self,
        collection: &CollectionPath,
        mut doc: Document,
    ) -> AppResult<DocumentPath> {
        let id = Uuid::now_v7();
        doc.insert("id".to_string(), Value::String(id.to_string()));
        self.resolve_server_timestamps(&mut doc);
        let path = collection.doc(&id.to_string())?;
        self.documents.insert(path.as_str().to_string(), doc.clone());
        self.subscribers.notify(path.as_str(), Some(doc));
        debug!(%path, "Appended document");
        Ok(path)
    }

    async fn subscribe(&self, path: &DocumentPath) -> AppResult<DocumentSubscription> {
        Ok(self.subscribers.subscribe(path.as_str()))
    }
}

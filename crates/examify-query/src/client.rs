//! Query client — cached reads and invalidating mutations.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use examify_core::config::cache::QueryCacheConfig;
use examify_core::error::AppError;
use examify_core::result::AppResult;
use examify_core::traits::document_store::DocumentStore;
use examify_core::types::document::Document;
use examify_core::types::path::{CollectionPath, DocumentPath};
use examify_core::types::query_key::QueryKey;

use crate::cache::QueryCache;
use crate::descriptor::{QueryDescriptor, QuerySource};
use crate::state::{QueryState, decode_collection, decode_document};

/// The write half of a mutation request.
#[derive(Debug, Clone)]
pub enum MutationOp {
    /// Append a new document with a store-assigned ID.
    Create(Document),
    /// Write a document at a known ID, replacing any existing contents.
    Set {
        /// Target document ID within the collection.
        id: String,
        /// Full replacement contents.
        doc: Document,
    },
    /// Merge fields into an existing document.
    Update {
        /// Target document ID within the collection.
        id: String,
        /// Fields to merge.
        fields: Document,
    },
    /// Delete a document.
    Delete {
        /// Target document ID within the collection.
        id: String,
    },
}

/// A mutation against one collection, with the cache keys to invalidate
/// on success.
#[derive(Debug, Clone)]
pub struct MutationRequest {
    /// Target collection.
    pub collection: CollectionPath,
    /// The write to perform.
    pub op: MutationOp,
    /// Cache keys whose entries are stale once the write lands.
    pub invalidate: Vec<QueryKey>,
}

/// The result handed to a successful mutation's caller: the server
/// result together with the original input, so dependent side effects
/// (such as mirroring a field into the auth provider) can run off both.
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    /// Path of the affected document.
    pub path: DocumentPath,
    /// The document as the store now holds it (`None` after a delete).
    pub document: Option<Document>,
    /// The caller's original input fields.
    pub input: Document,
}

/// Client for reads and mutations against the document store, with a
/// shared query cache.
#[derive(Debug, Clone)]
pub struct QueryClient {
    store: Arc<dyn DocumentStore>,
    cache: QueryCache,
}

impl QueryClient {
    /// Create a client over a store with a cache sized by configuration.
    pub fn new(store: Arc<dyn DocumentStore>, config: &QueryCacheConfig) -> Self {
        Self {
            store,
            cache: QueryCache::new(config),
        }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// One-shot read of a single document.
    ///
    /// A disabled descriptor settles immediately without touching the
    /// store. Results are cached under the descriptor's key; stale
    /// entries are refetched.
    pub async fn fetch_document<T: DeserializeOwned>(
        &self,
        descriptor: &QueryDescriptor,
    ) -> QueryState<T> {
        if !descriptor.enabled {
            return QueryState::idle();
        }
        let QuerySource::Document(path) = &descriptor.source else {
            return QueryState::failed(AppError::validation(
                "fetch_document requires a document source",
            ));
        };

        if let Some(payload) = self.cache.get_fresh(&descriptor.key).await {
            if let Ok(doc) = serde_json::from_str::<Option<Document>>(&payload) {
                debug!(key = %descriptor.key.render(), "Query served from cache");
                return decode_document(doc);
            }
        }

        match self.store.get(path).await {
            Ok(doc) => {
                self.cache_document(&descriptor.key, &doc).await;
                decode_document(doc)
            }
            Err(error) => QueryState::failed(error),
        }
    }

    /// One-shot read of every document in a collection.
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        descriptor: &QueryDescriptor,
    ) -> QueryState<Vec<T>> {
        if !descriptor.enabled {
            return QueryState::idle();
        }
        let QuerySource::Collection(collection) = &descriptor.source else {
            return QueryState::failed(AppError::validation(
                "fetch_collection requires a collection source",
            ));
        };

        if let Some(payload) = self.cache.get_fresh(&descriptor.key).await {
            if let Ok(docs) = serde_json::from_str::<Vec<Document>>(&payload) {
                debug!(key = %descriptor.key.render(), "Query served from cache");
                return decode_collection(docs);
            }
        }

        match self.store.list(collection).await {
            Ok(entries) => {
                let docs: Vec<Document> = entries.into_iter().map(|(_, doc)| doc).collect();
                if let Ok(payload) = serde_json::to_string(&docs) {
                    self.cache.put(&descriptor.key, payload).await;
                }
                decode_collection(docs)
            }
            Err(error) => QueryState::failed(error),
        }
    }

    /// Perform a mutation.
    ///
    /// On success every cache entry matching an invalidation key is
    /// marked stale before this returns, so code running after the await
    /// observes the invalidated cache. Errors are returned with their
    /// message preserved verbatim.
    pub async fn mutate(&self, request: MutationRequest) -> AppResult<MutationOutcome> {
        let outcome = match request.op {
            MutationOp::Create(doc) => {
                let path = self.store.append(&request.collection, doc.clone()).await?;
                let written = self.store.get(&path).await?;
                MutationOutcome {
                    path,
                    document: written,
                    input: doc,
                }
            }
            MutationOp::Set { id, doc } => {
                let path = request.collection.doc(&id)?;
                self.store.set(&path, doc.clone()).await?;
                let written = self.store.get(&path).await?;
                MutationOutcome {
                    path,
                    document: written,
                    input: doc,
                }
            }
            MutationOp::Update { id, fields } => {
                let path = request.collection.doc(&id)?;
                let written = self.store.update(&path, fields.clone()).await?;
                MutationOutcome {
                    path,
                    document: Some(written),
                    input: fields,
                }
            }
            MutationOp::Delete { id } => {
                let path = request.collection.doc(&id)?;
                self.store.delete(&path).await?;
                MutationOutcome {
                    path,
                    document: None,
                    input: Document::new(),
                }
            }
        };

        for key in &request.invalidate {
            self.cache.mark_stale(key).await;
        }
        Ok(outcome)
    }

    /// [`Self::mutate`] with observer callbacks.
    ///
    /// `on_success` runs after invalidation has been applied, with access
    /// to the server result and the original input; `on_error` receives
    /// the failure verbatim.
    pub async fn mutate_with(
        &self,
        request: MutationRequest,
        on_success: impl FnOnce(&MutationOutcome),
        on_error: impl FnOnce(&AppError),
    ) -> AppResult<MutationOutcome> {
        match self.mutate(request).await {
            Ok(outcome) => {
                on_success(&outcome);
                Ok(outcome)
            }
            Err(error) => {
                on_error(&error);
                Err(error)
            }
        }
    }

    pub(crate) async fn cache_document(&self, key: &QueryKey, doc: &Option<Document>) {
        if let Ok(payload) = serde_json::to_string(doc) {
            self.cache.put(key, payload).await;
        }
    }
}

//! Query descriptors — per-call-site read parameterization.

use examify_core::types::path::{CollectionPath, DocumentPath};
use examify_core::types::query_key::QueryKey;

/// What a descriptor reads from.
#[derive(Debug, Clone)]
pub enum QuerySource {
    /// A single document.
    Document(DocumentPath),
    /// Every document in a collection.
    Collection(CollectionPath),
}

/// Parameterization of one logical read.
///
/// A descriptor with `enabled = false` must never reach the store; a
/// descriptor with `listen = true` selects a subscription over a one-shot
/// read.
#[derive(Debug, Clone)]
pub struct QueryDescriptor {
    /// Cache key uniquely identifying this logical read.
    pub key: QueryKey,
    /// Source document or collection.
    pub source: QuerySource,
    /// Gates execution entirely.
    pub enabled: bool,
    /// Selects subscription semantics.
    pub listen: bool,
}

impl QueryDescriptor {
    /// One-shot read of a single document.
    pub fn document(key: QueryKey, path: DocumentPath) -> Self {
        Self {
            key,
            source: QuerySource::Document(path),
            enabled: true,
            listen: false,
        }
    }

    /// One-shot read of a collection.
    pub fn collection(key: QueryKey, path: CollectionPath) -> Self {
        Self {
            key,
            source: QuerySource::Collection(path),
            enabled: true,
            listen: false,
        }
    }

    /// Switch to subscription semantics.
    pub fn listening(mut self) -> Self {
        self.listen = true;
        self
    }

    /// Gate execution on a caller-side condition.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

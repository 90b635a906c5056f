//! Typed document and collection paths.
//!
//! Paths address records in the remote document store. A document path has
//! an even number of `/`-separated segments (`collection/id[/...]`), a
//! collection path an odd number. Validation happens at construction so
//! that no malformed path ever reaches a store client.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

fn validate_segments(raw: &str) -> AppResult<Vec<&str>> {
    if raw.is_empty() {
        return Err(AppError::validation("Path cannot be empty"));
    }
    if raw.starts_with('/') || raw.ends_with('/') {
        return Err(AppError::validation(format!(
            "Path '{raw}' must not have leading or trailing slashes"
        )));
    }
    let segments: Vec<&str> = raw.split('/').collect();
    for segment in &segments {
        if segment.is_empty() {
            return Err(AppError::validation(format!(
                "Path '{raw}' contains an empty segment"
            )));
        }
    }
    Ok(segments)
}

/// Path to a single document in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// Parse and validate a document path.
    pub fn parse(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();
        let segments = validate_segments(&raw)?;
        if segments.len() % 2 != 0 {
            return Err(AppError::validation(format!(
                "'{raw}' is not a document path (segment count must be even)"
            )));
        }
        Ok(Self(raw))
    }

    /// The raw path string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The document ID (last path segment).
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// The collection this document belongs to.
    pub fn collection(&self) -> CollectionPath {
        let end = self.0.len() - self.id().len() - 1;
        CollectionPath(self.0[..end].to_string())
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path to a collection of documents in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Parse and validate a collection path.
    pub fn parse(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();
        let segments = validate_segments(&raw)?;
        if segments.len() % 2 != 1 {
            return Err(AppError::validation(format!(
                "'{raw}' is not a collection path (segment count must be odd)"
            )));
        }
        Ok(Self(raw))
    }

    /// The raw path string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path to the document with the given ID inside this collection.
    pub fn doc(&self, id: &str) -> AppResult<DocumentPath> {
        if id.is_empty() || id.contains('/') {
            return Err(AppError::validation(format!(
                "'{id}' is not a valid document ID"
            )));
        }
        Ok(DocumentPath(format!("{}/{id}", self.0)))
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

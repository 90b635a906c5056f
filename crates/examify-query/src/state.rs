//! Tri-state query results.

use serde::de::DeserializeOwned;
use serde_json::Value;

use examify_core::error::AppError;
use examify_core::types::document::Document;

/// The tri-state result of a read: loading, data, or error.
///
/// A missing document is represented as `data: None` with no error;
/// not-found is not an error for reads.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    /// Whether the read is still in flight.
    pub is_loading: bool,
    /// The decoded document, if present.
    pub data: Option<T>,
    /// The error, if the read failed.
    pub error: Option<AppError>,
}

impl<T> QueryState<T> {
    /// A read that has not produced anything yet.
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            data: None,
            error: None,
        }
    }

    /// A read that was never issued (descriptor disabled).
    pub fn idle() -> Self {
        Self {
            is_loading: false,
            data: None,
            error: None,
        }
    }

    /// A settled read.
    pub fn ready(data: Option<T>) -> Self {
        Self {
            is_loading: false,
            data,
            error: None,
        }
    }

    /// A failed read.
    pub fn failed(error: AppError) -> Self {
        Self {
            is_loading: false,
            data: None,
            error: Some(error),
        }
    }

    /// Whether the read settled without an error.
    pub fn is_settled(&self) -> bool {
        !self.is_loading && self.error.is_none()
    }
}

/// Decode a raw document read into a typed state.
pub(crate) fn decode_document<T: DeserializeOwned>(doc: Option<Document>) -> QueryState<T> {
    match doc {
        None => QueryState::ready(None),
        Some(doc) => match serde_json::from_value(Value::Object(doc)) {
            Ok(data) => QueryState::ready(Some(data)),
            Err(e) => QueryState::failed(AppError::from(e)),
        },
    }
}

/// Decode a raw collection read into a typed state.
pub(crate) fn decode_collection<T: DeserializeOwned>(docs: Vec<Document>) -> QueryState<Vec<T>> {
    let mut decoded = Vec::with_capacity(docs.len());
    for doc in docs {
        match serde_json::from_value(Value::Object(doc)) {
            Ok(data) => decoded.push(data),
            Err(e) => return QueryState::failed(AppError::from(e)),
        }
    }
    QueryState::ready(Some(decoded))
}

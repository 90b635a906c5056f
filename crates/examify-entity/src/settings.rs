//! Application settings entity model.

use serde::{Deserialize, Serialize};

use examify_core::types::document::Document;

/// The singleton application settings document.
///
/// Read-only from the data layer's perspective; mutated by external
/// administration flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Whether activity records are persisted. Defaults to `true` when
    /// the document or the field is missing (fail-open).
    #[serde(default = "default_true")]
    pub enable_audit_logs: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            enable_audit_logs: true,
        }
    }
}

impl AppSettings {
    /// Resolve settings from a raw document read.
    ///
    /// A missing document, missing field, or undecodable document all
    /// resolve to the defaults.
    pub fn from_document(doc: Option<&Document>) -> Self {
        match doc {
            Some(doc) => serde_json::from_value(serde_json::Value::Object(doc.clone()))
                .unwrap_or_default(),
            None => Self::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

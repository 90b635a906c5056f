//! Settings-gated activity logger.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use examify_core::config::audit::AuditConfig;
use examify_core::result::AppResult;
use examify_core::traits::document_store::DocumentStore;
use examify_core::types::document::{Document, server_timestamp};
use examify_core::types::path::{CollectionPath, DocumentPath};
use examify_entity::activity::{ActivityLogRecord, NewActivityRecord};
use examify_entity::settings::AppSettings;

/// Appends immutable activity records to the log collection.
///
/// Logging is best-effort by contract: no failure here may ever abort
/// the caller's primary operation, and a dropped entry is accepted loss
/// (no retries).
#[derive(Debug, Clone)]
pub struct ActivityLogger {
    /// Document store holding settings and the log collection.
    store: Arc<dyn DocumentStore>,
    /// Path of the singleton settings document.
    settings_path: DocumentPath,
    /// Collection activity records are appended to.
    log_collection: CollectionPath,
}

impl ActivityLogger {
    /// Create a logger from audit configuration.
    pub fn from_config(store: Arc<dyn DocumentStore>, config: &AuditConfig) -> AppResult<Self> {
        Ok(Self {
            store,
            settings_path: DocumentPath::parse(config.settings_path.clone())?,
            log_collection: CollectionPath::parse(config.log_collection.clone())?,
        })
    }

    /// Append one activity record, gated on the settings document.
    ///
    /// Never returns an error: invalid records are dropped, disabled
    /// logging skips silently, and append failures are swallowed with
    /// operator-facing logging only. At most one read and one write per
    /// invocation.
    pub async fn log_activity(&self, record: NewActivityRecord) {
        if let Err(error) = record.check() {
            warn!(%error, "Dropping invalid activity record");
            return;
        }

        if !self.audit_enabled().await {
            debug!(
                action = %record.action,
                entity_type = record.entity_type,
                "Audit logging disabled; skipping record"
            );
            return;
        }

        let doc = match Self::to_document(&record) {
            Ok(doc) => doc,
            Err(error) => {
                warn!(%error, "Dropping unencodable activity record");
                return;
            }
        };

        if let Err(error) = self.store.append(&self.log_collection, doc).await {
            warn!(%error, "Failed to append activity record");
        }
    }

    /// Activity records for one entity, newest first.
    pub async fn entries_for_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> AppResult<Vec<ActivityLogRecord>> {
        let mut records = self.all_entries().await?;
        records.retain(|r| r.entity_type == entity_type && r.entity_id == entity_id);
        Ok(records)
    }

    /// The most recent activity records, newest first.
    pub async fn recent(&self, limit: usize) -> AppResult<Vec<ActivityLogRecord>> {
        let mut records = self.all_entries().await?;
        records.truncate(limit);
        Ok(records)
    }

    /// Resolve the audit flag from the settings document.
    ///
    /// Fail-open: a failed read proceeds as enabled. Blocking the
    /// caller's primary action is worse than losing audit completeness.
    async fn audit_enabled(&self) -> bool {
        match self.store.get(&self.settings_path).await {
            Ok(doc) => AppSettings::from_document(doc.as_ref()).enable_audit_logs,
            Err(error) => {
                warn!(%error, "Settings read failed; proceeding with audit logging enabled");
                true
            }
        }
    }

    async fn all_entries(&self) -> AppResult<Vec<ActivityLogRecord>> {
        let entries = self.store.list(&self.log_collection).await?;
        let mut records = Vec::with_capacity(entries.len());
        for (path, doc) in entries {
            match serde_json::from_value::<ActivityLogRecord>(Value::Object(doc)) {
                Ok(record) => records.push(record),
                Err(error) => {
                    warn!(%path, %error, "Skipping undecodable activity record");
                }
            }
        }
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }

    fn to_document(record: &NewActivityRecord) -> AppResult<Document> {
        let Value::Object(mut doc) = serde_json::to_value(record)? else {
            return Err(examify_core::AppError::internal(
                "Activity record did not encode to an object",
            ));
        };
        doc.insert("timestamp".to_string(), server_timestamp());
        Ok(doc)
    }
}

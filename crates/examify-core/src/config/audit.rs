//! Audit logging configuration.

use serde::{Deserialize, Serialize};

/// Settings-gated audit logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Path of the singleton settings document holding the
    /// `enable_audit_logs` flag.
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
    /// Collection that activity records are appended to.
    #[serde(default = "default_log_collection")]
    pub log_collection: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
            log_collection: default_log_collection(),
        }
    }
}

fn default_settings_path() -> String {
    "settings/app".to_string()
}

fn default_log_collection() -> String {
    "activity_logs".to_string()
}

//! Hosted backend (document store) configuration.

use serde::{Deserialize, Serialize};

/// Document store backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend provider type: `"memory"` or `"rest"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Backend project identifier.
    #[serde(default = "default_project_id")]
    pub project_id: String,
    /// Base URL of the hosted document API (REST provider only).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// API key for the hosted backend. Optional for the in-process
    /// provider; required before the REST provider can be constructed.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds for the REST provider.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            project_id: default_project_id(),
            api_base_url: default_api_base_url(),
            api_key: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_project_id() -> String {
    "examify-dev".to_string()
}

fn default_api_base_url() -> String {
    "http://localhost:8089/v1".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageConfig {
    /// Object store provider type: `"memory"` or `"local"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Maximum upload size in bytes (default 50 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Transfer chunk size in bytes; one progress tick is emitted per
    /// chunk (default 256 KB).
    #[serde(default = "default_chunk_size")]
    pub chunk_size_bytes: u64,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalObjectStorageConfig,
}

impl Default for ObjectStorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            max_upload_size_bytes: default_max_upload(),
            chunk_size_bytes: default_chunk_size(),
            local: LocalObjectStorageConfig::default(),
        }
    }
}

/// Local filesystem object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalObjectStorageConfig {
    /// Root path for locally stored objects.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalObjectStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_max_upload() -> u64 {
    50 * 1024 * 1024
}

fn default_chunk_size() -> u64 {
    256 * 1024
}

fn default_local_root() -> String {
    "data/objects".to_string()
}

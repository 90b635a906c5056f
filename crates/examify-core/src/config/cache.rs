//! Query cache configuration.

use serde::{Deserialize, Serialize};

/// In-memory query cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryCacheConfig {
    /// Maximum number of cached query results.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// TTL for cached query results in seconds.
    #[serde(default = "default_ttl")]
    pub default_ttl_seconds: u64,
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            default_ttl_seconds: default_ttl(),
        }
    }
}

fn default_max_capacity() -> u64 {
    10000
}

fn default_ttl() -> u64 {
    300
}

//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod ai;
pub mod audit;
pub mod backend;
pub mod cache;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

use self::ai::AiConfig;
use self::audit::AuditConfig;
use self::backend::BackendConfig;
use self::cache::QueryCacheConfig;
use self::logging::LoggingConfig;
use self::storage::ObjectStorageConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hosted backend (document store) settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Query cache settings.
    #[serde(default)]
    pub cache: QueryCacheConfig,
    /// Object storage settings.
    #[serde(default)]
    pub storage: ObjectStorageConfig,
    /// Audit logging settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// AI question-generation settings.
    #[serde(default)]
    pub ai: AiConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `EXAMIFY__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("EXAMIFY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

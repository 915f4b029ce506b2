//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a default so an empty configuration is valid.

pub mod auth;
pub mod logging;
pub mod reports;
pub mod seed;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::auth::AuthConfig;
pub use self::logging::LoggingConfig;
pub use self::reports::{ReportsConfig, TransitionPolicy};
pub use self::seed::SeedConfig;
pub use self::store::StoreConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Key-value store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Session token and password hashing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// First-run seeding settings.
    #[serde(default)]
    pub seed: SeedConfig,
    /// Report lifecycle policy.
    #[serde(default)]
    pub reports: ReportsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `CIVICVOICE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Load configuration from an explicit directory.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CIVICVOICE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// In-memory configuration with cheap password hashing, for tests and demos.
    pub fn in_memory() -> Self {
        Self {
            store: StoreConfig {
                provider: "memory".to_string(),
                ..StoreConfig::default()
            },
            auth: AuthConfig {
                argon2_memory_kib: 1024,
                argon2_iterations: 1,
                ..AuthConfig::default()
            },
            ..Self::default()
        }
    }
}

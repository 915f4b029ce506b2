//! Key-value store configuration.

use serde::{Deserialize, Serialize};

/// Key-value store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider type: `"memory"` or `"file"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Directory holding one file per key (file provider only).
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Attempts made by a compare-and-swap update before giving up.
    #[serde(default = "default_cas_attempts")]
    pub cas_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            directory: default_directory(),
            cas_attempts: default_cas_attempts(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_directory() -> String {
    "data/store".to_string()
}

fn default_cas_attempts() -> u32 {
    8
}

//! First-run seeding configuration.

use serde::{Deserialize, Serialize};

/// Controls what the bootstrap step writes into an empty store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Whether bootstrap runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Whether the sample reports are written when no report exists.
    #[serde(default = "default_true")]
    pub sample_reports: bool,
    /// Whether legacy whole-collection slots are imported into per-record keys.
    #[serde(default = "default_true")]
    pub import_legacy: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sample_reports: true,
            import_legacy: true,
        }
    }
}

fn default_true() -> bool {
    true
}

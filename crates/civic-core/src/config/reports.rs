//! Report lifecycle configuration.

use serde::{Deserialize, Serialize};

/// Report lifecycle configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Which status transitions the report service accepts.
    #[serde(default)]
    pub transition_policy: TransitionPolicy,
}

/// Policy applied when an administrator changes a report's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may follow any other, including moving backwards.
    #[default]
    Any,
    /// A report may stay where it is or move later in the lifecycle, never earlier.
    ForwardOnly,
}

impl std::fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionPolicy::Any => write!(f, "any"),
            TransitionPolicy::ForwardOnly => write!(f, "forward_only"),
        }
    }
}

//! Report lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a report sits in its lifecycle.
///
/// Statuses are ordered: `Reported < Processing < ActionTaken < Resolved`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Submitted, not yet looked at.
    #[default]
    Reported,
    /// Under review by the responsible department.
    Processing,
    /// Work has been scheduled or started.
    ActionTaken,
    /// The issue is fixed.
    Resolved,
}

impl ReportStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [ReportStatus; 4] = [
        Self::Reported,
        Self::Processing,
        Self::ActionTaken,
        Self::Resolved,
    ];

    /// Position in the lifecycle (0 = reported).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Reported => 0,
            Self::Processing => 1,
            Self::ActionTaken => 2,
            Self::Resolved => 3,
        }
    }

    /// Whether moving from `from` to `self` goes back in the lifecycle.
    pub fn is_backward_from(&self, from: ReportStatus) -> bool {
        self.rank() < from.rank()
    }

    /// Whether the report still needs attention.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Resolved)
    }

    /// Whether the report is being worked on (processing or action taken).
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Processing | Self::ActionTaken)
    }

    /// Return the status as its stored string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reported => "reported",
            Self::Processing => "processing",
            Self::ActionTaken => "action_taken",
            Self::Resolved => "resolved",
        }
    }

    /// Human-readable label shown to citizens.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Reported => "Reported",
            Self::Processing => "In Review",
            Self::ActionTaken => "Action Taken",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = civic_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reported" => Ok(Self::Reported),
            "processing" => Ok(Self::Processing),
            "action_taken" => Ok(Self::ActionTaken),
            "resolved" => Ok(Self::Resolved),
            _ => Err(civic_core::AppError::validation(format!(
                "Invalid status: '{s}'. Expected one of: reported, processing, action_taken, resolved"
            ))),
        }
    }
}

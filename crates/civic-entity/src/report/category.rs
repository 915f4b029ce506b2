//! Report category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of issue categories a citizen can report under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportCategory {
    /// Potholes, damaged pavement, blocked roads.
    Roads,
    /// Broken streetlights, unsafe structures.
    Safety,
    /// Parks, pollution, trees.
    Environment,
    /// Illegal dumping, missed collections.
    Garbage,
}

impl ReportCategory {
    /// Every category, in display order.
    pub const ALL: [ReportCategory; 4] = [Self::Roads, Self::Safety, Self::Environment, Self::Garbage];

    /// Return the category as its stored string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roads => "roads",
            Self::Safety => "safety",
            Self::Environment => "environment",
            Self::Garbage => "garbage",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Roads => "Roads",
            Self::Safety => "Safety",
            Self::Environment => "Environment",
            Self::Garbage => "Garbage",
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportCategory {
    type Err = civic_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "roads" => Ok(Self::Roads),
            "safety" => Ok(Self::Safety),
            "environment" => Ok(Self::Environment),
            "garbage" => Ok(Self::Garbage),
            _ => Err(civic_core::AppError::validation(format!(
                "Invalid category: '{s}'. Expected one of: roads, safety, environment, garbage"
            ))),
        }
    }
}

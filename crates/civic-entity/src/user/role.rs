//! Identity role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available to an identity.
///
/// Older records spell the roles `USER` and `ADMIN`; both spellings are
/// accepted on read and the lowercase form is always written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A resident who files and follows reports.
    #[default]
    #[serde(alias = "USER", alias = "user", alias = "CITIZEN")]
    Citizen,
    /// A municipal officer who triages and updates reports.
    #[serde(alias = "ADMIN")]
    Admin,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = civic_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "citizen" | "user" => Ok(Self::Citizen),
            "admin" => Ok(Self::Admin),
            _ => Err(civic_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: citizen, admin"
            ))),
        }
    }
}

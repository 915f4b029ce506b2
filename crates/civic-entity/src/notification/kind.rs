//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// What event produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A report owned by the recipient was resolved.
    ReportResolved,
    /// A new report was filed close to the recipient.
    NearbyIssue,
    /// A report owned by the recipient changed status.
    StatusUpdate,
    /// Someone commented on a report owned by the recipient.
    Comment,
}

impl NotificationKind {
    /// Return the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReportResolved => "report_resolved",
            Self::NearbyIssue => "nearby_issue",
            Self::StatusUpdate => "status_update",
            Self::Comment => "comment",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

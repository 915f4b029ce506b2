//! Notification entity model.

use chrono::{DateTime, Utc};
use civic_core::types::{NotificationId, ReportId, UserId};
use serde::{Deserialize, Serialize};

use super::kind::NotificationKind;

/// A notification delivered to an identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient.
    pub user_id: UserId,
    /// Event that triggered the notification.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Report the notification is about, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<ReportId>,
    /// Whether the recipient has read it.
    #[serde(default)]
    pub read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build an unread notification.
    pub fn from_draft(id: NotificationId, draft: NewNotification, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            report_id: draft.report_id,
            read: false,
            created_at: now,
        }
    }

    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.read
    }
}

/// Data required to create a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    /// The recipient.
    pub user_id: UserId,
    /// Event kind.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Related report.
    pub report_id: Option<ReportId>,
}

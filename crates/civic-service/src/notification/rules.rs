//! Notification rules: decides who hears about which report event.

use civic_entity::comment::Comment;
use civic_entity::notification::{NewNotification, NotificationKind};
use civic_entity::report::{Report, ReportStatus};

/// Turns report events into notification drafts for the report owner.
///
/// Rules never touch the store; they return `None` when an event should not
/// produce a notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationRules;

impl NotificationRules {
    /// Creates a new rules engine.
    pub fn new() -> Self {
        Self
    }

    /// Notification for the owner after a status change.
    ///
    /// A change to `resolved` yields `report_resolved`; any other change
    /// yields `status_update`. Re-applying the current status yields nothing.
    pub fn status_changed(
        &self,
        report: &Report,
        previous: ReportStatus,
    ) -> Option<NewNotification> {
        if report.status == previous {
            return None;
        }

        let (kind, title, message) = if report.status == ReportStatus::Resolved {
            (
                NotificationKind::ReportResolved,
                "Report Resolved".to_string(),
                format!("Your report \"{}\" has been resolved.", report.title),
            )
        } else {
            (
                NotificationKind::StatusUpdate,
                "Report Status Updated".to_string(),
                format!(
                    "Your report \"{}\" moved from {} to {}.",
                    report.title,
                    previous.label(),
                    report.status.label()
                ),
            )
        };

        Some(NewNotification {
            user_id: report.user_id.clone(),
            kind,
            title,
            message,
            report_id: Some(report.id.clone()),
        })
    }

    /// Notification for the owner when someone else comments on their report.
    pub fn comment_added(&self, report: &Report, comment: &Comment) -> Option<NewNotification> {
        if comment.user_id == report.user_id {
            return None;
        }

        Some(NewNotification {
            user_id: report.user_id.clone(),
            kind: NotificationKind::Comment,
            title: "New Comment".to_string(),
            message: format!(
                "{} commented on your report \"{}\".",
                comment.username, report.title
            ),
            report_id: Some(report.id.clone()),
        })
    }
}

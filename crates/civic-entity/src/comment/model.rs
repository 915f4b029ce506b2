//! Comment entity model.

use chrono::{DateTime, Utc};
use civic_core::types::{CommentId, ReportId, UserId};
use serde::{Deserialize, Serialize};

/// A comment left on a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique comment identifier.
    pub id: CommentId,
    /// The report being discussed.
    pub report_id: ReportId,
    /// The author.
    pub user_id: UserId,
    /// Author's username at the time of writing.
    pub username: String,
    /// Comment body.
    pub content: String,
    /// When the comment was posted.
    pub created_at: DateTime<Utc>,
    /// Number of identities currently upvoting the comment.
    #[serde(default)]
    pub upvotes: u32,
}

impl Comment {
    /// Build a freshly posted comment with no upvotes.
    pub fn from_draft(id: CommentId, draft: NewComment, now: DateTime<Utc>) -> Self {
        Self {
            id,
            report_id: draft.report_id,
            user_id: draft.user_id,
            username: draft.username,
            content: draft.content,
            created_at: now,
            upvotes: 0,
        }
    }
}

/// Data required to post a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    /// The report being discussed.
    pub report_id: ReportId,
    /// The author.
    pub user_id: UserId,
    /// Author's username.
    pub username: String,
    /// Comment body.
    pub content: String,
}

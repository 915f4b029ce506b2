//! Key builders for every slot CivicVoice persists.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use civic_core::types::{CommentId, NotificationId, ReportId, UserId};

/// Prefix applied to all CivicVoice keys.
const PREFIX: &str = "civicvoice";

// ── Report keys ────────────────────────────────────────────

/// Key of a single report record.
pub fn report(id: &ReportId) -> String {
    format!("{PREFIX}:report:{id}")
}

/// Prefix shared by all report records.
pub fn report_prefix() -> String {
    format!("{PREFIX}:report:")
}

// ── Identity keys ──────────────────────────────────────────

/// Key of a single identity record.
pub fn user(id: &UserId) -> String {
    format!("{PREFIX}:user:{id}")
}

/// Prefix shared by all identity records.
pub fn user_prefix() -> String {
    format!("{PREFIX}:user:")
}

/// Uniqueness index entry for an email address.
pub fn user_by_email(email: &str) -> String {
    format!("{PREFIX}:index:email:{}", email.trim().to_lowercase())
}

/// Uniqueness index entry for a username.
pub fn user_by_username(username: &str) -> String {
    format!("{PREFIX}:index:username:{}", username.trim().to_lowercase())
}

// ── Comment keys ───────────────────────────────────────────

/// Key of a single comment record.
pub fn comment(id: &CommentId) -> String {
    format!("{PREFIX}:comment:{id}")
}

/// Prefix shared by all comment records.
pub fn comment_prefix() -> String {
    format!("{PREFIX}:comment:")
}

/// Marker recording that an identity upvoted a comment.
pub fn upvote(comment_id: &CommentId, user_id: &UserId) -> String {
    format!("{PREFIX}:upvote:{comment_id}:{user_id}")
}

// ── Notification keys ──────────────────────────────────────

/// Key of a single notification record.
pub fn notification(id: &NotificationId) -> String {
    format!("{PREFIX}:notification:{id}")
}

/// Prefix shared by all notification records.
pub fn notification_prefix() -> String {
    format!("{PREFIX}:notification:")
}

// ── Session keys ───────────────────────────────────────────

/// Slot holding the current session token.
pub fn auth_token() -> String {
    format!("{PREFIX}:auth_token")
}

/// Slot holding the public view of the signed-in identity.
pub fn current_user() -> String {
    format!("{PREFIX}:current_user")
}

// ── Legacy whole-collection slots ──────────────────────────

/// Array of every report, as written by older versions.
pub const LEGACY_REPORTS: &str = "civicvoice_reports";

/// Array of every identity, as written by older versions.
pub const LEGACY_USERS: &str = "civicvoice_users";

/// Array of every comment, as written by older versions.
pub const LEGACY_COMMENTS: &str = "civicvoice_comments";

/// Array of every notification, as written by older versions.
pub const LEGACY_NOTIFICATIONS: &str = "civicvoice_notifications";

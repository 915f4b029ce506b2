//! Comment posting, listing and upvotes.

use std::sync::Arc;

use tracing::{info, warn};

use civic_core::error::AppError;
use civic_core::types::{CommentId, ReportId};
use civic_database::repositories::{CommentRepository, ReportRepository};
use civic_entity::comment::{Comment, NewComment};

use crate::context::RequestContext;
use crate::notification::{NotificationRules, NotificationService};

/// Manages comment threads under reports.
#[derive(Debug, Clone)]
pub struct CommentService {
    /// Comment repository.
    comment_repo: Arc<CommentRepository>,
    /// Report repository, to check the report exists and find its owner.
    report_repo: Arc<ReportRepository>,
    /// Delivers owner notifications.
    notifications: Arc<NotificationService>,
    /// Decides which comments notify the owner.
    rules: NotificationRules,
}

impl CommentService {
    /// Creates a new comment service.
    pub fn new(
        comment_repo: Arc<CommentRepository>,
        report_repo: Arc<ReportRepository>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            comment_repo,
            report_repo,
            notifications,
            rules: NotificationRules::new(),
        }
    }

    /// Lists a report's comments, newest first.
    pub async fn list_for_report(&self, report_id: &ReportId) -> Result<Vec<Comment>, AppError> {
        self.comment_repo.list_by_report(report_id).await
    }

    /// Posts a comment as the caller.
    pub async fn add(
        &self,
        ctx: &RequestContext,
        report_id: &ReportId,
        content: &str,
    ) -> Result<Comment, AppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Comment cannot be empty"));
        }
        let report = self
            .report_repo
            .find_by_id(report_id)
            .await?
            .ok_or_else(|| AppError::not_found("Report not found"))?;

        let comment = self
            .comment_repo
            .create(NewComment {
                report_id: report_id.clone(),
                user_id: ctx.user_id.clone(),
                username: ctx.username.clone(),
                content: content.to_string(),
            })
            .await?;
        info!(comment_id = %comment.id, report_id = %report_id, "Comment added");

        if let Some(draft) = self.rules.comment_added(&report, &comment) {
            if let Err(e) = self.notifications.deliver(draft).await {
                warn!(error = %e, "Failed to deliver comment notification");
            }
        }
        Ok(comment)
    }

    /// Toggles the caller's upvote on a comment.
    pub async fn toggle_upvote(
        &self,
        ctx: &RequestContext,
        comment_id: &CommentId,
    ) -> Result<Comment, AppError> {
        self.comment_repo
            .toggle_upvote(comment_id, &ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))
    }

    /// Whether the caller currently upvotes a comment.
    pub async fn has_upvoted(
        &self,
        ctx: &RequestContext,
        comment_id: &CommentId,
    ) -> Result<bool, AppError> {
        self.comment_repo.has_upvoted(comment_id, &ctx.user_id).await
    }
}

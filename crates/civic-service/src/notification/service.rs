//! Notification listing, read state and delivery.

use std::sync::Arc;

use tracing::{debug, info};

use civic_core::error::AppError;
use civic_core::types::NotificationId;
use civic_database::repositories::NotificationRepository;
use civic_entity::notification::{NewNotification, Notification};

use crate::context::RequestContext;

/// Manages the notifications addressed to the signed-in identity.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    notif_repo: Arc<NotificationRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<NotificationRepository>) -> Self {
        Self { notif_repo }
    }

    /// Lists notifications for the current caller, newest first.
    pub async fn list_notifications(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Notification>, AppError> {
        self.notif_repo.list_for_user(&ctx.user_id).await
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<usize, AppError> {
        self.notif_repo.unread_count(&ctx.user_id).await
    }

    /// Marks one of the caller's notifications as read.
    ///
    /// Notifications addressed to someone else are reported as not found.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: &NotificationId,
    ) -> Result<Notification, AppError> {
        self.owned(ctx, notification_id).await?;
        self.notif_repo
            .mark_read(notification_id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Marks all notifications as read for the current caller.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<usize, AppError> {
        let changed = self.notif_repo.mark_all_read(&ctx.user_id).await?;
        debug!(user_id = %ctx.user_id, changed, "Marked all notifications read");
        Ok(changed)
    }

    /// Deletes one of the caller's notifications.
    pub async fn dismiss(
        &self,
        ctx: &RequestContext,
        notification_id: &NotificationId,
    ) -> Result<(), AppError> {
        self.owned(ctx, notification_id).await?;
        self.notif_repo.remove(notification_id).await?;
        Ok(())
    }

    /// Delivers a notification produced by [`NotificationRules`](super::NotificationRules).
    pub async fn deliver(&self, draft: NewNotification) -> Result<Notification, AppError> {
        let notification = self.notif_repo.create(draft).await?;
        info!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            "Notification delivered"
        );
        Ok(notification)
    }

    async fn owned(
        &self,
        ctx: &RequestContext,
        notification_id: &NotificationId,
    ) -> Result<Notification, AppError> {
        self.notif_repo
            .find_by_id(notification_id)
            .await?
            .filter(|n| n.user_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }
}

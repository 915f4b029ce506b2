//! Notification repository implementation.

use chrono::Utc;
use tracing::{debug, info};

use civic_core::error::AppError;
use civic_core::result::AppResult;
use civic_core::types::{NotificationId, UserId};
use civic_entity::notification::{NewNotification, Notification};
use civic_store::{SlotCodec, keys};

/// Repository for notification records.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    codec: SlotCodec,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(codec: SlotCodec) -> Self {
        Self { codec }
    }

    /// Persist a new unread notification.
    pub async fn create(&self, draft: NewNotification) -> AppResult<Notification> {
        let notification = Notification::from_draft(NotificationId::generate(), draft, Utc::now());
        if !self.insert(&notification).await? {
            return Err(AppError::conflict(format!(
                "Notification id already in use: {}",
                notification.id
            )));
        }
        info!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            kind = %notification.kind,
            "Notification created"
        );
        Ok(notification)
    }

    /// Store a fully formed notification unless one with the same id exists.
    pub async fn insert(&self, notification: &Notification) -> AppResult<bool> {
        self.codec
            .insert_new(&keys::notification(&notification.id), notification)
            .await
    }

    /// Find a notification by id.
    pub async fn find_by_id(&self, id: &NotificationId) -> AppResult<Option<Notification>> {
        self.codec.load(&keys::notification(id)).await
    }

    /// Notifications addressed to one identity, newest first.
    pub async fn list_for_user(&self, user_id: &UserId) -> AppResult<Vec<Notification>> {
        let mut notifications: Vec<Notification> = self
            .codec
            .load_prefix::<Notification>(&keys::notification_prefix())
            .await?
            .into_iter()
            .filter(|n| &n.user_id == user_id)
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        debug!(user_id = %user_id, count = notifications.len(), "Listed notifications");
        Ok(notifications)
    }

    /// Number of unread notifications for one identity.
    pub async fn unread_count(&self, user_id: &UserId) -> AppResult<usize> {
        Ok(self
            .list_for_user(user_id)
            .await?
            .iter()
            .filter(|n| n.is_unread())
            .count())
    }

    /// Mark one notification read. Returns `None` if it does not exist.
    pub async fn mark_read(&self, id: &NotificationId) -> AppResult<Option<Notification>> {
        self.codec
            .update::<Notification, _>(&keys::notification(id), |mut notification| {
                notification.read = true;
                Ok(notification)
            })
            .await
    }

    /// Mark every unread notification of an identity read. Returns how many changed.
    pub async fn mark_all_read(&self, user_id: &UserId) -> AppResult<usize> {
        let mut changed = 0;
        for notification in self.list_for_user(user_id).await? {
            if notification.is_unread() && self.mark_read(&notification.id).await?.is_some() {
                changed += 1;
            }
        }
        debug!(user_id = %user_id, changed, "Marked notifications read");
        Ok(changed)
    }

    /// Delete a notification. Returns whether it existed.
    pub async fn remove(&self, id: &NotificationId) -> AppResult<bool> {
        self.codec.remove(&keys::notification(id)).await
    }
}

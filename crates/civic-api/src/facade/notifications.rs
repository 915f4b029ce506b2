//! Notifications facade.

use civic_core::types::NotificationId;
use civic_entity::notification::Notification;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// The signed-in identity's notifications.
#[derive(Debug, Clone)]
pub struct NotificationsApi {
    state: AppState,
}

impl NotificationsApi {
    pub(crate) fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Notifications for the caller, newest first. Empty when signed out.
    pub async fn get_all(&self) -> ApiResult<Vec<Notification>> {
        match AuthUser::optional(&self.state).await? {
            Some(auth) => Ok(self
                .state
                .notification_service
                .list_notifications(&auth)
                .await?),
            None => Ok(Vec::new()),
        }
    }

    /// Unread notifications for the caller. Zero when signed out.
    pub async fn unread_count(&self) -> ApiResult<usize> {
        match AuthUser::optional(&self.state).await? {
            Some(auth) => Ok(self.state.notification_service.unread_count(&auth).await?),
            None => Ok(0),
        }
    }

    /// Marks one notification read.
    pub async fn mark_as_read(&self, id: &str) -> ApiResult<Notification> {
        let auth = AuthUser::require(&self.state).await?;
        Ok(self
            .state
            .notification_service
            .mark_read(&auth, &NotificationId::new(id))
            .await?)
    }

    /// Marks every notification read. Returns how many changed.
    pub async fn mark_all_as_read(&self) -> ApiResult<usize> {
        let auth = AuthUser::require(&self.state).await?;
        Ok(self.state.notification_service.mark_all_read(&auth).await?)
    }

    /// Deletes one notification.
    pub async fn dismiss(&self, id: &str) -> ApiResult<()> {
        let auth = AuthUser::require(&self.state).await?;
        self.state
            .notification_service
            .dismiss(&auth, &NotificationId::new(id))
            .await?;
        Ok(())
    }
}

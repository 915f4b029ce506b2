//! Notification commands.

use clap::{Args, Subcommand};
use tabled::Tabled;

use civic_api::dto::response::CountResponse;
use civic_api::{ApiResult, CivicApi};
use civic_entity::notification::Notification;

use crate::output::{self, OutputFormat};

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationArgs {
    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// List your notifications, newest first
    List,
    /// Count unread notifications
    Unread,
    /// Mark one notification read
    Read {
        /// Notification id
        id: String,
    },
    /// Mark every notification read
    ReadAll,
}

/// Notification display row for table output
#[derive(Debug, Tabled)]
struct NotificationRow {
    /// Notification ID
    id: String,
    /// Kind
    kind: String,
    /// Title
    title: String,
    /// Read
    read: bool,
    /// Received
    created_at: String,
}

impl NotificationRow {
    fn from_notification(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            kind: notification.kind.to_string(),
            title: notification.title.clone(),
            read: notification.read,
            created_at: notification.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute notification commands
pub async fn execute(
    api: &CivicApi,
    args: &NotificationArgs,
    format: OutputFormat,
) -> ApiResult<()> {
    match &args.command {
        NotificationCommand::List => {
            let notifications = api.notifications.get_all().await?;
            output::print_list(&notifications, format, NotificationRow::from_notification);
        }
        NotificationCommand::Unread => {
            let count = api.notifications.unread_count().await?;
            output::print_item(&CountResponse { count }, format);
        }
        NotificationCommand::Read { id } => {
            let notification = api.notifications.mark_as_read(id).await?;
            output::print_item(&notification, format);
        }
        NotificationCommand::ReadAll => {
            let count = api.notifications.mark_all_as_read().await?;
            output::print_item(&CountResponse { count }, format);
        }
    }
    Ok(())
}

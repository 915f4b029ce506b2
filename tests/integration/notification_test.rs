//! Integration tests for the notification inbox.

mod helpers;

use civic_core::ErrorKind;
use civic_entity::report::{ReportCategory, ReportStatus};

use helpers::TestApp;

/// Alice owns a report that an admin moves through two statuses.
async fn inbox_with_two_updates() -> TestApp {
    let app = TestApp::new().await;
    app.sign_up("alice").await;
    let report = app.submit("Pothole", ReportCategory::Roads).await;

    app.sign_up_admin("officer").await;
    for status in [ReportStatus::Processing, ReportStatus::Resolved] {
        app.api
            .reports
            .update_status(report.id.as_str(), status)
            .await
            .unwrap();
    }
    app.sign_in("alice").await;
    app
}

#[tokio::test]
async fn test_signed_out_inbox_is_empty() {
    let app = inbox_with_two_updates().await;
    app.api.auth.logout().await.unwrap();

    assert!(app.api.notifications.get_all().await.unwrap().is_empty());
    assert_eq!(app.api.notifications.unread_count().await.unwrap(), 0);
    let err = app.api.notifications.mark_all_as_read().await.unwrap_err();
    assert!(err.is(ErrorKind::NotAuthenticated));
}

#[tokio::test]
async fn test_status_changes_arrive_newest_first() {
    let app = inbox_with_two_updates().await;

    let inbox = app.api.notifications.get_all().await.unwrap();
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0].title, "Report Resolved");
    assert_eq!(inbox[1].title, "Report Status Updated");
    assert!(inbox.iter().all(|n| n.is_unread()));
}

#[tokio::test]
async fn test_mark_read_and_read_all() {
    let app = inbox_with_two_updates().await;
    let inbox = app.api.notifications.get_all().await.unwrap();

    let read = app
        .api
        .notifications
        .mark_as_read(inbox[0].id.as_str())
        .await
        .unwrap();
    assert!(read.read);
    assert_eq!(app.api.notifications.unread_count().await.unwrap(), 1);

    assert_eq!(app.api.notifications.mark_all_as_read().await.unwrap(), 1);
    assert_eq!(app.api.notifications.unread_count().await.unwrap(), 0);
    assert_eq!(app.api.notifications.mark_all_as_read().await.unwrap(), 0);
}

#[tokio::test]
async fn test_other_identities_cannot_touch_the_inbox() {
    let app = inbox_with_two_updates().await;
    let inbox = app.api.notifications.get_all().await.unwrap();

    app.sign_up("mallory").await;
    let err = app
        .api
        .notifications
        .mark_as_read(inbox[0].id.as_str())
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
    let err = app
        .api
        .notifications
        .dismiss(inbox[1].id.as_str())
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    app.sign_in("alice").await;
    assert_eq!(app.api.notifications.unread_count().await.unwrap(), 2);
    app.api.notifications.dismiss(inbox[1].id.as_str()).await.unwrap();
    assert_eq!(app.api.notifications.get_all().await.unwrap().len(), 1);
}

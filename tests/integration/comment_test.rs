//! Integration tests for comment threads and upvotes.

mod helpers;

use civic_api::dto::request::CreateCommentRequest;
use civic_core::ErrorKind;
use civic_entity::notification::NotificationKind;
use civic_entity::report::ReportCategory;

use helpers::TestApp;

fn comment(report_id: &str, content: &str) -> CreateCommentRequest {
    CreateCommentRequest {
        report_id: report_id.to_string(),
        content: content.to_string(),
    }
}

#[tokio::test]
async fn test_thread_is_newest_first() {
    let app = TestApp::new().await;
    app.sign_up("alice").await;
    let report = app.submit("Pothole", ReportCategory::Roads).await;

    let first = app.api.comments.create(comment(report.id.as_str(), "Still there")).await.unwrap();
    let second = app.api.comments.create(comment(report.id.as_str(), "Getting worse")).await.unwrap();
    assert_eq!(first.username, "alice");
    assert_eq!(first.upvotes, 0);

    let thread = app.api.comments.get_by_report(report.id.as_str()).await.unwrap();
    let ids: Vec<_> = thread.iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    assert!(app.api.comments.get_by_report("missing").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_comment_rules() {
    let app = TestApp::new().await;
    app.sign_up("alice").await;
    let report = app.submit("Pothole", ReportCategory::Roads).await;

    let err = app
        .api
        .comments
        .create(comment(report.id.as_str(), "   "))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));

    let err = app
        .api
        .comments
        .create(comment("no-such-report", "Hello"))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    app.api.auth.logout().await.unwrap();
    let err = app
        .api
        .comments
        .create(comment(report.id.as_str(), "Hello"))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotAuthenticated));
}

#[tokio::test]
async fn test_upvote_toggles_per_identity() {
    let app = TestApp::new().await;
    app.sign_up("alice").await;
    let report = app.submit("Pothole", ReportCategory::Roads).await;
    let posted = app.api.comments.create(comment(report.id.as_str(), "Me too")).await.unwrap();
    let id = posted.id.as_str();

    assert_eq!(app.api.comments.upvote(id).await.unwrap().upvotes, 1);
    assert_eq!(app.api.comments.upvote(id).await.unwrap().upvotes, 0);
    assert_eq!(app.api.comments.upvote(id).await.unwrap().upvotes, 1);

    app.sign_up("bob").await;
    assert_eq!(app.api.comments.upvote(id).await.unwrap().upvotes, 2);

    let err = app.api.comments.upvote("missing").await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_owner_is_notified_of_other_voices_only() {
    let app = TestApp::new().await;
    app.sign_up("alice").await;
    let report = app.submit("Pothole", ReportCategory::Roads).await;
    app.api
        .comments
        .create(comment(report.id.as_str(), "Adding a photo later"))
        .await
        .unwrap();
    assert_eq!(app.api.notifications.unread_count().await.unwrap(), 0);

    app.sign_up("bob").await;
    app.api
        .comments
        .create(comment(report.id.as_str(), "Saw it this morning"))
        .await
        .unwrap();
    assert_eq!(app.api.notifications.unread_count().await.unwrap(), 0);

    app.sign_in("alice").await;
    let inbox = app.api.notifications.get_all().await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::Comment);
    assert_eq!(inbox[0].report_id.as_ref(), Some(&report.id));
}

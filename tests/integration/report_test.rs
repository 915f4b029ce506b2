//! Integration tests for report submission, queries and lifecycle.

mod helpers;

use civic_api::dto::request::UpdateReportRequest;
use civic_api::extractors::ReportQuery;
use civic_core::ErrorKind;
use civic_core::config::{AppConfig, TransitionPolicy};
use civic_core::traits::store::KvStore;
use civic_core::types::{ReportId, UserId};
use civic_entity::report::{ReportCategory, ReportStatus};
use civic_store::keys;
use serde_json::json;

use helpers::{TestApp, pothole_request};

fn query(category: Option<&str>, status: Option<&str>) -> ReportQuery {
    ReportQuery {
        category: category.map(str::to_string),
        status: status.map(str::to_string),
        user_id: None,
    }
}

#[tokio::test]
async fn test_created_report_reads_back_identically() {
    let app = TestApp::new().await;
    let alice = app.sign_up("alice").await;

    let created = app.submit("Pothole on Main Street", ReportCategory::Roads).await;
    assert_eq!(created.status, ReportStatus::Reported);
    assert_eq!(created.user_id, alice.user.id);
    assert_eq!(created.created_at, created.updated_at);
    assert!(!created.urgent);
    assert_eq!(created.department.as_deref(), Some("Municipal Roads Department"));

    let found = app.api.reports.get_by_id(created.id.as_str()).await.unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn test_status_update_refreshes_only_updated_at() {
    let app = TestApp::new().await;
    app.sign_up_admin("officer").await;
    let created = app.submit("Fallen tree", ReportCategory::Environment).await;

    let updated = app
        .api
        .reports
        .update_status(created.id.as_str(), ReportStatus::Processing)
        .await
        .unwrap();
    assert_eq!(updated.status, ReportStatus::Processing);
    assert_eq!(updated.status_label, "In Review");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_filters_and_owner_subset() {
    let app = TestApp::new().await;
    let alice = app.sign_up("alice").await;
    app.submit("Pothole", ReportCategory::Roads).await;
    app.submit("Overflowing bin", ReportCategory::Garbage).await;
    app.sign_up("bob").await;
    app.submit("Cracked kerb", ReportCategory::Roads).await;

    let everything = app.api.reports.get_all(ReportQuery::default()).await.unwrap();
    assert_eq!(everything.len(), 3);
    assert!(everything.windows(2).all(|w| w[0].created_at <= w[1].created_at));

    let all_literal = app
        .api
        .reports
        .get_all(query(Some("all"), Some("all")))
        .await
        .unwrap();
    assert_eq!(all_literal, everything);

    let roads = app.api.reports.get_all(query(Some("roads"), None)).await.unwrap();
    assert_eq!(roads.len(), 2);

    let alices = app
        .api
        .reports
        .get_all(ReportQuery {
            user_id: Some(alice.user.id.to_string()),
            ..ReportQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(alices.len(), 2);
    assert!(alices.iter().all(|r| r.user_id == alice.user.id));

    let mine = app.api.reports.get_mine().await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "Cracked kerb");

    let err = app
        .api
        .reports
        .get_all(query(Some("parks"), None))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));
}

#[tokio::test]
async fn test_signed_out_submission_needs_an_owner() {
    let app = TestApp::new().await;

    let err = app
        .api
        .reports
        .create(pothole_request("Anonymous", ReportCategory::Safety))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotAuthenticated));

    let mut req = pothole_request("Walk-in report", ReportCategory::Safety);
    req.user_id = Some(UserId::new("kiosk"));
    let created = app.api.reports.create(req).await.unwrap();
    assert_eq!(created.user_id, UserId::new("kiosk"));
}

#[tokio::test]
async fn test_privileged_operations() {
    let app = TestApp::new().await;
    app.sign_up("alice").await;
    let report = app.submit("Graffiti", ReportCategory::Safety).await;

    let err = app
        .api
        .reports
        .update_status(report.id.as_str(), ReportStatus::Resolved)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Authorization));
    assert_eq!(err.code(), "FORBIDDEN");

    app.sign_up("bob").await;
    let err = app
        .api
        .reports
        .update(
            report.id.as_str(),
            UpdateReportRequest {
                title: Some("Hijacked".to_string()),
                ..UpdateReportRequest::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Authorization));
    let err = app.api.reports.delete(report.id.as_str()).await.unwrap_err();
    assert!(err.is(ErrorKind::Authorization));

    app.api.auth.logout().await.unwrap();
    let err = app
        .api
        .reports
        .update_status(report.id.as_str(), ReportStatus::Resolved)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotAuthenticated));

    let unchanged = app.api.reports.get_by_id(report.id.as_str()).await.unwrap();
    assert_eq!(unchanged, report);
}

#[tokio::test]
async fn test_owner_edit_moves_location() {
    let app = TestApp::new().await;
    app.sign_up("alice").await;
    let report = app.submit("Broken swing", ReportCategory::Safety).await;

    let updated = app
        .api
        .reports
        .update(
            report.id.as_str(),
            UpdateReportRequest {
                location_lat: Some(12.5),
                location_lng: Some(77.25),
                address: Some("Park Road".to_string()),
                urgent: Some(true),
                ..UpdateReportRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.location.lat, 12.5);
    assert_eq!(updated.location.lng, 77.25);
    assert_eq!(updated.location.address.as_deref(), Some("Park Road"));
    assert!(updated.urgent);
    assert_eq!(updated.title, report.title);
}

#[tokio::test]
async fn test_forward_only_policy_blocks_backward_moves() {
    let mut config = AppConfig::in_memory();
    config.seed.enabled = false;
    config.reports.transition_policy = TransitionPolicy::ForwardOnly;
    let app = TestApp::with_config(config).await;
    app.sign_up_admin("officer").await;
    let report = app.submit("Leaking hydrant", ReportCategory::Environment).await;

    app.api
        .reports
        .update_status(report.id.as_str(), ReportStatus::Resolved)
        .await
        .unwrap();
    let err = app
        .api
        .reports
        .update_status(report.id.as_str(), ReportStatus::Reported)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));

    let current = app.api.reports.get_by_id(report.id.as_str()).await.unwrap();
    assert_eq!(current.status, ReportStatus::Resolved);
}

#[tokio::test]
async fn test_any_policy_allows_reopening() {
    let app = TestApp::new().await;
    app.sign_up_admin("officer").await;
    let report = app.submit("Loose manhole", ReportCategory::Roads).await;

    app.api
        .reports
        .update_status(report.id.as_str(), ReportStatus::Resolved)
        .await
        .unwrap();
    let reopened = app
        .api
        .reports
        .update_status(report.id.as_str(), ReportStatus::Reported)
        .await
        .unwrap();
    assert_eq!(reopened.status, ReportStatus::Reported);
}

#[tokio::test]
async fn test_legacy_flat_location_is_canonicalized() {
    let app = TestApp::new().await;
    let raw = json!({
        "id": "legacy-7",
        "title": "Dark alley",
        "description": "No lights after 8pm",
        "category": "safety",
        "status": "processing",
        "locationLat": 40.7,
        "locationLng": -74.0,
        "address": "Back Lane",
        "userId": "old_user",
        "createdAt": "2024-03-01T10:00:00Z"
    });
    app.store
        .set(&keys::report(&ReportId::new("legacy-7")), &raw.to_string())
        .await
        .unwrap();

    let report = app.api.reports.get_by_id("legacy-7").await.unwrap();
    assert_eq!(report.location.lat, 40.7);
    assert_eq!(report.location.lng, -74.0);
    assert_eq!(report.location.address.as_deref(), Some("Back Lane"));
    assert!(!report.urgent);
    assert_eq!(report.updated_at, report.created_at);
}

#[tokio::test]
async fn test_corrupt_record_reads_as_missing() {
    let app = TestApp::new().await;
    app.sign_up("alice").await;
    let good = app.submit("Pothole", ReportCategory::Roads).await;
    app.store
        .set(&keys::report(&ReportId::new("broken")), "{\"id\": 42")
        .await
        .unwrap();

    let err = app.api.reports.get_by_id("broken").await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    let listed = app.api.reports.get_all(ReportQuery::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, good.id);
}

#[tokio::test]
async fn test_owner_and_admin_can_delete() {
    let app = TestApp::new().await;
    app.sign_up("alice").await;
    let first = app.submit("Pothole", ReportCategory::Roads).await;
    let second = app.submit("Another pothole", ReportCategory::Roads).await;

    app.api.reports.delete(first.id.as_str()).await.unwrap();
    app.sign_up_admin("officer").await;
    app.api.reports.delete(second.id.as_str()).await.unwrap();

    assert!(app.api.reports.get_all(ReportQuery::default()).await.unwrap().is_empty());
    let err = app.api.reports.get_by_id(first.id.as_str()).await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

//! Integration tests for first-run seeding and legacy import.

mod helpers;

use std::sync::Arc;

use civic_api::dto::request::LoginRequest;
use civic_api::extractors::ReportQuery;
use civic_core::config::AppConfig;
use civic_core::traits::store::KvStore;
use civic_core::types::{ReportId, UserId};
use civic_entity::report::ReportStatus;
use civic_entity::user::UserRole;
use civic_store::keys;
use civic_store::memory::MemoryStore;
use serde_json::json;

use helpers::TestApp;

fn demo_login() -> LoginRequest {
    LoginRequest {
        email: "demo@example.com".to_string(),
        password: "demo123".to_string(),
    }
}

#[tokio::test]
async fn test_fresh_store_gets_demo_data() {
    let app = TestApp::seeded().await;

    let demo = app.api.auth.login(demo_login()).await.unwrap();
    assert_eq!(demo.user.id, UserId::new("demo_user"));
    assert_eq!(demo.user.role, UserRole::Citizen);

    let admin = app
        .api
        .auth
        .login(LoginRequest {
            email: "admin@example.com".to_string(),
            password: "admin123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(admin.user.role, UserRole::Admin);

    let reports = app.api.reports.get_all(ReportQuery::default()).await.unwrap();
    let ids: Vec<_> = reports.iter().map(|r| r.id.as_str().to_string()).collect();
    assert_eq!(ids, vec!["3", "2", "1"]);
    let resolved = app.api.reports.get_by_id("3").await.unwrap();
    assert_eq!(resolved.status, ReportStatus::Resolved);
    assert!(resolved.urgent);
}

#[tokio::test]
async fn test_bootstrap_is_idempotent() {
    let app = TestApp::seeded().await;
    let again = app.api.bootstrap().await.unwrap();
    assert!(again.is_noop());
    assert_eq!(app.api.state().user_repo.count().await.unwrap(), 2);
    assert_eq!(app.api.state().report_repo.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_legacy_collections_are_imported_once() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            keys::LEGACY_USERS,
            &json!([{
                "id": "u_legacy",
                "username": "oldtimer",
                "email": "oldtimer@example.com",
                "password": "hunter2",
                "role": "user"
            }])
            .to_string(),
        )
        .await
        .unwrap();
    store
        .set(
            keys::LEGACY_REPORTS,
            &json!([
                {
                    "id": "r_legacy",
                    "title": "Blocked drain",
                    "description": "Water pools after rain",
                    "category": "environment",
                    "status": "action_taken",
                    "locationLat": 51.5,
                    "locationLng": -0.12,
                    "userId": "u_legacy",
                    "createdAt": "2024-05-01T08:00:00Z",
                    "updatedAt": "2024-05-03T08:00:00Z"
                },
                "not a report"
            ])
            .to_string(),
        )
        .await
        .unwrap();

    let app = TestApp::over_store(AppConfig::in_memory(), store).await;

    assert!(!app.store.exists(keys::LEGACY_USERS).await.unwrap());
    assert!(!app.store.exists(keys::LEGACY_REPORTS).await.unwrap());

    // Existing data suppresses the demo seed.
    assert_eq!(app.api.state().user_repo.count().await.unwrap(), 1);
    let reports = app.api.reports.get_all(ReportQuery::default()).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, ReportId::new("r_legacy"));
    assert_eq!(reports[0].location.lat, 51.5);

    let session = app
        .api
        .auth
        .login(LoginRequest {
            email: "oldtimer@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.user.role, UserRole::Citizen);

    assert!(app.api.bootstrap().await.unwrap().is_noop());
}

#[tokio::test]
async fn test_corrupt_legacy_slot_is_discarded() {
    let app = TestApp::new().await;
    app.store.set(keys::LEGACY_COMMENTS, "{\"oops\":").await.unwrap();

    let outcome = app.api.bootstrap().await.unwrap();
    assert_eq!(outcome.discarded_slots, vec![keys::LEGACY_COMMENTS.to_string()]);
    assert_eq!(outcome.imported_comments, 0);
    assert!(!app.store.exists(keys::LEGACY_COMMENTS).await.unwrap());
    assert!(app.api.bootstrap().await.unwrap().is_noop());
}

#[tokio::test]
async fn test_corrupt_identities_are_reseeded() {
    let app = TestApp::seeded().await;
    for id in ["demo_user", "admin_user"] {
        app.store
            .set(&keys::user(&UserId::new(id)), "{\"id\":")
            .await
            .unwrap();
    }
    assert_eq!(app.api.state().user_repo.count().await.unwrap(), 0);

    let outcome = app.api.bootstrap().await.unwrap();
    assert_eq!(outcome.seeded_users, 2);
    assert_eq!(outcome.seeded_reports, 0);

    let demo = app.api.auth.login(demo_login()).await.unwrap();
    assert_eq!(demo.user.id, UserId::new("demo_user"));
}

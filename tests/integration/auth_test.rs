//! Integration tests for registration, login and the session slot.

mod helpers;

use std::sync::Arc;

use civic_api::CivicApi;
use civic_api::dto::request::{LoginRequest, RegisterRequest};
use civic_auth::JwtEncoder;
use civic_core::ErrorKind;
use civic_core::config::{AppConfig, AuthConfig};
use civic_core::traits::store::KvStore;
use civic_core::types::UserId;
use civic_entity::report::{ReportCategory, ReportStatus};
use civic_entity::user::{PublicUser, User, UserRole};
use civic_store::file::FileStore;
use civic_store::keys;

use helpers::TestApp;

fn registration(username: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: "password123".to_string(),
        is_admin: false,
        admin_post: None,
    }
}

#[tokio::test]
async fn test_register_login_and_logout() {
    let app = TestApp::new().await;

    let registered = app.sign_up("alice").await;
    assert_eq!(registered.user.username, "alice");
    assert_eq!(registered.user.role, UserRole::Citizen);
    assert_eq!(app.api.auth.me().await.unwrap(), Some(registered.user.clone()));

    app.api.auth.logout().await.unwrap();
    assert!(app.api.auth.me().await.unwrap().is_none());
    assert!(!app.store.exists(&keys::auth_token()).await.unwrap());

    let session = app
        .api
        .auth
        .login(LoginRequest {
            email: "ALICE@example.com".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.user.id, registered.user.id);
    assert_eq!(app.api.auth.me().await.unwrap(), Some(session.user));
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_in_any_case() {
    let app = TestApp::new().await;
    app.sign_up("alice").await;
    let before = user_count(&app).await;

    let err = app
        .api
        .auth
        .register(registration("alice2", "Alice@Example.COM"))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
    assert_eq!(err.code(), "CONFLICT");
    assert_eq!(user_count(&app).await, before);
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let app = TestApp::new().await;
    app.sign_up("alice").await;

    let err = app
        .api
        .auth
        .register(registration("ALICE", "someone.else@example.com"))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email() {
    let app = TestApp::new().await;
    app.sign_up("alice").await;
    app.api.auth.logout().await.unwrap();

    let err = app
        .api
        .auth
        .login(LoginRequest {
            email: "alice@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Authentication));
    assert_eq!(err.code(), "INVALID_CREDENTIALS");

    let err = app
        .api
        .auth
        .login(LoginRequest {
            email: "nobody@example.com".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
    assert!(app.api.auth.me().await.unwrap().is_none());
}

#[tokio::test]
async fn test_admin_post_is_kept_only_for_admins() {
    let app = TestApp::new().await;

    let citizen = app
        .api
        .auth
        .register(RegisterRequest {
            admin_post: Some("Mayor".to_string()),
            ..registration("carol", "carol@example.com")
        })
        .await
        .unwrap();
    assert!(citizen.user.admin_post.is_none());
    assert!(!app.api.auth.is_admin().await.unwrap());

    let admin = app.sign_up_admin("dana").await;
    assert_eq!(admin.user.role, UserRole::Admin);
    assert_eq!(admin.user.admin_post.as_deref(), Some("Ward Officer"));
    assert!(app.api.auth.is_admin().await.unwrap());
}

#[tokio::test]
async fn test_demo_token_claiming_admin_is_normalized() {
    let app = TestApp::new().await;
    app.sign_up_admin("officer").await;
    let report = app.submit("Broken bench", ReportCategory::Safety).await;

    let forged_claim = PublicUser {
        id: UserId::new("someone_else"),
        username: "demo".to_string(),
        email: "demo@example.com".to_string(),
        role: UserRole::Admin,
        admin_post: Some("Mayor".to_string()),
    };
    let token = JwtEncoder::new(&app.config.auth).issue(&forged_claim).unwrap();
    app.api
        .state()
        .session_store
        .save(&token, &forged_claim)
        .await
        .unwrap();

    let me = app.api.auth.me().await.unwrap().unwrap();
    assert_eq!(me.id, UserId::new("demo_user"));
    assert_eq!(me.role, UserRole::Citizen);
    assert!(me.admin_post.is_none());
    assert!(!app.api.auth.is_admin().await.unwrap());

    let err = app
        .api
        .reports
        .update_status(report.id.as_str(), ReportStatus::Resolved)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Authorization));
}

#[tokio::test]
async fn test_token_signed_with_another_secret_is_ignored() {
    let app = TestApp::new().await;
    let admin = app.sign_up_admin("officer").await;
    let report = app.submit("Flooded underpass", ReportCategory::Environment).await;

    let foreign = JwtEncoder::new(&AuthConfig {
        token_secret: "not-the-server-secret".to_string(),
        ..app.config.auth.clone()
    });
    let token = foreign.issue(&admin.user).unwrap();
    app.api
        .state()
        .session_store
        .save(&token, &admin.user)
        .await
        .unwrap();

    assert!(app.api.auth.me().await.unwrap().is_none());
    assert!(!app.api.auth.is_admin().await.unwrap());
    let err = app
        .api
        .reports
        .update_status(report.id.as_str(), ReportStatus::Resolved)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotAuthenticated));
    assert_eq!(err.code(), "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn test_garbage_token_is_not_a_session() {
    let app = TestApp::new().await;
    app.store
        .set(&keys::auth_token(), "\"not.a.token\"")
        .await
        .unwrap();

    assert!(app.api.auth.me().await.unwrap().is_none());
    let err = app.api.reports.get_mine().await.unwrap_err();
    assert!(err.is(ErrorKind::NotAuthenticated));
}

#[tokio::test]
async fn test_legacy_plaintext_password_is_upgraded_on_login() {
    let app = TestApp::new().await;
    let legacy = User {
        id: UserId::new("legacy_1"),
        username: "oldtimer".to_string(),
        email: "oldtimer@example.com".to_string(),
        password_hash: None,
        password: Some("hunter2".to_string()),
        role: UserRole::Citizen,
        admin_post: None,
        created_at: None,
    };
    app.api.state().user_repo.create(legacy.clone()).await.unwrap();

    app.api
        .auth
        .login(LoginRequest {
            email: "oldtimer@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

    let stored = app
        .api
        .state()
        .user_repo
        .find_by_id(&legacy.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password.is_none());
    assert!(stored.password_hash.is_some());

    // The hash now carries the credential.
    app.api.auth.logout().await.unwrap();
    app.api
        .auth
        .login(LoginRequest {
            email: "oldtimer@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_long_identities_over_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path()).await.unwrap());
    let mut config = AppConfig::in_memory();
    config.seed.enabled = false;
    let api = CivicApi::with_store(config, store.clone()).await.unwrap();

    let username = "u".repeat(200);
    let email = format!("{}@example.com", "a".repeat(180));
    let registered = api
        .auth
        .register(registration(&username, &email))
        .await
        .unwrap();
    assert_eq!(registered.user.username, username);

    let err = api
        .auth
        .register(registration(&username.to_uppercase(), "other@example.com"))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));

    api.auth.logout().await.unwrap();
    let session = api
        .auth
        .login(LoginRequest {
            email: email.to_uppercase(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.user.id, registered.user.id);
    assert_eq!(api.auth.me().await.unwrap(), Some(session.user));

    let indexes = store.keys_with_prefix("civicvoice:index:").await.unwrap();
    assert_eq!(indexes.len(), 2);
}

async fn user_count(app: &TestApp) -> usize {
    app.api.state().user_repo.count().await.unwrap()
}

//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use civic_api::CivicApi;
use civic_api::dto::request::{CreateReportRequest, LoginRequest, RegisterRequest};
use civic_api::dto::response::{AuthResponse, ReportResponse};
use civic_core::config::AppConfig;
use civic_entity::report::{Location, ReportCategory};
use civic_store::memory::MemoryStore;

/// Test application context over a private in-memory store.
pub struct TestApp {
    /// The facade under test
    pub api: CivicApi,
    /// The backing store, for direct inspection and tampering
    pub store: Arc<MemoryStore>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// An empty application: no demo identities, no sample reports.
    pub async fn new() -> Self {
        let mut config = AppConfig::in_memory();
        config.seed.enabled = false;
        Self::with_config(config).await
    }

    /// An application bootstrapped with the demo identities and sample reports.
    pub async fn seeded() -> Self {
        Self::with_config(AppConfig::in_memory()).await
    }

    /// An application with a custom configuration.
    pub async fn with_config(config: AppConfig) -> Self {
        Self::over_store(config, Arc::new(MemoryStore::new())).await
    }

    /// An application over an existing store, e.g. one prepared with legacy data.
    pub async fn over_store(config: AppConfig, store: Arc<MemoryStore>) -> Self {
        let api = CivicApi::with_store(config.clone(), store.clone())
            .await
            .expect("Failed to start application");
        Self { api, store, config }
    }

    /// Register a citizen and leave it signed in.
    pub async fn sign_up(&self, username: &str) -> AuthResponse {
        self.api
            .auth
            .register(RegisterRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "password123".to_string(),
                is_admin: false,
                admin_post: None,
            })
            .await
            .expect("Failed to register citizen")
    }

    /// Register an admin and leave it signed in.
    pub async fn sign_up_admin(&self, username: &str) -> AuthResponse {
        self.api
            .auth
            .register(RegisterRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "password123".to_string(),
                is_admin: true,
                admin_post: Some("Ward Officer".to_string()),
            })
            .await
            .expect("Failed to register admin")
    }

    /// Switch the session to a previously registered identity.
    pub async fn sign_in(&self, username: &str) -> AuthResponse {
        self.api
            .auth
            .login(LoginRequest {
                email: format!("{username}@example.com"),
                password: "password123".to_string(),
            })
            .await
            .expect("Failed to sign in")
    }

    /// Submit a report as whoever is signed in.
    pub async fn submit(&self, title: &str, category: ReportCategory) -> ReportResponse {
        self.api
            .reports
            .create(pothole_request(title, category))
            .await
            .expect("Failed to submit report")
    }
}

/// A report request at a fixed downtown location.
pub fn pothole_request(title: &str, category: ReportCategory) -> CreateReportRequest {
    CreateReportRequest::new(
        title,
        "Reported during an integration test",
        category,
        Location::new(40.7128, -74.006, Some("Main Street".to_string())),
    )
}

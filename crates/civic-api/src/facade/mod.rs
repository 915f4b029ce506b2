//! The facade groups and their entry point.

pub mod auth;
pub mod comments;
pub mod notifications;
pub mod reports;
pub mod stats;

use std::sync::Arc;

use tracing::info;

use civic_core::config::AppConfig;
use civic_core::traits::store::KvStore;
use civic_database::{BootstrapReport, Datastore};

use crate::error::ApiResult;
use crate::state::AppState;

pub use auth::AuthApi;
pub use comments::CommentsApi;
pub use notifications::NotificationsApi;
pub use reports::ReportsApi;
pub use stats::StatsApi;

/// Entry point bundling every facade group over one [`AppState`].
#[derive(Debug, Clone)]
pub struct CivicApi {
    state: AppState,
    /// Registration, login and the current session.
    pub auth: AuthApi,
    /// Report submission, queries and lifecycle.
    pub reports: ReportsApi,
    /// Comment threads and upvotes.
    pub comments: CommentsApi,
    /// The signed-in identity's notifications.
    pub notifications: NotificationsApi,
    /// Dashboard statistics.
    pub stats: StatsApi,
}

impl CivicApi {
    /// Builds the facade over prepared state. Does not bootstrap.
    pub fn new(state: AppState) -> Self {
        Self {
            auth: AuthApi::new(state.clone()),
            reports: ReportsApi::new(state.clone()),
            comments: CommentsApi::new(state.clone()),
            notifications: NotificationsApi::new(state.clone()),
            stats: StatsApi::new(state.clone()),
            state,
        }
    }

    /// Connects the configured store, wires every component and runs bootstrap.
    pub async fn connect(config: AppConfig) -> ApiResult<Self> {
        let state = AppState::new(config).await?;
        Self::started(state).await
    }

    /// Like [`connect`](Self::connect) but over an existing store.
    pub async fn with_store(config: AppConfig, store: Arc<dyn KvStore>) -> ApiResult<Self> {
        let datastore = Datastore::from_store(store, config.store.cas_attempts);
        let state = AppState::with_datastore(config, datastore)?;
        Self::started(state).await
    }

    async fn started(state: AppState) -> ApiResult<Self> {
        let api = Self::new(state);
        let outcome = api.bootstrap().await?;
        if !outcome.is_noop() {
            info!(
                seeded_users = outcome.seeded_users,
                seeded_reports = outcome.seeded_reports,
                imported_reports = outcome.imported_reports,
                "Store bootstrapped"
            );
        }
        Ok(api)
    }

    /// Runs the import and seeding step again.
    pub async fn bootstrap(&self) -> ApiResult<BootstrapReport> {
        Ok(self.state.bootstrap().await?)
    }

    /// Whether the backing store answers.
    pub async fn health_check(&self) -> ApiResult<bool> {
        Ok(self.state.datastore.health_check().await?)
    }

    /// Shared application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

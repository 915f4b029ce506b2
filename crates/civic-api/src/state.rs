//! Application state shared by every facade group.

use std::sync::Arc;

use tracing::info;

use civic_auth::{JwtDecoder, JwtEncoder, PasswordHasher, SessionManager, SessionStore};
use civic_core::config::AppConfig;
use civic_core::result::AppResult;
use civic_database::repositories::{
    CommentRepository, NotificationRepository, ReportRepository, UserRepository,
};
use civic_database::{BootstrapReport, Datastore, run_bootstrap};
use civic_service::{
    CommentService, NotificationService, ReportService, StatsService, TransitionGuard,
};

/// Application state containing all shared dependencies.
///
/// All fields are `Arc`-wrapped (or cheap handles) for cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Key-value datastore handle
    pub datastore: Datastore,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Register/login flows
    pub session_manager: Arc<SessionManager>,
    /// Current session slot
    pub session_store: Arc<SessionStore>,

    // ── Repositories ─────────────────────────────────────────
    /// Identity repository
    pub user_repo: Arc<UserRepository>,
    /// Report repository
    pub report_repo: Arc<ReportRepository>,
    /// Comment repository
    pub comment_repo: Arc<CommentRepository>,
    /// Notification repository
    pub notification_repo: Arc<NotificationRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Report lifecycle service
    pub report_service: Arc<ReportService>,
    /// Comment service
    pub comment_service: Arc<CommentService>,
    /// Notification service
    pub notification_service: Arc<NotificationService>,
    /// Statistics service
    pub stats_service: Arc<StatsService>,
}

impl AppState {
    /// Connect the configured store and wire every component.
    pub async fn new(config: AppConfig) -> AppResult<Self> {
        let datastore = Datastore::connect(&config.store).await?;
        Self::with_datastore(config, datastore)
    }

    /// Wire every component over an existing datastore.
    pub fn with_datastore(config: AppConfig, datastore: Datastore) -> AppResult<Self> {
        let codec = datastore.codec().clone();

        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let password_hasher = Arc::new(PasswordHasher::new(&config.auth)?);

        let user_repo = Arc::new(UserRepository::new(codec.clone()));
        let report_repo = Arc::new(ReportRepository::new(codec.clone()));
        let comment_repo = Arc::new(CommentRepository::new(codec.clone()));
        let notification_repo = Arc::new(NotificationRepository::new(codec.clone()));

        let session_manager = Arc::new(SessionManager::new(
            jwt_encoder.clone(),
            jwt_decoder.clone(),
            user_repo.clone(),
            password_hasher.clone(),
        ));
        let session_store = Arc::new(SessionStore::new(codec));

        let notification_service = Arc::new(NotificationService::new(notification_repo.clone()));
        let report_service = Arc::new(ReportService::new(
            report_repo.clone(),
            notification_service.clone(),
            TransitionGuard::new(config.reports.transition_policy),
        ));
        let comment_service = Arc::new(CommentService::new(
            comment_repo.clone(),
            report_repo.clone(),
            notification_service.clone(),
        ));
        let stats_service = Arc::new(StatsService::new(report_repo.clone()));

        info!(
            transition_policy = %config.reports.transition_policy,
            "Application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            datastore,
            jwt_encoder,
            jwt_decoder,
            password_hasher,
            session_manager,
            session_store,
            user_repo,
            report_repo,
            comment_repo,
            notification_repo,
            report_service,
            comment_service,
            notification_service,
            stats_service,
        })
    }

    /// Run the first-run import and seeding step.
    pub async fn bootstrap(&self) -> AppResult<BootstrapReport> {
        run_bootstrap(&self.datastore, self.password_hasher.as_ref(), &self.config.seed).await
    }
}

//! First-run bootstrap: legacy import and demo seeding.
//!
//! Safe to run on every start. Legacy whole-collection slots are exploded
//! into per-record keys and removed, then demo identities and sample
//! reports are created only when no well-formed record of that kind exists.

use chrono::{Duration, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use civic_core::config::SeedConfig;
use civic_core::error::ErrorKind;
use civic_core::result::AppResult;
use civic_core::traits::CredentialHasher;
use civic_core::types::{ReportId, UserId};
use civic_entity::comment::Comment;
use civic_entity::notification::Notification;
use civic_entity::report::{Location, Report, ReportCategory, ReportStatus};
use civic_entity::user::{User, UserRole};
use civic_store::keys;

use crate::connection::Datastore;
use crate::repositories::{
    CommentRepository, NotificationRepository, ReportRepository, UserRepository,
};

/// Owner id of the sample reports.
pub const SAMPLE_OWNER: &str = "sample_user";

/// Outcome of a bootstrap run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapReport {
    /// Reports moved out of the legacy collection.
    pub imported_reports: usize,
    /// Identities moved out of the legacy collection.
    pub imported_users: usize,
    /// Comments moved out of the legacy collection.
    pub imported_comments: usize,
    /// Notifications moved out of the legacy collection.
    pub imported_notifications: usize,
    /// Legacy entries dropped as malformed or already present.
    pub skipped_records: usize,
    /// Legacy slots removed because they did not hold an array.
    pub discarded_slots: Vec<String>,
    /// Demo identities created.
    pub seeded_users: usize,
    /// Sample reports created.
    pub seeded_reports: usize,
}

impl BootstrapReport {
    /// Whether the run changed nothing.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Import legacy data and seed demo records as configured.
pub async fn run_bootstrap(
    datastore: &Datastore,
    hasher: &dyn CredentialHasher,
    config: &SeedConfig,
) -> AppResult<BootstrapReport> {
    let codec = datastore.codec().clone();
    let users = UserRepository::new(codec.clone());
    let reports = ReportRepository::new(codec.clone());
    let comments = CommentRepository::new(codec.clone());
    let notifications = NotificationRepository::new(codec);

    let mut outcome = BootstrapReport::default();

    if config.import_legacy {
        if let Some(records) = take_legacy::<User>(datastore, keys::LEGACY_USERS, &mut outcome).await? {
            for user in records {
                match users.create(user).await {
                    Ok(_) => outcome.imported_users += 1,
                    Err(e) if e.is(ErrorKind::Conflict) => outcome.skipped_records += 1,
                    Err(e) => return Err(e),
                }
            }
            datastore.store().delete(keys::LEGACY_USERS).await?;
        }

        if let Some(records) = take_legacy::<Report>(datastore, keys::LEGACY_REPORTS, &mut outcome).await? {
            for report in records {
                if reports.insert(&report).await? {
                    outcome.imported_reports += 1;
                } else {
                    outcome.skipped_records += 1;
                }
            }
            datastore.store().delete(keys::LEGACY_REPORTS).await?;
        }

        if let Some(records) = take_legacy::<Comment>(datastore, keys::LEGACY_COMMENTS, &mut outcome).await? {
            for comment in records {
                if comments.insert(&comment).await? {
                    outcome.imported_comments += 1;
                } else {
                    outcome.skipped_records += 1;
                }
            }
            datastore.store().delete(keys::LEGACY_COMMENTS).await?;
        }

        if let Some(records) =
            take_legacy::<Notification>(datastore, keys::LEGACY_NOTIFICATIONS, &mut outcome).await?
        {
            for notification in records {
                if notifications.insert(&notification).await? {
                    outcome.imported_notifications += 1;
                } else {
                    outcome.skipped_records += 1;
                }
            }
            datastore.store().delete(keys::LEGACY_NOTIFICATIONS).await?;
        }
    }

    if config.enabled && users.count().await? == 0 {
        for user in demo_identities(hasher)? {
            users.create(user).await?;
            outcome.seeded_users += 1;
        }
        info!(count = outcome.seeded_users, "Seeded demo identities");
    }

    if config.enabled && config.sample_reports && reports.count().await? == 0 {
        for report in sample_reports() {
            if reports.insert(&report).await? {
                outcome.seeded_reports += 1;
            }
        }
        info!(count = outcome.seeded_reports, "Seeded sample reports");
    }

    if !outcome.is_noop() {
        info!(?outcome, "Bootstrap complete");
    }
    Ok(outcome)
}

/// Parse a legacy collection slot.
///
/// Returns `None` when the slot is absent. A slot that does not hold a JSON
/// array is removed and recorded as discarded; malformed elements are
/// skipped.
async fn take_legacy<T: DeserializeOwned>(
    datastore: &Datastore,
    slot: &str,
    outcome: &mut BootstrapReport,
) -> AppResult<Option<Vec<T>>> {
    let Some(raw) = datastore.store().get(slot).await? else {
        return Ok(None);
    };

    let items = match serde_json::from_str::<Option<Vec<serde_json::Value>>>(&raw) {
        Ok(items) => items.unwrap_or_default(),
        Err(e) => {
            warn!(slot, error = %e, "Discarding corrupt legacy collection");
            datastore.store().delete(slot).await?;
            outcome.discarded_slots.push(slot.to_string());
            return Ok(None);
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(slot, error = %e, "Skipping malformed legacy record");
                outcome.skipped_records += 1;
            }
        }
    }
    info!(slot, count = records.len(), "Importing legacy collection");
    Ok(Some(records))
}

fn demo_identities(hasher: &dyn CredentialHasher) -> AppResult<Vec<User>> {
    let now = Utc::now();
    Ok(vec![
        User {
            id: UserId::new("demo_user"),
            username: "demo".to_string(),
            email: "demo@example.com".to_string(),
            password_hash: Some(hasher.hash_password("demo123")?),
            password: None,
            role: UserRole::Citizen,
            admin_post: None,
            created_at: Some(now),
        },
        User {
            id: UserId::new("admin_user"),
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: Some(hasher.hash_password("admin123")?),
            password: None,
            role: UserRole::Admin,
            admin_post: Some("City Administrator".to_string()),
            created_at: Some(now),
        },
    ])
}

fn sample_reports() -> Vec<Report> {
    let now = Utc::now();
    let sample = |id: &str,
                  title: &str,
                  description: &str,
                  category: ReportCategory,
                  status: ReportStatus,
                  days_old: i64,
                  location: Location,
                  urgent: bool| Report {
        id: ReportId::new(id),
        title: title.to_string(),
        description: description.to_string(),
        category,
        subcategory: None,
        area: None,
        status,
        image_url: None,
        location,
        user_id: UserId::new(SAMPLE_OWNER),
        created_at: now - Duration::days(days_old),
        updated_at: now,
        urgent,
    };

    vec![
        sample(
            "1",
            "Pothole on Main Street",
            "Large pothole near the intersection causing traffic issues",
            ReportCategory::Roads,
            ReportStatus::Processing,
            2,
            Location::new(40.7128, -74.006, Some("Main Street, NYC".to_string())),
            false,
        ),
        sample(
            "2",
            "Broken Streetlight",
            "Streetlight not working on Oak Avenue",
            ReportCategory::Safety,
            ReportStatus::ActionTaken,
            5,
            Location::new(40.715, -74.008, Some("Oak Avenue, NYC".to_string())),
            true,
        ),
        sample(
            "3",
            "Illegal Dumping Site",
            "Garbage illegally dumped in the park",
            ReportCategory::Garbage,
            ReportStatus::Resolved,
            10,
            Location::new(40.710, -74.005, Some("Central Park, NYC".to_string())),
            true,
        ),
    ]
}

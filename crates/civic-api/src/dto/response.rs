//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use civic_auth::AuthSession;
use civic_core::types::{ReportId, UserId};
use civic_entity::department::Department;
use civic_entity::report::{Location, Report, ReportCategory, ReportStatus};
use civic_entity::user::PublicUser;

/// Register/login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed session token.
    pub token: String,
    /// The signed-in identity.
    pub user: PublicUser,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user: session.user,
        }
    }
}

/// Public report shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: ReportId,
    pub title: String,
    pub description: String,
    pub category: ReportCategory,
    /// Display name of the category.
    pub category_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    pub status: ReportStatus,
    /// Display name of the status, e.g. "In Review".
    pub status_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub location: Location,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub urgent: bool,
    /// Department the report is routed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self {
            category_label: report.category.label().to_string(),
            status_label: report.status.label().to_string(),
            department: Department::for_category(report.category).map(|d| d.name.to_string()),
            id: report.id,
            title: report.title,
            description: report.description,
            category: report.category,
            subcategory: report.subcategory,
            area: report.area,
            status: report.status,
            image_url: report.image_url,
            location: report.location,
            user_id: report.user_id,
            created_at: report.created_at,
            updated_at: report.updated_at,
            urgent: report.urgent,
        }
    }
}

/// Count response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CountResponse {
    /// Count value.
    pub count: usize,
}

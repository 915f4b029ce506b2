//! Request DTOs.

use serde::{Deserialize, Serialize};

use civic_auth::Registration;
use civic_core::types::UserId;
use civic_entity::report::{
    Location, NewReport, ReportCategory, ReportPatch, ReportStatus, canonical_location,
};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Whether an admin account is requested.
    #[serde(default)]
    pub is_admin: bool,
    /// Official post, kept only for admins.
    #[serde(default)]
    pub admin_post: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            is_admin: req.is_admin,
            admin_post: req.admin_post,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email, matched case-insensitively.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Report submission body.
///
/// The location may be given either as a nested `location` object or as
/// flat `locationLat` / `locationLng` / `address` fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub title: String,
    pub description: String,
    pub category: ReportCategory,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    /// Initial status, `reported` when absent.
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub location_lat: Option<f64>,
    #[serde(default)]
    pub location_lng: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub urgent: Option<bool>,
    /// Owner, used only when nobody is signed in.
    #[serde(default)]
    pub user_id: Option<UserId>,
}

impl CreateReportRequest {
    /// A minimal request with a nested location.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: ReportCategory,
        location: Location,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category,
            subcategory: None,
            area: None,
            status: None,
            image_url: None,
            location: Some(location),
            location_lat: None,
            location_lng: None,
            address: None,
            urgent: None,
            user_id: None,
        }
    }

    /// Builds the canonical draft owned by `owner`.
    pub fn into_draft(self, owner: UserId) -> NewReport {
        let location = canonical_location(
            self.location,
            self.location_lat,
            self.location_lng,
            self.address,
            self.area.as_deref(),
        );
        NewReport {
            title: self.title,
            description: self.description,
            category: self.category,
            subcategory: self.subcategory,
            area: self.area,
            status: self.status.unwrap_or_default(),
            image_url: self.image_url,
            location,
            user_id: owner,
            urgent: self.urgent.unwrap_or(false),
        }
    }
}

/// Partial report update body. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<ReportCategory>,
    pub subcategory: Option<String>,
    pub area: Option<String>,
    pub status: Option<ReportStatus>,
    pub image_url: Option<String>,
    pub location: Option<Location>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub address: Option<String>,
    pub urgent: Option<bool>,
}

impl From<UpdateReportRequest> for ReportPatch {
    fn from(req: UpdateReportRequest) -> Self {
        let moves = req.location.is_some() || req.location_lat.is_some() || req.location_lng.is_some();
        let location = moves.then(|| {
            canonical_location(
                req.location,
                req.location_lat,
                req.location_lng,
                req.address,
                req.area.as_deref(),
            )
        });
        Self {
            title: req.title,
            description: req.description,
            category: req.category,
            subcategory: req.subcategory,
            area: req.area,
            status: req.status,
            image_url: req.image_url,
            location,
            urgent: req.urgent,
        }
    }
}

/// Comment submission body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    /// The report being discussed.
    pub report_id: String,
    /// Comment text.
    pub content: String,
}

//! Report entity model.

use chrono::{DateTime, Utc};
use civic_core::types::{ReportId, UserId};
use serde::{Deserialize, Serialize};

use super::category::ReportCategory;
use super::location::Location;
use super::status::ReportStatus;
use super::stored::StoredReport;

/// Milliseconds in one day.
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// A citizen-submitted issue report in its canonical shape.
///
/// Deserialization goes through [`StoredReport`], so every report read back
/// from the store has a location and an explicit `urgent` flag regardless of
/// which shape it was written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredReport")]
pub struct Report {
    /// Unique report identifier.
    pub id: ReportId,
    /// Short headline.
    pub title: String,
    /// Free-text description of the issue.
    pub description: String,
    /// Issue category.
    pub category: ReportCategory,
    /// Optional finer-grained category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Optional locality (neighbourhood, ward).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Lifecycle status.
    pub status: ReportStatus,
    /// Reference to an attached photo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Where the issue is.
    pub location: Location,
    /// The identity that submitted the report.
    pub user_id: UserId,
    /// When the report was submitted.
    pub created_at: DateTime<Utc>,
    /// When the report was last changed.
    pub updated_at: DateTime<Utc>,
    /// Flagged as needing urgent attention.
    pub urgent: bool,
}

impl Report {
    /// Build a freshly submitted report from a draft.
    pub fn from_draft(id: ReportId, draft: NewReport, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            subcategory: draft.subcategory,
            area: draft.area,
            status: draft.status,
            image_url: draft.image_url,
            location: draft.location,
            user_id: draft.user_id,
            created_at: now,
            updated_at: now,
            urgent: draft.urgent,
        }
    }

    /// Whether the report is owned by the given identity.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Days between submission and the last update, as a fraction.
    pub fn elapsed_days(&self) -> f64 {
        let millis = (self.updated_at - self.created_at).num_milliseconds();
        millis as f64 / MILLIS_PER_DAY
    }
}

/// Data required to submit a new report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    /// Short headline.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Issue category.
    pub category: ReportCategory,
    /// Optional finer-grained category.
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Optional locality.
    #[serde(default)]
    pub area: Option<String>,
    /// Initial status, `reported` unless the caller says otherwise.
    #[serde(default)]
    pub status: ReportStatus,
    /// Photo reference.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Canonical location.
    pub location: Location,
    /// The submitting identity.
    pub user_id: UserId,
    /// Urgent flag.
    #[serde(default)]
    pub urgent: bool,
}

/// Partial update to an existing report. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPatch {
    /// New headline.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<ReportCategory>,
    /// New subcategory.
    pub subcategory: Option<String>,
    /// New locality.
    pub area: Option<String>,
    /// New status.
    pub status: Option<ReportStatus>,
    /// New photo reference.
    pub image_url: Option<String>,
    /// New location.
    pub location: Option<Location>,
    /// New urgent flag.
    pub urgent: Option<bool>,
}

impl ReportPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.area.is_none()
            && self.status.is_none()
            && self.image_url.is_none()
            && self.location.is_none()
            && self.urgent.is_none()
    }

    /// Merge the patch into a report. Identity and timestamps are untouched.
    pub fn apply_to(&self, report: &mut Report) {
        if let Some(title) = &self.title {
            report.title = title.clone();
        }
        if let Some(description) = &self.description {
            report.description = description.clone();
        }
        if let Some(category) = self.category {
            report.category = category;
        }
        if let Some(subcategory) = &self.subcategory {
            report.subcategory = Some(subcategory.clone());
        }
        if let Some(area) = &self.area {
            report.area = Some(area.clone());
        }
        if let Some(status) = self.status {
            report.status = status;
        }
        if let Some(image_url) = &self.image_url {
            report.image_url = Some(image_url.clone());
        }
        if let Some(location) = &self.location {
            report.location = location.clone();
        }
        if let Some(urgent) = self.urgent {
            report.urgent = urgent;
        }
    }
}

/// Exact-match narrowing applied when listing reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilter {
    /// Only this category.
    pub category: Option<ReportCategory>,
    /// Only this status.
    pub status: Option<ReportStatus>,
    /// Only reports owned by this identity.
    pub user_id: Option<UserId>,
}

impl ReportFilter {
    /// Filter on the owning identity.
    pub fn owned_by(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    /// Whether a report passes every set criterion.
    pub fn matches(&self, report: &Report) -> bool {
        self.category.is_none_or(|c| report.category == c)
            && self.status.is_none_or(|s| report.status == s)
            && self.user_id.as_ref().is_none_or(|u| &report.user_id == u)
    }
}

//! The on-disk shape of a report and its canonicalization.
//!
//! Reports have been written in several shapes over time: with a nested
//! `location` object, with flat `locationLat` / `locationLng` / `address`
//! fields, or with no location at all, and with or without the `urgent`
//! flag. [`StoredReport`] accepts all of them and converts into the single
//! canonical [`Report`].

use chrono::{DateTime, Utc};
use civic_core::types::{ReportId, UserId};
use serde::Deserialize;

use super::category::ReportCategory;
use super::location::Location;
use super::model::Report;
use super::status::ReportStatus;

/// Every accepted persisted shape of a report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredReport {
    pub id: ReportId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: ReportCategory,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub status: ReportStatus,
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
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub urgent: Option<bool>,
}

/// Resolve the canonical location from whichever fields a record carries.
///
/// A nested `location` wins. Otherwise flat coordinates are folded into one,
/// and with no coordinates at all the result is `{0, 0}` at `address` or,
/// failing that, `area`.
pub fn canonical_location(
    location: Option<Location>,
    lat: Option<f64>,
    lng: Option<f64>,
    address: Option<String>,
    area: Option<&str>,
) -> Location {
    if let Some(location) = location {
        return location;
    }
    let address = address.or_else(|| area.map(str::to_string));
    match (lat, lng) {
        (None, None) => Location::unknown(address),
        (lat, lng) => Location::new(lat.unwrap_or(0.0), lng.unwrap_or(0.0), address),
    }
}

impl From<StoredReport> for Report {
    fn from(stored: StoredReport) -> Self {
        let location = canonical_location(
            stored.location,
            stored.location_lat,
            stored.location_lng,
            stored.address,
            stored.area.as_deref(),
        );
        Self {
            id: stored.id,
            title: stored.title,
            description: stored.description,
            category: stored.category,
            subcategory: stored.subcategory,
            area: stored.area,
            status: stored.status,
            image_url: stored.image_url,
            location,
            user_id: stored.user_id,
            created_at: stored.created_at,
            updated_at: stored.updated_at.unwrap_or(stored.created_at),
            urgent: stored.urgent.unwrap_or(false),
        }
    }
}

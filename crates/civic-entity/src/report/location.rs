//! Geographic location attached to a report.

use serde::{Deserialize, Serialize};

/// A point on the map with an optional street address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Street address or locality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    /// Create a location.
    pub fn new(lat: f64, lng: f64, address: Option<String>) -> Self {
        Self { lat, lng, address }
    }

    /// The placeholder location used when a record has none.
    pub fn unknown(address: Option<String>) -> Self {
        Self::new(0.0, 0.0, address)
    }
}

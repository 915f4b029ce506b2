//! Report list query parameters.

use serde::{Deserialize, Serialize};

use civic_core::error::AppError;
use civic_core::types::UserId;
use civic_entity::report::{ReportCategory, ReportFilter, ReportStatus};

/// Loosely typed report filters as a front end sends them.
///
/// Empty values and the literal `"all"` mean "no filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// Category name.
    pub category: Option<String>,
    /// Status name.
    pub status: Option<String>,
    /// Owning identity.
    pub user_id: Option<String>,
}

impl ReportQuery {
    /// Converts into a typed filter, rejecting unknown category or status names.
    pub fn into_filter(self) -> Result<ReportFilter, AppError> {
        Ok(ReportFilter {
            category: selected(self.category)
                .map(|c| c.parse::<ReportCategory>())
                .transpose()?,
            status: selected(self.status)
                .map(|s| s.parse::<ReportStatus>())
                .transpose()?,
            user_id: selected(self.user_id).map(UserId::new),
        })
    }
}

fn selected(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

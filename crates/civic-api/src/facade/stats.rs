//! Stats facade.

use civic_core::types::UserId;
use civic_service::stats::{CategoryTrend, MonthlyTrend, ProfileSummary, Stats, StatusByCategory};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Dashboard statistics, computed fresh on every call.
#[derive(Debug, Clone)]
pub struct StatsApi {
    state: AppState,
}

impl StatsApi {
    pub(crate) fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Headline figures over every report.
    pub async fn get(&self) -> ApiResult<Stats> {
        Ok(self.state.stats_service.stats(None).await?)
    }

    /// Headline figures over one identity's reports.
    pub async fn get_for_user(&self, user_id: &str) -> ApiResult<Stats> {
        let owner = UserId::new(user_id);
        Ok(self.state.stats_service.stats(Some(&owner)).await?)
    }

    /// Reported and resolved counts for the last six months.
    pub async fn monthly_trends(&self) -> ApiResult<Vec<MonthlyTrend>> {
        Ok(self.state.stats_service.monthly_trends().await?)
    }

    /// Per-category submissions for the last six months.
    pub async fn category_trends(&self) -> ApiResult<Vec<CategoryTrend>> {
        Ok(self.state.stats_service.category_trends().await?)
    }

    /// Status breakdown per category.
    pub async fn status_by_category(&self) -> ApiResult<StatusByCategory> {
        Ok(self.state.stats_service.status_by_category().await?)
    }

    /// The signed-in caller's profile summary and badges.
    pub async fn profile(&self) -> ApiResult<ProfileSummary> {
        let auth = AuthUser::require(&self.state).await?;
        Ok(self.state.stats_service.profile(&auth).await?)
    }
}

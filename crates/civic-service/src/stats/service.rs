//! Statistics service.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use civic_core::error::AppError;
use civic_core::types::UserId;
use civic_database::repositories::ReportRepository;
use civic_entity::report::ReportFilter;

use super::aggregate::{
    self, CategoryTrend, MonthlyTrend, ProfileSummary, Stats, StatusByCategory,
};
use crate::context::RequestContext;

/// Computes dashboard statistics on demand from the current reports.
#[derive(Debug, Clone)]
pub struct StatsService {
    /// Report repository.
    report_repo: Arc<ReportRepository>,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(report_repo: Arc<ReportRepository>) -> Self {
        Self { report_repo }
    }

    /// Headline figures over every report, or one owner's reports.
    pub async fn stats(&self, owner: Option<&UserId>) -> Result<Stats, AppError> {
        let filter = ReportFilter {
            user_id: owner.cloned(),
            ..ReportFilter::default()
        };
        let reports = self.report_repo.list_all(&filter).await?;
        let stats = aggregate::summarize(&reports);
        debug!(
            total = stats.total_reports,
            resolved = stats.resolved,
            "Computed report statistics"
        );
        Ok(stats)
    }

    /// Reported and resolved counts for the last six months.
    pub async fn monthly_trends(&self) -> Result<Vec<MonthlyTrend>, AppError> {
        let now = Utc::now();
        let reports = self
            .report_repo
            .list_created_between(aggregate::trend_start(now), now)
            .await?;
        Ok(aggregate::monthly_trends(&reports, now))
    }

    /// Per-category submissions for the last six months.
    pub async fn category_trends(&self) -> Result<Vec<CategoryTrend>, AppError> {
        let now = Utc::now();
        let reports = self
            .report_repo
            .list_created_between(aggregate::trend_start(now), now)
            .await?;
        Ok(aggregate::category_trends(&reports, now))
    }

    /// Status breakdown per category.
    pub async fn status_by_category(&self) -> Result<StatusByCategory, AppError> {
        let reports = self.report_repo.list_all(&ReportFilter::default()).await?;
        Ok(aggregate::status_by_category(&reports))
    }

    /// The caller's profile summary and badges.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<ProfileSummary, AppError> {
        let reports = self.report_repo.list_by_owner(&ctx.user_id).await?;
        Ok(aggregate::profile_summary(&reports))
    }
}

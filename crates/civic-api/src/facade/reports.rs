//! Reports facade.

use civic_core::error::AppError;
use civic_core::types::ReportId;
use civic_entity::report::ReportStatus;

use crate::dto::request::{CreateReportRequest, UpdateReportRequest};
use crate::dto::response::ReportResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ReportQuery};
use crate::state::AppState;

/// Report submission, queries and lifecycle.
#[derive(Debug, Clone)]
pub struct ReportsApi {
    state: AppState,
}

impl ReportsApi {
    pub(crate) fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Lists reports, oldest first. `"all"` in any filter means no filter.
    pub async fn get_all(&self, query: ReportQuery) -> ApiResult<Vec<ReportResponse>> {
        let filter = query.into_filter()?;
        let reports = self.state.report_service.list(&filter).await?;
        Ok(reports.into_iter().map(ReportResponse::from).collect())
    }

    /// The signed-in caller's own reports.
    pub async fn get_mine(&self) -> ApiResult<Vec<ReportResponse>> {
        let auth = AuthUser::require(&self.state).await?;
        let reports = self.state.report_service.list_mine(&auth).await?;
        Ok(reports.into_iter().map(ReportResponse::from).collect())
    }

    /// Gets one report.
    pub async fn get_by_id(&self, id: &str) -> ApiResult<ReportResponse> {
        let report = self.state.report_service.get(&ReportId::new(id)).await?;
        Ok(report.into())
    }

    /// Submits a report.
    ///
    /// The report is owned by the signed-in caller. When signed out, the
    /// request must name its owner.
    pub async fn create(&self, mut req: CreateReportRequest) -> ApiResult<ReportResponse> {
        let owner = match AuthUser::optional(&self.state).await? {
            Some(auth) => auth.0.user_id,
            None => req
                .user_id
                .take()
                .ok_or_else(|| AppError::not_authenticated("Sign in to submit a report"))?,
        };
        let report = self
            .state
            .report_service
            .submit(req.into_draft(owner))
            .await?;
        Ok(report.into())
    }

    /// Edits a report. Owner or admin.
    pub async fn update(&self, id: &str, req: UpdateReportRequest) -> ApiResult<ReportResponse> {
        let auth = AuthUser::require(&self.state).await?;
        let report = self
            .state
            .report_service
            .update(&auth, &ReportId::new(id), &req.into())
            .await?;
        Ok(report.into())
    }

    /// Changes a report's status. Admin only.
    pub async fn update_status(&self, id: &str, status: ReportStatus) -> ApiResult<ReportResponse> {
        let auth = AuthUser::require(&self.state).await?;
        let report = self
            .state
            .report_service
            .update_status(&auth, &ReportId::new(id), status)
            .await?;
        Ok(report.into())
    }

    /// Deletes a report. Owner or admin.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let auth = AuthUser::require(&self.state).await?;
        self.state
            .report_service
            .delete(&auth, &ReportId::new(id))
            .await?;
        Ok(())
    }
}

//! Report submission, queries and lifecycle changes.

use std::sync::Arc;

use tracing::{info, warn};

use civic_core::error::AppError;
use civic_core::types::ReportId;
use civic_database::repositories::ReportRepository;
use civic_entity::department::Department;
use civic_entity::notification::NewNotification;
use civic_entity::report::{NewReport, Report, ReportFilter, ReportPatch, ReportStatus};

use super::policy::TransitionGuard;
use crate::context::RequestContext;
use crate::notification::{NotificationRules, NotificationService};

/// Manages the report lifecycle on behalf of citizens and administrators.
#[derive(Debug, Clone)]
pub struct ReportService {
    /// Report repository.
    report_repo: Arc<ReportRepository>,
    /// Delivers owner notifications.
    notifications: Arc<NotificationService>,
    /// Decides which events notify the owner.
    rules: NotificationRules,
    /// Status transition policy.
    guard: TransitionGuard,
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(
        report_repo: Arc<ReportRepository>,
        notifications: Arc<NotificationService>,
        guard: TransitionGuard,
    ) -> Self {
        Self {
            report_repo,
            notifications,
            rules: NotificationRules::new(),
            guard,
        }
    }

    /// Lists reports passing `filter`, oldest first.
    pub async fn list(&self, filter: &ReportFilter) -> Result<Vec<Report>, AppError> {
        self.report_repo.list_all(filter).await
    }

    /// Lists the caller's own reports.
    pub async fn list_mine(&self, ctx: &RequestContext) -> Result<Vec<Report>, AppError> {
        self.report_repo.list_by_owner(&ctx.user_id).await
    }

    /// Gets a report by id.
    pub async fn get(&self, id: &ReportId) -> Result<Report, AppError> {
        self.report_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Report not found"))
    }

    /// Submits a new report.
    pub async fn submit(&self, draft: NewReport) -> Result<Report, AppError> {
        let report = self.report_repo.create(draft).await?;
        if let Some(department) = Department::for_category(report.category) {
            info!(
                report_id = %report.id,
                department = department.id,
                "Report routed to {}",
                department.name
            );
        }
        Ok(report)
    }

    /// Applies a partial update.
    ///
    /// Only the owner or an admin may edit a report. A status carried in the
    /// patch is treated like [`update_status`](Self::update_status): it
    /// requires an admin and is subject to the transition policy.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &ReportId,
        patch: &ReportPatch,
    ) -> Result<Report, AppError> {
        let current = self.get(id).await?;
        if !ctx.can_manage(&current.user_id) {
            return Err(AppError::authorization(
                "Only the report owner or an admin can edit this report",
            ));
        }
        if patch.status.is_some_and(|s| s != current.status) && !ctx.is_admin() {
            return Err(AppError::authorization("Admin access required"));
        }

        let guard = self.guard;
        let mut previous = None;
        let updated = self
            .report_repo
            .modify(id, |report| {
                if let Some(status) = patch.status {
                    guard.check(report.status, status)?;
                }
                previous = Some(report.status);
                patch.apply_to(report);
                Ok(())
            })
            .await?
            .ok_or_else(|| AppError::not_found("Report not found"))?;

        info!(report_id = %id, actor = %ctx.user_id, "Report updated");
        if let Some(previous) = previous {
            self.notify(self.rules.status_changed(&updated, previous)).await;
        }
        Ok(updated)
    }

    /// Changes a report's status. Admin only.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: &ReportId,
        status: ReportStatus,
    ) -> Result<Report, AppError> {
        if !ctx.is_admin() {
            return Err(AppError::authorization("Admin access required"));
        }

        let guard = self.guard;
        let mut previous = None;
        let updated = self
            .report_repo
            .modify(id, |report| {
                guard.check(report.status, status)?;
                previous = Some(report.status);
                report.status = status;
                Ok(())
            })
            .await?
            .ok_or_else(|| AppError::not_found("Report not found"))?;

        info!(report_id = %id, %status, actor = %ctx.user_id, "Report status updated");
        if let Some(previous) = previous {
            self.notify(self.rules.status_changed(&updated, previous)).await;
        }
        Ok(updated)
    }

    /// Deletes a report. Owner or admin only.
    pub async fn delete(&self, ctx: &RequestContext, id: &ReportId) -> Result<(), AppError> {
        let report = self.get(id).await?;
        if !ctx.can_manage(&report.user_id) {
            return Err(AppError::authorization(
                "Only the report owner or an admin can delete this report",
            ));
        }
        if !self.report_repo.remove(id).await? {
            return Err(AppError::not_found("Report not found"));
        }
        info!(report_id = %id, actor = %ctx.user_id, "Report deleted");
        Ok(())
    }

    /// The department a report is routed to.
    pub fn department_for(&self, report: &Report) -> Option<&'static Department> {
        Department::for_category(report.category)
    }

    async fn notify(&self, draft: Option<NewNotification>) {
        let Some(draft) = draft else {
            return;
        };
        if let Err(e) = self.notifications.deliver(draft).await {
            warn!(error = %e, "Failed to deliver report notification");
        }
    }
}

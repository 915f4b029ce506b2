//! Report repository implementation.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use civic_core::error::AppError;
use civic_core::result::AppResult;
use civic_core::types::{ReportId, UserId};
use civic_entity::report::{NewReport, Report, ReportFilter, ReportPatch, ReportStatus};
use civic_store::{SlotCodec, keys};

/// Repository for report CRUD and query operations.
///
/// Each report lives under its own key, so writers touching different
/// reports never contend.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    codec: SlotCodec,
}

impl ReportRepository {
    /// Create a new report repository.
    pub fn new(codec: SlotCodec) -> Self {
        Self { codec }
    }

    /// Persist a new report with a fresh id and `createdAt == updatedAt == now`.
    pub async fn create(&self, draft: NewReport) -> AppResult<Report> {
        let report = Report::from_draft(ReportId::generate(), draft, Utc::now());
        if !self.insert(&report).await? {
            return Err(AppError::conflict(format!(
                "Report id already in use: {}",
                report.id
            )));
        }
        info!(report_id = %report.id, category = %report.category, "Report created");
        Ok(report)
    }

    /// Store a fully formed report unless one with the same id exists.
    /// Returns whether it was written.
    pub async fn insert(&self, report: &Report) -> AppResult<bool> {
        self.codec.insert_new(&keys::report(&report.id), report).await
    }

    /// Find a report by id.
    pub async fn find_by_id(&self, id: &ReportId) -> AppResult<Option<Report>> {
        self.codec.load(&keys::report(id)).await
    }

    /// Every stored report passing `filter`, oldest first.
    pub async fn list_all(&self, filter: &ReportFilter) -> AppResult<Vec<Report>> {
        let mut reports: Vec<Report> = self
            .codec
            .load_prefix::<Report>(&keys::report_prefix())
            .await?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();
        reports.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        debug!(count = reports.len(), "Listed reports");
        Ok(reports)
    }

    /// Reports submitted by one identity, oldest first.
    pub async fn list_by_owner(&self, user_id: &UserId) -> AppResult<Vec<Report>> {
        self.list_all(&ReportFilter::owned_by(user_id.clone())).await
    }

    /// Reports submitted within `[start, end]`, oldest first.
    pub async fn list_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Report>> {
        let reports = self.list_all(&ReportFilter::default()).await?;
        Ok(reports
            .into_iter()
            .filter(|r| r.created_at >= start && r.created_at <= end)
            .collect())
    }

    /// Number of well-formed reports.
    pub async fn count(&self) -> AppResult<usize> {
        Ok(self
            .codec
            .load_prefix::<Report>(&keys::report_prefix())
            .await?
            .len())
    }

    /// Atomically modify a report and refresh `updatedAt`.
    ///
    /// `change` may reject the modification with an error, in which case
    /// nothing is written. Returns `None` if the report does not exist.
    pub async fn modify<F>(&self, id: &ReportId, mut change: F) -> AppResult<Option<Report>>
    where
        F: FnMut(&mut Report) -> AppResult<()> + Send,
    {
        self.codec
            .update::<Report, _>(&keys::report(id), |mut report| {
                change(&mut report)?;
                report.updated_at = Utc::now().max(report.created_at);
                Ok(report)
            })
            .await
    }

    /// Replace a report's status.
    pub async fn update_status(
        &self,
        id: &ReportId,
        status: ReportStatus,
    ) -> AppResult<Option<Report>> {
        let updated = self
            .modify(id, |report| {
                report.status = status;
                Ok(())
            })
            .await?;
        if updated.is_some() {
            info!(report_id = %id, %status, "Report status updated");
        }
        Ok(updated)
    }

    /// Merge a partial update into a report.
    pub async fn update(&self, id: &ReportId, patch: &ReportPatch) -> AppResult<Option<Report>> {
        self.modify(id, |report| {
            patch.apply_to(report);
            Ok(())
        })
        .await
    }

    /// Delete a report. Returns whether it existed.
    pub async fn remove(&self, id: &ReportId) -> AppResult<bool> {
        let removed = self.codec.remove(&keys::report(id)).await?;
        if removed {
            info!(report_id = %id, "Report deleted");
        }
        Ok(removed)
    }
}

//! Pure aggregation over a slice of reports.
//!
//! Nothing here touches the store; every figure is recomputed from the
//! reports handed in, so results always reflect the current collection.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use civic_entity::report::{Report, ReportCategory, ReportStatus};

/// Number of calendar months covered by the trend series, current month included.
pub const TREND_MONTHS: i32 = 6;

/// Report counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub roads: usize,
    pub safety: usize,
    pub environment: usize,
    pub garbage: usize,
}

impl CategoryCounts {
    fn slot(&mut self, category: ReportCategory) -> &mut usize {
        match category {
            ReportCategory::Roads => &mut self.roads,
            ReportCategory::Safety => &mut self.safety,
            ReportCategory::Environment => &mut self.environment,
            ReportCategory::Garbage => &mut self.garbage,
        }
    }

    /// Count one more report in `category`.
    pub fn add(&mut self, category: ReportCategory) {
        *self.slot(category) += 1;
    }

    /// The count for `category`.
    pub fn get(&self, category: ReportCategory) -> usize {
        match category {
            ReportCategory::Roads => self.roads,
            ReportCategory::Safety => self.safety,
            ReportCategory::Environment => self.environment,
            ReportCategory::Garbage => self.garbage,
        }
    }
}

/// Report counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub reported: usize,
    pub processing: usize,
    pub action_taken: usize,
    pub resolved: usize,
}

impl StatusCounts {
    /// Count one more report in `status`.
    pub fn add(&mut self, status: ReportStatus) {
        match status {
            ReportStatus::Reported => self.reported += 1,
            ReportStatus::Processing => self.processing += 1,
            ReportStatus::ActionTaken => self.action_taken += 1,
            ReportStatus::Resolved => self.resolved += 1,
        }
    }
}

/// Headline dashboard figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Every report in scope.
    pub total_reports: usize,
    /// Reports in `resolved`.
    pub resolved: usize,
    /// Reports in `processing` or `action_taken`.
    pub processing: usize,
    /// Per-category counts.
    pub by_category: CategoryCounts,
    /// Mean days from submission to last update over resolved reports,
    /// rounded to one decimal.
    pub avg_response_time: f64,
}

/// Reported and resolved counts for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTrend {
    /// Month label, e.g. `"Jan 2025"`.
    pub month: String,
    pub reported: usize,
    pub resolved: usize,
}

/// Per-category submissions for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTrend {
    /// Month label, e.g. `"Jan 2025"`.
    pub month: String,
    #[serde(flatten)]
    pub counts: CategoryCounts,
}

/// Status breakdown for each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusByCategory {
    pub roads: StatusCounts,
    pub safety: StatusCounts,
    pub environment: StatusCounts,
    pub garbage: StatusCounts,
}

impl StatusByCategory {
    /// The breakdown for `category`.
    pub fn get(&self, category: ReportCategory) -> &StatusCounts {
        match category {
            ReportCategory::Roads => &self.roads,
            ReportCategory::Safety => &self.safety,
            ReportCategory::Environment => &self.environment,
            ReportCategory::Garbage => &self.garbage,
        }
    }

    fn get_mut(&mut self, category: ReportCategory) -> &mut StatusCounts {
        match category {
            ReportCategory::Roads => &mut self.roads,
            ReportCategory::Safety => &mut self.safety,
            ReportCategory::Environment => &mut self.environment,
            ReportCategory::Garbage => &mut self.garbage,
        }
    }
}

/// A citizen's own track record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub total: usize,
    pub resolved: usize,
    /// Reports not yet resolved.
    pub active: usize,
    pub by_category: CategoryCounts,
    /// Earned badge names.
    pub badges: Vec<String>,
}

/// Compute the headline figures.
pub fn summarize(reports: &[Report]) -> Stats {
    let mut stats = Stats {
        total_reports: reports.len(),
        ..Stats::default()
    };

    let mut resolved_days = 0.0;
    for report in reports {
        stats.by_category.add(report.category);
        if report.status.is_in_progress() {
            stats.processing += 1;
        }
        if report.status == ReportStatus::Resolved {
            stats.resolved += 1;
            resolved_days += report.elapsed_days();
        }
    }

    if stats.resolved > 0 {
        let mean = resolved_days / stats.resolved as f64;
        stats.avg_response_time = (mean * 10.0).round() / 10.0;
    }
    stats
}

/// Reported and resolved counts for the last [`TREND_MONTHS`] months, oldest first.
pub fn monthly_trends(reports: &[Report], now: DateTime<Utc>) -> Vec<MonthlyTrend> {
    let window = trend_window(now);
    let mut trends: Vec<MonthlyTrend> = window
        .iter()
        .map(|month| MonthlyTrend {
            month: month_label(*month),
            reported: 0,
            resolved: 0,
        })
        .collect();

    for report in reports {
        if let Some(slot) = window_slot(&window, report.created_at) {
            trends[slot].reported += 1;
            if report.status == ReportStatus::Resolved {
                trends[slot].resolved += 1;
            }
        }
    }
    trends
}

/// Per-category submissions for the last [`TREND_MONTHS`] months, oldest first.
pub fn category_trends(reports: &[Report], now: DateTime<Utc>) -> Vec<CategoryTrend> {
    let window = trend_window(now);
    let mut trends: Vec<CategoryTrend> = window
        .iter()
        .map(|month| CategoryTrend {
            month: month_label(*month),
            counts: CategoryCounts::default(),
        })
        .collect();

    for report in reports {
        if let Some(slot) = window_slot(&window, report.created_at) {
            trends[slot].counts.add(report.category);
        }
    }
    trends
}

/// Status breakdown per category over every report.
pub fn status_by_category(reports: &[Report]) -> StatusByCategory {
    let mut breakdown = StatusByCategory::default();
    for report in reports {
        breakdown.get_mut(report.category).add(report.status);
    }
    breakdown
}

/// A citizen's summary over their own reports.
pub fn profile_summary(reports: &[Report]) -> ProfileSummary {
    let mut summary = ProfileSummary {
        total: reports.len(),
        ..ProfileSummary::default()
    };
    for report in reports {
        summary.by_category.add(report.category);
        if report.status.is_open() {
            summary.active += 1;
        } else {
            summary.resolved += 1;
        }
    }
    summary.badges = badges_for(summary.total, summary.resolved);
    summary
}

/// Badges earned for a given number of submitted and resolved reports.
pub fn badges_for(total: usize, resolved: usize) -> Vec<String> {
    let earned = [
        (resolved >= 10, "City Champion"),
        (total >= 5, "Active Citizen"),
        (resolved >= 5, "Problem Solver"),
        (total >= 20, "Community Hero"),
    ];
    earned
        .into_iter()
        .filter(|(won, _)| *won)
        .map(|(_, badge)| badge.to_string())
        .collect()
}

/// Start of the oldest month in the trend window.
pub fn trend_start(now: DateTime<Utc>) -> DateTime<Utc> {
    trend_window(now)
        .first()
        .and_then(|&(year, month)| NaiveDate::from_ymd_opt(year, month, 1))
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|start| start.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// `(year, month)` pairs for the trend window, oldest first.
fn trend_window(now: DateTime<Utc>) -> Vec<(i32, u32)> {
    let current = now.year() * 12 + now.month0() as i32;
    (0..TREND_MONTHS)
        .rev()
        .map(|back| {
            let index = current - back;
            (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
        })
        .collect()
}

fn window_slot(window: &[(i32, u32)], at: DateTime<Utc>) -> Option<usize> {
    window
        .iter()
        .position(|&(year, month)| at.year() == year && at.month() == month)
}

fn month_label((year, month): (i32, u32)) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_default()
}

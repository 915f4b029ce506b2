//! Statistics commands.

use clap::Args;
use serde::Serialize;

use civic_api::{ApiResult, CivicApi};
use civic_service::stats::{CategoryTrend, MonthlyTrend, Stats, StatusByCategory};

use crate::output::{self, OutputFormat};

/// Arguments for `stats`
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Include six-month trends and the status breakdown
    #[arg(long)]
    pub trends: bool,
    /// Show the signed-in identity's profile summary instead
    #[arg(long, conflicts_with_all = ["trends", "user"])]
    pub profile: bool,
    /// Restrict the headline figures to one identity's reports
    #[arg(long)]
    pub user: Option<String>,
}

/// Headline figures with the optional trend series.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Dashboard {
    #[serde(flatten)]
    stats: Stats,
    #[serde(skip_serializing_if = "Option::is_none")]
    monthly_trends: Option<Vec<MonthlyTrend>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_trends: Option<Vec<CategoryTrend>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_by_category: Option<StatusByCategory>,
}

/// Execute the stats command
pub async fn execute(api: &CivicApi, args: &StatsArgs, format: OutputFormat) -> ApiResult<()> {
    if args.profile {
        let profile = api.stats.profile().await?;
        output::print_item(&profile, format);
        return Ok(());
    }

    let stats = match &args.user {
        Some(user) => api.stats.get_for_user(user).await?,
        None => api.stats.get().await?,
    };
    let mut dashboard = Dashboard {
        stats,
        monthly_trends: None,
        category_trends: None,
        status_by_category: None,
    };
    if args.trends {
        dashboard.monthly_trends = Some(api.stats.monthly_trends().await?);
        dashboard.category_trends = Some(api.stats.category_trends().await?);
        dashboard.status_by_category = Some(api.stats.status_by_category().await?);
    }
    output::print_item(&dashboard, format);
    Ok(())
}

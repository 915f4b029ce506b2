//! Report commands.

use clap::{Args, Subcommand};
use tabled::Tabled;

use civic_api::dto::request::{CreateReportRequest, UpdateReportRequest};
use civic_api::dto::response::ReportResponse;
use civic_api::extractors::ReportQuery;
use civic_api::{ApiResult, CivicApi};
use civic_entity::report::{ReportCategory, ReportStatus};

use crate::output::{self, OutputFormat};

/// Arguments for report commands
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Report subcommand
    #[command(subcommand)]
    pub command: ReportCommand,
}

/// Report subcommands
#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Submit a new report as the signed-in identity
    Submit {
        /// Short headline
        #[arg(short, long)]
        title: String,
        /// Description of the issue
        #[arg(short, long)]
        description: String,
        /// roads, safety, environment or garbage
        #[arg(short, long)]
        category: ReportCategory,
        /// Finer-grained category
        #[arg(long)]
        subcategory: Option<String>,
        /// Locality
        #[arg(long)]
        area: Option<String>,
        /// Latitude
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        /// Longitude
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
        /// Street address
        #[arg(long)]
        address: Option<String>,
        /// Photo reference
        #[arg(long)]
        image_url: Option<String>,
        /// Flag as urgent
        #[arg(long)]
        urgent: bool,
    },
    /// List reports
    List {
        /// Category filter, or "all"
        #[arg(long)]
        category: Option<String>,
        /// Status filter, or "all"
        #[arg(long)]
        status: Option<String>,
        /// Owner filter
        #[arg(long)]
        user: Option<String>,
        /// Only the signed-in identity's reports
        #[arg(long, conflicts_with = "user")]
        mine: bool,
    },
    /// Show one report
    Show {
        /// Report id
        id: String,
    },
    /// Edit a report you own
    Edit {
        /// Report id
        id: String,
        /// New headline
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New urgent flag
        #[arg(long)]
        urgent: Option<bool>,
    },
    /// Change a report's status (admin only)
    Status {
        /// Report id
        id: String,
        /// reported, processing, action_taken or resolved
        status: ReportStatus,
    },
    /// Delete a report
    Delete {
        /// Report id
        id: String,
    },
}

/// Report display row for table output
#[derive(Debug, Tabled)]
struct ReportRow {
    /// Report ID
    id: String,
    /// Title
    title: String,
    /// Category
    category: String,
    /// Status
    status: String,
    /// Urgent
    urgent: bool,
    /// Owner
    owner: String,
    /// Submitted
    created_at: String,
}

impl ReportRow {
    fn from_response(report: &ReportResponse) -> Self {
        Self {
            id: report.id.to_string(),
            title: report.title.clone(),
            category: report.category_label.clone(),
            status: report.status_label.clone(),
            urgent: report.urgent,
            owner: report.user_id.to_string(),
            created_at: report.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute report commands
pub async fn execute(api: &CivicApi, args: &ReportArgs, format: OutputFormat) -> ApiResult<()> {
    match &args.command {
        ReportCommand::Submit {
            title,
            description,
            category,
            subcategory,
            area,
            lat,
            lng,
            address,
            image_url,
            urgent,
        } => {
            let req = CreateReportRequest {
                title: title.clone(),
                description: description.clone(),
                category: *category,
                subcategory: subcategory.clone(),
                area: area.clone(),
                status: None,
                image_url: image_url.clone(),
                location: None,
                location_lat: *lat,
                location_lng: *lng,
                address: address.clone(),
                urgent: Some(*urgent),
                user_id: None,
            };

            let report = api.reports.create(req).await?;
            output::print_item(&report, format);
        }
        ReportCommand::List {
            category,
            status,
            user,
            mine,
        } => {
            let reports = if *mine {
                api.reports.get_mine().await?
            } else {
                api.reports
                    .get_all(ReportQuery {
                        category: category.clone(),
                        status: status.clone(),
                        user_id: user.clone(),
                    })
                    .await?
            };
            output::print_list(&reports, format, ReportRow::from_response);
        }
        ReportCommand::Show { id } => {
            let report = api.reports.get_by_id(id).await?;
            output::print_item(&report, format);
        }
        ReportCommand::Edit {
            id,
            title,
            description,
            urgent,
        } => {
            let report = api
                .reports
                .update(
                    id,
                    UpdateReportRequest {
                        title: title.clone(),
                        description: description.clone(),
                        urgent: *urgent,
                        ..UpdateReportRequest::default()
                    },
                )
                .await?;
            output::print_item(&report, format);
        }
        ReportCommand::Status { id, status } => {
            let report = api.reports.update_status(id, *status).await?;
            output::print_item(&report, format);
        }
        ReportCommand::Delete { id } => {
            api.reports.delete(id).await?;
            output::print_success(&format!("Report {} deleted", id));
        }
    }
    Ok(())
}

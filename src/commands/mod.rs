//! CLI command definitions and dispatch.

pub mod auth;
pub mod comment;
pub mod notification;
pub mod report;
pub mod stats;

use clap::{Parser, Subcommand};

use civic_api::{ApiResult, AppState, CivicApi};
use civic_core::config::AppConfig;

use crate::output::{self, OutputFormat};

/// CivicVoice: civic issue reporting from the command line
#[derive(Debug, Parser)]
#[command(name = "civicvoice", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the per-environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Configuration environment overlay to apply
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import legacy collections and seed demo data into an empty store
    Seed,
    /// Register a new identity and sign in
    Register(auth::RegisterArgs),
    /// Sign in
    Login(auth::LoginArgs),
    /// Sign out
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Report management
    Report(report::ReportArgs),
    /// Comment threads
    Comment(comment::CommentArgs),
    /// Notifications for the signed-in identity
    Notifications(notification::NotificationArgs),
    /// Dashboard statistics
    Stats(stats::StatsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> ApiResult<()> {
        if let Commands::Seed = self.command {
            let api = CivicApi::new(AppState::new(config).await?);
            let outcome = api.bootstrap().await?;
            output::print_item(&outcome, self.format);
            return Ok(());
        }

        let api = CivicApi::connect(config).await?;
        match &self.command {
            Commands::Seed => Ok(()),
            Commands::Register(args) => auth::register(&api, args, self.format).await,
            Commands::Login(args) => auth::login(&api, args, self.format).await,
            Commands::Logout => auth::logout(&api).await,
            Commands::Whoami => auth::whoami(&api, self.format).await,
            Commands::Report(args) => report::execute(&api, args, self.format).await,
            Commands::Comment(args) => comment::execute(&api, args, self.format).await,
            Commands::Notifications(args) => notification::execute(&api, args, self.format).await,
            Commands::Stats(args) => stats::execute(&api, args, self.format).await,
        }
    }
}

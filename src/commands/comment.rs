//! Comment commands.

use clap::{Args, Subcommand};
use tabled::Tabled;

use civic_api::dto::request::CreateCommentRequest;
use civic_api::{ApiResult, CivicApi};
use civic_entity::comment::Comment;

use crate::output::{self, OutputFormat};

/// Arguments for comment commands
#[derive(Debug, Args)]
pub struct CommentArgs {
    /// Comment subcommand
    #[command(subcommand)]
    pub command: CommentCommand,
}

/// Comment subcommands
#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// List a report's comments, newest first
    List {
        /// Report id
        report_id: String,
    },
    /// Comment on a report as the signed-in identity
    Add {
        /// Report id
        report_id: String,
        /// Comment text
        content: String,
    },
    /// Toggle your upvote on a comment
    Upvote {
        /// Comment id
        comment_id: String,
    },
}

/// Comment display row for table output
#[derive(Debug, Tabled)]
struct CommentRow {
    /// Comment ID
    id: String,
    /// Author
    username: String,
    /// Text
    content: String,
    /// Upvotes
    upvotes: u32,
    /// Posted
    created_at: String,
}

impl CommentRow {
    fn from_comment(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            username: comment.username.clone(),
            content: comment.content.clone(),
            upvotes: comment.upvotes,
            created_at: comment.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute comment commands
pub async fn execute(api: &CivicApi, args: &CommentArgs, format: OutputFormat) -> ApiResult<()> {
    match &args.command {
        CommentCommand::List { report_id } => {
            let comments = api.comments.get_by_report(report_id).await?;
            output::print_list(&comments, format, CommentRow::from_comment);
        }
        CommentCommand::Add { report_id, content } => {
            let comment = api
                .comments
                .create(CreateCommentRequest {
                    report_id: report_id.clone(),
                    content: content.clone(),
                })
                .await?;
            output::print_item(&comment, format);
        }
        CommentCommand::Upvote { comment_id } => {
            let comment = api.comments.upvote(comment_id).await?;
            output::print_item(&comment, format);
        }
    }
    Ok(())
}

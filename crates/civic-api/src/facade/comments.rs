//! Comments facade.

use civic_core::types::{CommentId, ReportId};
use civic_entity::comment::Comment;

use crate::dto::request::CreateCommentRequest;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Comment threads and upvotes.
#[derive(Debug, Clone)]
pub struct CommentsApi {
    state: AppState,
}

impl CommentsApi {
    pub(crate) fn new(state: AppState) -> Self {
        Self { state }
    }

    /// A report's comments, newest first.
    pub async fn get_by_report(&self, report_id: &str) -> ApiResult<Vec<Comment>> {
        Ok(self
            .state
            .comment_service
            .list_for_report(&ReportId::new(report_id))
            .await?)
    }

    /// Posts a comment as the signed-in caller.
    pub async fn create(&self, req: CreateCommentRequest) -> ApiResult<Comment> {
        let auth = AuthUser::require(&self.state).await?;
        Ok(self
            .state
            .comment_service
            .add(&auth, &ReportId::new(req.report_id), &req.content)
            .await?)
    }

    /// Toggles the caller's upvote.
    pub async fn upvote(&self, comment_id: &str) -> ApiResult<Comment> {
        let auth = AuthUser::require(&self.state).await?;
        Ok(self
            .state
            .comment_service
            .toggle_upvote(&auth, &CommentId::new(comment_id))
            .await?)
    }
}

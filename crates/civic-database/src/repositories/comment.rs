//! Comment repository implementation.

use chrono::Utc;
use tracing::{debug, info};

use civic_core::error::AppError;
use civic_core::result::AppResult;
use civic_core::types::{CommentId, ReportId, UserId};
use civic_entity::comment::{Comment, NewComment};
use civic_store::{SlotCodec, keys};

/// Value stored in an upvote marker slot.
const UPVOTE_MARKER: &str = "true";

/// Repository for comments and their upvote markers.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    codec: SlotCodec,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(codec: SlotCodec) -> Self {
        Self { codec }
    }

    /// Persist a new comment with zero upvotes.
    pub async fn create(&self, draft: NewComment) -> AppResult<Comment> {
        let comment = Comment::from_draft(CommentId::generate(), draft, Utc::now());
        if !self.insert(&comment).await? {
            return Err(AppError::conflict(format!(
                "Comment id already in use: {}",
                comment.id
            )));
        }
        info!(comment_id = %comment.id, report_id = %comment.report_id, "Comment created");
        Ok(comment)
    }

    /// Store a fully formed comment unless one with the same id exists.
    pub async fn insert(&self, comment: &Comment) -> AppResult<bool> {
        self.codec.insert_new(&keys::comment(&comment.id), comment).await
    }

    /// Find a comment by id.
    pub async fn find_by_id(&self, id: &CommentId) -> AppResult<Option<Comment>> {
        self.codec.load(&keys::comment(id)).await
    }

    /// Comments on a report, newest first.
    pub async fn list_by_report(&self, report_id: &ReportId) -> AppResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .codec
            .load_prefix::<Comment>(&keys::comment_prefix())
            .await?
            .into_iter()
            .filter(|c| &c.report_id == report_id)
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        debug!(report_id = %report_id, count = comments.len(), "Listed comments");
        Ok(comments)
    }

    /// Whether an identity currently upvotes a comment.
    pub async fn has_upvoted(&self, comment_id: &CommentId, user_id: &UserId) -> AppResult<bool> {
        self.codec
            .store()
            .exists(&keys::upvote(comment_id, user_id))
            .await
    }

    /// Toggle an identity's upvote on a comment.
    ///
    /// The first call by an identity adds one upvote, the next removes it
    /// again; the count never drops below zero. The count only moves when
    /// this call itself wrote or removed the marker. Returns `None` if the
    /// comment does not exist.
    pub async fn toggle_upvote(
        &self,
        comment_id: &CommentId,
        user_id: &UserId,
    ) -> AppResult<Option<Comment>> {
        if self.find_by_id(comment_id).await?.is_none() {
            return Ok(None);
        }

        let store = self.codec.store();
        let marker = keys::upvote(comment_id, user_id);
        let added = store.set_nx(&marker, UPVOTE_MARKER).await?;
        if !added && !store.delete(&marker).await? {
            debug!(comment_id = %comment_id, user_id = %user_id, "Upvote marker already removed");
            return self.find_by_id(comment_id).await;
        }

        let updated = self
            .codec
            .update::<Comment, _>(&keys::comment(comment_id), |mut comment| {
                comment.upvotes = if added {
                    comment.upvotes.saturating_add(1)
                } else {
                    comment.upvotes.saturating_sub(1)
                };
                Ok(comment)
            })
            .await?;

        match &updated {
            Some(comment) => {
                debug!(comment_id = %comment_id, user_id = %user_id, added, upvotes = comment.upvotes, "Toggled upvote");
            }
            None if added => {
                store.delete(&marker).await?;
            }
            None => {
                store.set_nx(&marker, UPVOTE_MARKER).await?;
            }
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use civic_core::traits::store::KvStore;
    use civic_store::memory::MemoryStore;

    fn repo() -> CommentRepository {
        CommentRepository::new(SlotCodec::new(Arc::new(MemoryStore::new()), 8))
    }

    /// What a concurrent writer does while an upvote marker is being written.
    #[derive(Debug, Clone, Copy)]
    enum Interference {
        /// Another toggle removes the marker between our check and delete.
        MarkerTaken,
        /// The comment is deleted right after the marker is written.
        CommentDeleted,
    }

    #[derive(Debug)]
    struct ContendedStore {
        inner: MemoryStore,
        interference: Interference,
    }

    #[async_trait]
    impl KvStore for ContendedStore {
        fn provider_type(&self) -> &str {
            "contended"
        }

        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> AppResult<()> {
            self.inner.set(key, value).await
        }

        async fn delete(&self, key: &str) -> AppResult<bool> {
            self.inner.delete(key).await
        }

        async fn exists(&self, key: &str) -> AppResult<bool> {
            self.inner.exists(key).await
        }

        async fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
            self.inner.keys_with_prefix(prefix).await
        }

        async fn set_nx(&self, key: &str, value: &str) -> AppResult<bool> {
            if !key.starts_with("civicvoice:upvote:") {
                return self.inner.set_nx(key, value).await;
            }
            match self.interference {
                Interference::MarkerTaken => Ok(false),
                Interference::CommentDeleted => {
                    let written = self.inner.set_nx(key, value).await?;
                    for comment in self.inner.keys_with_prefix("civicvoice:comment:").await? {
                        self.inner.delete(&comment).await?;
                    }
                    Ok(written)
                }
            }
        }

        async fn compare_and_swap(
            &self,
            key: &str,
            expected: Option<&str>,
            new: Option<&str>,
        ) -> AppResult<bool> {
            self.inner.compare_and_swap(key, expected, new).await
        }

        async fn health_check(&self) -> AppResult<bool> {
            self.inner.health_check().await
        }

        async fn flush_all(&self) -> AppResult<()> {
            self.inner.flush_all().await
        }
    }

    fn contended(interference: Interference) -> (Arc<ContendedStore>, CommentRepository) {
        let store = Arc::new(ContendedStore {
            inner: MemoryStore::new(),
            interference,
        });
        (store.clone(), CommentRepository::new(SlotCodec::new(store, 8)))
    }

    fn draft(report: &str, content: &str) -> NewComment {
        NewComment {
            report_id: ReportId::new(report),
            user_id: UserId::new("author"),
            username: "author".into(),
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn test_upvote_toggle() {
        let repo = repo();
        let comment = repo.create(draft("1", "Same here")).await.unwrap();
        let voter = UserId::new("voter");

        let once = repo.toggle_upvote(&comment.id, &voter).await.unwrap().unwrap();
        assert_eq!(once.upvotes, 1);
        assert!(repo.has_upvoted(&comment.id, &voter).await.unwrap());

        let twice = repo.toggle_upvote(&comment.id, &voter).await.unwrap().unwrap();
        assert_eq!(twice.upvotes, 0);
        assert!(!repo.has_upvoted(&comment.id, &voter).await.unwrap());
    }

    #[tokio::test]
    async fn test_two_voters_add_two() {
        let repo = repo();
        let comment = repo.create(draft("1", "Agreed")).await.unwrap();
        repo.toggle_upvote(&comment.id, &UserId::new("a")).await.unwrap();
        let after = repo
            .toggle_upvote(&comment.id, &UserId::new("b"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.upvotes, 2);
    }

    #[tokio::test]
    async fn test_upvote_missing_comment() {
        let repo = repo();
        let result = repo
            .toggle_upvote(&CommentId::new("ghost"), &UserId::new("a"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_by_report_newest_first() {
        let repo = repo();
        let first = repo.create(draft("1", "first")).await.unwrap();
        let second = repo.create(draft("1", "second")).await.unwrap();
        repo.create(draft("2", "elsewhere")).await.unwrap();

        let listed = repo.list_by_report(&ReportId::new("1")).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_lost_marker_race_keeps_count() {
        let (_, repo) = contended(Interference::MarkerTaken);
        let mut comment = repo.create(draft("1", "Agreed")).await.unwrap();
        comment.upvotes = 1;
        repo.codec
            .save(&keys::comment(&comment.id), &comment)
            .await
            .unwrap();

        let after = repo
            .toggle_upvote(&comment.id, &UserId::new("voter"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.upvotes, 1);
    }

    #[tokio::test]
    async fn test_marker_rolled_back_when_comment_vanishes() {
        let (store, repo) = contended(Interference::CommentDeleted);
        let comment = repo.create(draft("1", "Gone soon")).await.unwrap();
        let voter = UserId::new("voter");

        let result = repo.toggle_upvote(&comment.id, &voter).await.unwrap();
        assert!(result.is_none());
        assert!(
            !store
                .exists(&keys::upvote(&comment.id, &voter))
                .await
                .unwrap()
        );
    }
}

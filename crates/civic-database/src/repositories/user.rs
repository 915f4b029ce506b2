//! Identity repository implementation.
//!
//! Email and username uniqueness is enforced with index slots claimed via
//! set-if-absent, so two concurrent registrations of the same name cannot
//! both succeed.

use tracing::{debug, info, warn};

use civic_core::error::AppError;
use civic_core::result::AppResult;
use civic_core::types::UserId;
use civic_entity::user::User;
use civic_store::{SlotCodec, keys};

/// Message returned when an email or username is taken.
pub const DUPLICATE_IDENTITY: &str = "Username or email already exists";

/// Repository for identity records.
#[derive(Debug, Clone)]
pub struct UserRepository {
    codec: SlotCodec,
}

impl UserRepository {
    /// Create a new identity repository.
    pub fn new(codec: SlotCodec) -> Self {
        Self { codec }
    }

    /// Find an identity by primary key.
    pub async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        self.codec.load(&keys::user(id)).await
    }

    /// Find an identity by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let wanted = email.trim().to_lowercase();
        self.find_indexed(&keys::user_by_email(email), |u| {
            u.email.trim().to_lowercase() == wanted
        })
        .await
    }

    /// Find an identity by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let wanted = username.trim().to_lowercase();
        self.find_indexed(&keys::user_by_username(username), |u| {
            u.username.trim().to_lowercase() == wanted
        })
        .await
    }

    /// Look up through an index slot, falling back to a scan for records
    /// that were written without one.
    async fn find_indexed<P>(&self, index_key: &str, matches: P) -> AppResult<Option<User>>
    where
        P: Fn(&User) -> bool,
    {
        if let Some(id) = self.codec.load::<UserId>(index_key).await? {
            if let Some(user) = self.find_by_id(&id).await? {
                if matches(&user) {
                    return Ok(Some(user));
                }
            }
            debug!(index_key, "Stale identity index entry");
        }
        Ok(self.list_all().await?.into_iter().find(|u| matches(u)))
    }

    /// Every well-formed identity, in key order.
    pub async fn list_all(&self) -> AppResult<Vec<User>> {
        self.codec.load_prefix(&keys::user_prefix()).await
    }

    /// Number of well-formed identities.
    pub async fn count(&self) -> AppResult<usize> {
        Ok(self.list_all().await?.len())
    }

    /// Store a new identity, claiming its email and username.
    ///
    /// Fails with `Conflict` if either is already taken (case-insensitively)
    /// or the id is in use; on failure nothing is left claimed.
    pub async fn create(&self, user: User) -> AppResult<User> {
        if self.find_by_email(&user.email).await?.is_some()
            || self.find_by_username(&user.username).await?.is_some()
        {
            return Err(AppError::conflict(DUPLICATE_IDENTITY));
        }

        let email_key = keys::user_by_email(&user.email);
        let username_key = keys::user_by_username(&user.username);

        if !self.claim(&email_key, &user.id).await? {
            return Err(AppError::conflict(DUPLICATE_IDENTITY));
        }
        if !self.claim(&username_key, &user.id).await? {
            self.release(&email_key, &user.id).await?;
            return Err(AppError::conflict(DUPLICATE_IDENTITY));
        }
        if !self.codec.insert_new(&keys::user(&user.id), &user).await? {
            self.release(&email_key, &user.id).await?;
            self.release(&username_key, &user.id).await?;
            return Err(AppError::conflict(format!(
                "Identity id already in use: {}",
                user.id
            )));
        }

        info!(user_id = %user.id, username = %user.username, role = %user.role, "Identity created");
        Ok(user)
    }

    /// Claim an index slot for `id`.
    ///
    /// A slot held by an identity whose record is gone or unreadable is
    /// stale and gets taken over.
    async fn claim(&self, index_key: &str, id: &UserId) -> AppResult<bool> {
        if self.codec.insert_new(index_key, id).await? {
            return Ok(true);
        }
        let store = self.codec.store();
        let Some(current) = store.get(index_key).await? else {
            return self.codec.insert_new(index_key, id).await;
        };
        if let Ok(holder) = serde_json::from_str::<UserId>(&current) {
            if self.find_by_id(&holder).await?.is_some() {
                return Ok(false);
            }
        }
        warn!(index_key, "Taking over stale identity index entry");
        let claimed = serde_json::to_string(id)?;
        store
            .compare_and_swap(index_key, Some(&current), Some(&claimed))
            .await
    }

    /// Drop an index claim, but only if it still points at `id`.
    async fn release(&self, index_key: &str, id: &UserId) -> AppResult<()> {
        let claimed = serde_json::to_string(id)?;
        if !self
            .codec
            .store()
            .compare_and_swap(index_key, Some(&claimed), None)
            .await?
        {
            warn!(index_key, "Index entry changed before it could be released");
        }
        Ok(())
    }

    /// Replace a legacy plaintext password with a hash.
    pub async fn upgrade_password(&self, id: &UserId, password_hash: String) -> AppResult<Option<User>> {
        let upgraded = self
            .codec
            .update::<User, _>(&keys::user(id), |mut user| {
                user.password_hash = Some(password_hash.clone());
                user.password = None;
                Ok(user)
            })
            .await?;
        if upgraded.is_some() {
            info!(user_id = %id, "Upgraded legacy plaintext password");
        }
        Ok(upgraded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use civic_core::ErrorKind;
    use civic_core::traits::store::KvStore;
    use civic_entity::user::UserRole;
    use civic_store::memory::MemoryStore;

    fn repo() -> (Arc<MemoryStore>, UserRepository) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), UserRepository::new(SlotCodec::new(store, 8)))
    }

    fn user(id: &str, username: &str, email: &str) -> User {
        User {
            id: UserId::new(id),
            username: username.into(),
            email: email.into(),
            password_hash: Some("hash".into()),
            password: None,
            role: UserRole::Citizen,
            admin_post: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup_case_insensitive() {
        let (_, repo) = repo();
        repo.create(user("u1", "Alice", "Alice@Example.com")).await.unwrap();

        assert!(repo.find_by_email("alice@example.COM").await.unwrap().is_some());
        assert!(repo.find_by_username("ALICE").await.unwrap().is_some());
        assert!(repo.find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_or_username_conflicts() {
        let (_, repo) = repo();
        repo.create(user("u1", "alice", "alice@example.com")).await.unwrap();

        let err = repo
            .create(user("u2", "alice2", "ALICE@example.com"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(err.message, DUPLICATE_IDENTITY);

        let err = repo
            .create(user("u3", "Alice", "other@example.com"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(repo.count().await.unwrap(), 1);

        // The failed attempt must not leave its email claimed.
        repo.create(user("u4", "carol", "other@example.com")).await.unwrap();
    }

    #[tokio::test]
    async fn test_unindexed_records_are_found_by_scan() {
        let (store, repo) = repo();
        let legacy = user("legacy", "old", "old@example.com");
        store
            .set("civicvoice:user:legacy", &serde_json::to_string(&legacy).unwrap())
            .await
            .unwrap();

        assert!(repo.find_by_email("OLD@example.com").await.unwrap().is_some());
        let err = repo
            .create(user("u5", "new", "old@example.com"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
    }

    #[tokio::test]
    async fn test_stale_index_entry_is_reclaimed() {
        let (store, repo) = repo();
        repo.create(user("u1", "alice", "alice@example.com")).await.unwrap();
        store.set("civicvoice:user:u1", "{broken").await.unwrap();

        let again = repo
            .create(user("u1", "alice", "alice@example.com"))
            .await
            .unwrap();
        assert_eq!(again.id, UserId::new("u1"));
        assert!(repo.find_by_email("alice@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_upgrade_password_clears_plaintext() {
        let (_, repo) = repo();
        let mut legacy = user("u1", "old", "old@example.com");
        legacy.password_hash = None;
        legacy.password = Some("secret".into());
        repo.create(legacy).await.unwrap();

        let upgraded = repo
            .upgrade_password(&UserId::new("u1"), "$argon2id$x".into())
            .await
            .unwrap()
            .unwrap();
        assert!(upgraded.password.is_none());
        assert!(!upgraded.has_legacy_password());
    }
}

//! The current-session slots.

use tracing::debug;

use civic_core::result::AppResult;
use civic_entity::user::PublicUser;
use civic_store::{SlotCodec, keys};

/// Persists the token and identity of whoever is signed in on this store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    codec: SlotCodec,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(codec: SlotCodec) -> Self {
        Self { codec }
    }

    /// Record a signed-in session.
    pub async fn save(&self, token: &str, user: &PublicUser) -> AppResult<()> {
        self.codec.save(&keys::auth_token(), &token).await?;
        self.codec.save(&keys::current_user(), user).await?;
        debug!(user_id = %user.id, "Session saved");
        Ok(())
    }

    /// The current session token, if any.
    pub async fn token(&self) -> AppResult<Option<String>> {
        self.codec.load(&keys::auth_token()).await
    }

    /// The identity recorded at sign-in, if any.
    pub async fn current_user(&self) -> AppResult<Option<PublicUser>> {
        self.codec.load(&keys::current_user()).await
    }

    /// Forget the current session.
    pub async fn clear(&self) -> AppResult<()> {
        self.codec.remove(&keys::auth_token()).await?;
        self.codec.remove(&keys::current_user()).await?;
        debug!("Session cleared");
        Ok(())
    }
}

//! Registration, login and token decoding.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use civic_core::error::AppError;
use civic_core::result::AppResult;
use civic_core::types::UserId;
use civic_database::repositories::UserRepository;
use civic_entity::user::{PublicUser, User, UserRole};

use crate::identity::normalize_identity;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::{PasswordHasher, PasswordMatch};

/// Data supplied when registering a new identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Whether an admin account is requested.
    #[serde(default)]
    pub is_admin: bool,
    /// Official post, kept only for admins.
    #[serde(default)]
    pub admin_post: Option<String>,
}

/// A freshly issued session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Signed session token.
    pub token: String,
    /// The normalized identity the token belongs to.
    pub user: PublicUser,
}

/// Issues and checks sessions for identities.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Token encoder.
    jwt_encoder: Arc<JwtEncoder>,
    /// Token decoder.
    jwt_decoder: Arc<JwtDecoder>,
    /// Identity repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        user_repo: Arc<UserRepository>,
        password_hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            user_repo,
            password_hasher,
        }
    }

    /// Register a new identity and sign it in.
    ///
    /// Fails with `Conflict` when the email or username is already taken,
    /// compared case-insensitively.
    pub async fn register(&self, registration: Registration) -> AppResult<AuthSession> {
        let role = if registration.is_admin {
            UserRole::Admin
        } else {
            UserRole::Citizen
        };
        let user = User {
            id: UserId::generate(),
            username: registration.username.trim().to_string(),
            email: registration.email.trim().to_string(),
            password_hash: Some(self.password_hasher.hash_password(&registration.password)?),
            password: None,
            role,
            admin_post: registration.admin_post.filter(|_| role.is_admin()),
            created_at: Some(Utc::now()),
        };

        let user = self.user_repo.create(user).await?;
        info!(user_id = %user.id, username = %user.username, %role, "Identity registered");
        self.issue(&user)
    }

    /// Verify credentials and issue a session.
    ///
    /// Fails with `NotFound` when no identity has the email and with
    /// `Authentication` when the password is wrong. A matching legacy
    /// plaintext password is replaced by a hash.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        match self.password_hasher.verify_user(password, &user)? {
            PasswordMatch::Hashed => {}
            PasswordMatch::Legacy => {
                let hash = self.password_hasher.hash_password(password)?;
                self.user_repo.upgrade_password(&user.id, hash).await?;
            }
            PasswordMatch::Mismatch => {
                warn!(user_id = %user.id, "Failed login attempt");
                return Err(AppError::authentication("Invalid password"));
            }
        }

        info!(user_id = %user.id, "Identity signed in");
        self.issue(&user)
    }

    fn issue(&self, user: &User) -> AppResult<AuthSession> {
        let view = normalize_identity(user.to_public());
        let token = self.jwt_encoder.issue(&view)?;
        Ok(AuthSession { token, user: view })
    }

    /// Decode a token into the normalized identity it was issued for.
    pub fn decode_session(&self, token: &str) -> AppResult<PublicUser> {
        let claims = self.jwt_decoder.decode(token)?;
        Ok(normalize_identity(claims.identity()))
    }

    /// Whether a token belongs to an admin. Undecodable tokens are not.
    pub fn is_admin(&self, token: &str) -> bool {
        self.decode_session(token)
            .map(|user| user.is_admin())
            .unwrap_or(false)
    }
}

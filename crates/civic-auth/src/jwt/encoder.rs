//! Session token creation with configurable signing and TTL.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use civic_core::config::AuthConfig;
use civic_core::error::AppError;
use civic_entity::user::PublicUser;

use super::claims::Claims;

/// Creates HS256-signed session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token TTL in hours; 0 issues tokens without expiry.
    ttl_hours: u64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            ttl_hours: config.token_ttl_hours,
        }
    }

    /// Issues a token for the given identity.
    pub fn issue(&self, user: &PublicUser) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = (self.ttl_hours > 0).then(|| now + Duration::hours(self.ttl_hours as i64));
        let claims = Claims::for_identity(user, now, expires_at);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
    }
}

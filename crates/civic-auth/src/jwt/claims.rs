//! Claims carried by a session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use civic_core::types::UserId;
use civic_entity::user::{PublicUser, UserRole};

/// Payload embedded in every session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Identity id.
    pub id: UserId,
    /// Username at issue time.
    pub username: String,
    /// Email at issue time.
    pub email: String,
    /// Role at issue time.
    pub role: UserRole,
    /// Admin post, for admins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_post: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch). Absent for non-expiring tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Build claims for an identity.
    pub fn for_identity(user: &PublicUser, issued_at: DateTime<Utc>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            admin_post: user.admin_post.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.map(|t| t.timestamp()),
        }
    }

    /// The identity embedded in the token, before normalization.
    pub fn identity(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
            admin_post: self.admin_post.clone(),
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`, if the token expires.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

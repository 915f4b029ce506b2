//! Identity entity model.

use chrono::{DateTime, Utc};
use civic_core::types::UserId;
use serde::{Deserialize, Serialize};

use super::role::UserRole;

/// A registered identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identity identifier.
    pub id: UserId,
    /// Display and login name, unique case-insensitively.
    pub username: String,
    /// Email address, unique case-insensitively.
    pub email: String,
    /// Argon2 password hash (PHC string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Plaintext password held by records written before hashing existed.
    /// Cleared on the first successful login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Role.
    #[serde(default)]
    pub role: UserRole,
    /// Official post held by an admin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_post: Option<String>,
    /// When the identity was registered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if this identity has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the record still carries a plaintext password.
    pub fn has_legacy_password(&self) -> bool {
        self.password_hash.is_none() && self.password.is_some()
    }

    /// The view safe to hand to callers.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
            admin_post: self.admin_post.clone(),
        }
    }
}

/// An identity without any credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Identity identifier.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: UserRole,
    /// Official post held by an admin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_post: Option<String>,
}

impl PublicUser {
    /// Check if this identity has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

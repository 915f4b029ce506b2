//! Request context carrying the signed-in identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use civic_auth::normalize_identity;
use civic_core::types::UserId;
use civic_entity::user::{PublicUser, UserRole};

/// Context for the current signed-in caller.
///
/// Built from the normalized identity decoded out of the session token and
/// passed into service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The caller's identity ID.
    pub user_id: UserId,
    /// The caller's role after normalization.
    pub role: UserRole,
    /// The username (convenience field from the token claims).
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, role: UserRole, username: String) -> Self {
        Self {
            user_id,
            role,
            username,
            request_time: Utc::now(),
        }
    }

    /// Creates a context for a decoded identity.
    ///
    /// The identity is normalized first, so the demo account never acts
    /// as an admin whatever its record says.
    pub fn from_identity(user: PublicUser) -> Self {
        let user = normalize_identity(user);
        Self::new(user.id, user.role, user.username)
    }

    /// Returns whether the current caller is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns whether the caller is `owner` or an admin.
    pub fn can_manage(&self, owner: &UserId) -> bool {
        self.is_admin() || &self.user_id == owner
    }
}

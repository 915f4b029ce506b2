//! The demo-identity rule.
//!
//! The shared demo account may appear under username `demo` or
//! `demo_user`. Whatever id or role a record or token claims, it always
//! resolves to the fixed id `demo_user` and never carries admin rights.

use civic_core::types::UserId;
use civic_entity::user::{PublicUser, UserRole};

/// Fixed id of the demo identity.
pub const DEMO_USER_ID: &str = "demo_user";

/// Whether a username denotes the demo identity.
pub fn is_demo_username(username: &str) -> bool {
    username == "demo" || username == DEMO_USER_ID
}

/// Apply the demo rule to an identity view.
pub fn normalize_identity(mut user: PublicUser) -> PublicUser {
    if is_demo_username(&user.username) {
        user.id = UserId::new(DEMO_USER_ID);
        user.role = UserRole::Citizen;
        user.admin_post = None;
    }
    user
}

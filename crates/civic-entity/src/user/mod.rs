//! Identity domain entities.

pub mod model;
pub mod role;

pub use model::{PublicUser, User};
pub use role::UserRole;

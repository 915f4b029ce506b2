//! Session management: register/login flows and the current-session slot.

pub mod manager;
pub mod store;

pub use manager::{AuthSession, Registration, SessionManager};
pub use store::SessionStore;

//! # civic-auth
//!
//! Identity and session handling for CivicVoice.
//!
//! ## Modules
//!
//! - `jwt`: signed session token creation and validation
//! - `password`: Argon2id password hashing with legacy plaintext upgrade
//! - `identity`: the demo-identity normalization rule
//! - `session`: register/login flows and the current-session slot

pub mod identity;
pub mod jwt;
pub mod password;
pub mod session;

pub use identity::normalize_identity;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordMatch};
pub use session::{AuthSession, Registration, SessionManager, SessionStore};

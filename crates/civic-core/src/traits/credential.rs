//! Credential hashing trait.

use crate::result::AppResult;

/// One-way password hashing, implemented in `civic-auth`.
///
/// Defined here so that crates below the auth layer (bootstrap seeding)
/// can store hashed credentials without depending on `civic-auth`.
pub trait CredentialHasher: Send + Sync + std::fmt::Debug + 'static {
    /// Hash a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verify a plaintext password against a stored hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

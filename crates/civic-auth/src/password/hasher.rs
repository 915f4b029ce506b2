//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use civic_core::config::AuthConfig;
use civic_core::error::AppError;
use civic_core::traits::CredentialHasher;
use civic_entity::user::User;

/// Outcome of checking a password against a stored identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordMatch {
    /// Matched the Argon2 hash.
    Hashed,
    /// Matched a legacy plaintext password; the record should be upgraded.
    Legacy,
    /// Did not match.
    Mismatch,
}

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Cost parameters used for new hashes.
    params: Params,
}

impl PasswordHasher {
    /// Creates a hasher with the cost configured in `config`.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Checks a password against whatever credential an identity record holds.
    ///
    /// A record without a hash falls back to an exact comparison with its
    /// legacy plaintext password; a record with neither never matches.
    pub fn verify_user(&self, password: &str, user: &User) -> Result<PasswordMatch, AppError> {
        if let Some(hash) = &user.password_hash {
            return Ok(if self.verify_password(password, hash)? {
                PasswordMatch::Hashed
            } else {
                PasswordMatch::Mismatch
            });
        }
        match &user.password {
            Some(plain) if plain == password => Ok(PasswordMatch::Legacy),
            _ => Ok(PasswordMatch::Mismatch),
        }
    }
}

impl CredentialHasher for PasswordHasher {
    fn hash_password(&self, password: &str) -> Result<String, AppError> {
        PasswordHasher::hash_password(self, password)
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        PasswordHasher::verify_password(self, password, hash)
    }
}

//! # civic-core
//!
//! Core crate for CivicVoice. Contains the key-value store and credential
//! traits, configuration schemas, typed identifiers, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other CivicVoice crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;

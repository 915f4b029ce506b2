//! Convenience result type alias for CivicVoice.

use crate::error::AppError;

/// A specialized `Result` type for CivicVoice operations.
pub type AppResult<T> = Result<T, AppError>;

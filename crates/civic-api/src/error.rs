//! Maps domain `AppError` to facade errors.

use serde::{Deserialize, Serialize};

use civic_core::error::{AppError, ErrorKind};

/// Error returned by every facade method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// The category of error.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
}

/// Facade result alias.
pub type ApiResult<T> = Result<T, ApiError>;

/// Serialized error body, as printed by the command line front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// Machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self.kind {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Authentication => "INVALID_CREDENTIALS",
            ErrorKind::NotAuthenticated => "NOT_AUTHENTICATED",
            ErrorKind::Authorization => "FORBIDDEN",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Internal
            | ErrorKind::Storage
            | ErrorKind::Serialization
            | ErrorKind::Configuration => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is of the given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// The body printed for this error.
    pub fn to_response(&self) -> ApiErrorResponse {
        ApiErrorResponse {
            error: self.code().to_string(),
            message: self.message.clone(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        if matches!(
            err.kind,
            ErrorKind::Internal | ErrorKind::Storage | ErrorKind::Serialization
        ) {
            tracing::error!(error = %err, "Internal error");
        }
        Self {
            kind: err.kind,
            message: err.message,
        }
    }
}

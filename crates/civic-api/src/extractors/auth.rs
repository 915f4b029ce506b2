//! `AuthUser` extractor: reads the session slot, validates the token, and
//! builds the request context.

use civic_core::error::{AppError, ErrorKind};
use civic_service::context::RequestContext;

use crate::state::AppState;

/// The signed-in caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }

    /// Resolve the current session.
    ///
    /// Fails with `NotAuthenticated` when nobody is signed in or the stored
    /// token no longer decodes (forged, altered or expired).
    pub async fn require(state: &AppState) -> Result<Self, AppError> {
        let token = state
            .session_store
            .token()
            .await?
            .ok_or_else(|| AppError::not_authenticated("Not signed in"))?;

        let identity = state
            .session_manager
            .decode_session(&token)
            .map_err(|e| AppError::not_authenticated(format!("Session rejected: {}", e.message)))?;

        Ok(Self(RequestContext::from_identity(identity)))
    }

    /// Resolve the current session, or `None` when signed out.
    pub async fn optional(state: &AppState) -> Result<Option<Self>, AppError> {
        match Self::require(state).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is(ErrorKind::NotAuthenticated) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

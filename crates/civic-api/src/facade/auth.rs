//! Auth facade: register, login, me, logout.

use tracing::debug;

use civic_entity::user::PublicUser;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::AuthResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// Registration, login and the current session.
#[derive(Debug, Clone)]
pub struct AuthApi {
    state: AppState,
}

impl AuthApi {
    pub(crate) fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Registers a new identity and signs it in.
    pub async fn register(&self, req: RegisterRequest) -> ApiResult<AuthResponse> {
        let session = self.state.session_manager.register(req.into()).await?;
        self.state
            .session_store
            .save(&session.token, &session.user)
            .await?;
        Ok(session.into())
    }

    /// Signs in with email and password.
    pub async fn login(&self, req: LoginRequest) -> ApiResult<AuthResponse> {
        let session = self
            .state
            .session_manager
            .login(&req.email, &req.password)
            .await?;
        self.state
            .session_store
            .save(&session.token, &session.user)
            .await?;
        Ok(session.into())
    }

    /// The signed-in identity, decoded from the stored session token.
    ///
    /// `None` when signed out or when the stored token no longer decodes.
    pub async fn me(&self) -> ApiResult<Option<PublicUser>> {
        let Some(token) = self.state.session_store.token().await? else {
            return Ok(None);
        };
        match self.state.session_manager.decode_session(&token) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                debug!(error = %e, "Stored session token rejected");
                Ok(None)
            }
        }
    }

    /// Whether the current session belongs to an admin.
    pub async fn is_admin(&self) -> ApiResult<bool> {
        Ok(self
            .state
            .session_store
            .token()
            .await?
            .is_some_and(|token| self.state.session_manager.is_admin(&token)))
    }

    /// Signs out.
    pub async fn logout(&self) -> ApiResult<()> {
        self.state.session_store.clear().await?;
        Ok(())
    }
}

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderMap, request::Parts};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use tracing::debug;

use crate::error::VaultError;
use crate::service::sessions_actor::SessionsHandle;

/// Token from `Authorization: Bearer <token>`, if the header is present and well formed.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().to_string())
}

/// Ensure the inbound request carries a live admin session.
///
/// Consults the registry on every call, so a logout takes effect on the very
/// next request.
pub async fn ensure_admin(headers: &HeaderMap, sessions: &SessionsHandle) -> Result<(), VaultError> {
    let Some(token) = bearer_token(headers) else {
        debug!("protected route called without bearer token");
        return Err(VaultError::Unauthorized);
    };
    if sessions.validate(&token).await? {
        Ok(())
    } else {
        debug!("protected route called with unknown or revoked token");
        Err(VaultError::Unauthorized)
    }
}

/// Extractor guarding mutating routes. Must precede the body extractor so a
/// rejected request never reaches the store.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl<S> FromRequestParts<S> for RequireAdmin
where
    SessionsHandle: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = VaultError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionsHandle::from_ref(state);
        ensure_admin(&parts.headers, &sessions).await?;
        Ok(Self)
    }
}

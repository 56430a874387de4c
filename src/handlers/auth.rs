use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use tracing::info;

use crate::middleware::auth::bearer_token;
use crate::router::CatalogState;
use crate::service::access_gate::MemberUnlock;
use crate::types::payloads::{AdminCheckResponse, LoginRequest, LoginResponse, SuccessResponse};
use crate::VaultError;

/// POST /api/auth/login -> admin session token.
///
/// The body is read leniently: a missing, malformed or non-string password is a
/// plain rejection (401), never a 400.
pub async fn admin_login(
    State(state): State<CatalogState>,
    body: Bytes,
) -> Result<Json<LoginResponse>, VaultError> {
    let body = LoginRequest::from_body(&body);
    let token = state.gate.check_admin(body.password(), &state.sessions).await?;
    Ok(Json(LoginResponse { token }))
}

/// POST /api/auth/member-login -> `{ok: true}`; the client remembers the unlock.
pub async fn member_login(
    State(state): State<CatalogState>,
    body: Bytes,
) -> Result<Json<MemberUnlock>, VaultError> {
    let body = LoginRequest::from_body(&body);
    Ok(Json(state.gate.check_member(body.password())?))
}

/// POST /api/auth/logout. Always succeeds; a presented token is revoked.
pub async fn logout(
    State(state): State<CatalogState>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, VaultError> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.revoke(&token).await?;
        info!("admin logout");
    }
    Ok(Json(SuccessResponse::OK))
}

/// GET /api/auth/check -> whether the presented token is a live admin session.
pub async fn check(
    State(state): State<CatalogState>,
    headers: HeaderMap,
) -> Result<Json<AdminCheckResponse>, VaultError> {
    let is_admin = match bearer_token(&headers) {
        Some(token) => state.sessions.validate(&token).await?,
        None => false,
    };
    Ok(Json(AdminCheckResponse { is_admin }))
}

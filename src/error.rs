use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

/// Message returned for every failed login, whatever the cause.
pub const LOGIN_REJECTED_MESSAGE: &str = "Invalid password";

#[derive(Debug, ThisError)]
pub enum VaultError {
    /// Wrong password, or the gate has no secret configured. Never distinguished.
    #[error("authentication rejected")]
    AuthRejected,

    /// Missing, unknown or revoked session token on a protected route.
    #[error("unauthorized")]
    Unauthorized,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Session registry error: {0}")]
    RegistryError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VaultError {
    pub fn validation(msg: impl Into<String>) -> Self {
        VaultError::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            VaultError::AuthRejected | VaultError::Unauthorized => StatusCode::UNAUTHORIZED,
            VaultError::Validation(_) => StatusCode::BAD_REQUEST,
            VaultError::DatabaseError(_) | VaultError::RegistryError(_) | VaultError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for VaultError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            VaultError::AuthRejected => LOGIN_REJECTED_MESSAGE.to_string(),
            VaultError::Unauthorized => "Unauthorized".to_string(),
            VaultError::Validation(msg) => msg.clone(),
            VaultError::DatabaseError(_) | VaultError::RegistryError(_) | VaultError::Io(_) => {
                error!(error = %self, "request failed with internal error");
                "An internal server error occurred.".to_string()
            }
        };
        (status, Json(ApiErrorResponse { error: message })).into_response()
    }
}

/// Error body shared by every endpoint: `{"error": "..."}`.
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

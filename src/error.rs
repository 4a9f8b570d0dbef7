use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Error body returned by every endpoint: `{"error": "..."}`.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairingError {
    /// Required request fields are missing or blank.
    #[error("{0}")]
    InvalidInput(&'static str),

    /// Unknown, expired or consumed token, or unknown device id.
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Invalid verification code")]
    CodeMismatch,

    /// Setup attempted for a token that was never verified (or no longer exists).
    #[error("Invalid or unverified token")]
    Unverified,

    #[error("{0}")]
    Internal(String),
}

pub type PairingResult<T> = Result<T, PairingError>;

impl PairingError {
    pub fn status(&self) -> StatusCode {
        match self {
            PairingError::InvalidInput(_)
            | PairingError::CodeMismatch
            | PairingError::Unverified => StatusCode::BAD_REQUEST,
            PairingError::NotFound(_) => StatusCode::NOT_FOUND,
            PairingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PairingError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (
            status,
            Json(ApiError {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

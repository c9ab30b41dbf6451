//! Application error types and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

pub type Result<T> = std::result::Result<T, AppError>;

/// All failure modes of the gateway.
///
/// Adapters return these as values; the HTTP boundary maps them to status
/// codes via [`IntoResponse`]. `Config`, `MissingCredential` and
/// `InvalidCredential` only occur during startup and abort the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Query is required.")]
    MissingQuery,

    #[error("error communicating with model backend: {0}")]
    BackendUnreachable(#[from] reqwest::Error),

    #[error("model backend returned HTTP {status}: {body}")]
    BackendStatus { status: u16, body: String },

    #[error("malformed backend response: {0}")]
    MalformedResponse(String),

    #[error("no credential available: set {0} or backend.auth.api_key")]
    MissingCredential(String),

    #[error("credential is not a valid header value: {0}")]
    InvalidCredential(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Error body returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingQuery => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let detail = self.to_string();
        if status.is_server_error() {
            error!(%detail, "request failed");
        }

        (status, Json(ErrorBody { detail })).into_response()
    }
}

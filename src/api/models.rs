//! API request and response models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ask request
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AskRequest {
    /// The free-text medical query. Required and non-empty.
    #[serde(default)]
    pub query: String,
}

/// Ask response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AskResponse {
    /// The model's textual answer
    pub response: String,
}

/// Welcome response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
    pub model: String,
}

//! HTTP request handlers

use crate::api::models::{AskRequest, AskResponse, HealthResponse, WelcomeResponse};
use crate::error::{AppError, ErrorBody};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

const WELCOME_MESSAGE: &str = "Welcome to the Diabetic Foot Thermogram Analysis API";

/// Welcome endpoint
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Static welcome payload", body = WelcomeResponse),
    ),
    tag = "Relay"
)]
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

/// Forward a medical query to the configured model backend
#[utoipa::path(
    post,
    path = "/ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Model answer", body = AskResponse),
        (status = 400, description = "Missing or empty query", body = ErrorBody),
        (status = 500, description = "Backend communication failure", body = ErrorBody),
    ),
    tag = "Relay"
)]
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    if request.query.is_empty() {
        return Err(AppError::MissingQuery);
    }

    info!(
        backend = state.backend.name(),
        query_len = request.query.len(),
        "received ask request"
    );

    let answer = state.backend.generate(&request.query).await?;

    info!(answer_len = answer.len(), "ask request completed");

    Ok(Json(AskResponse { response: answer }))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Gateway and backend status", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let reachable = state.backend.health_check().await;

    Json(HealthResponse {
        status: if reachable { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.backend.name().to_string(),
        model: state.settings.backend.model.clone(),
    })
}

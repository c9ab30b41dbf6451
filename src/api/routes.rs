//! HTTP route definitions

use crate::api::handlers;
use crate::api::models::{AskRequest, AskResponse, HealthResponse, WelcomeResponse};
use crate::error::ErrorBody;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Medical Query Gateway API",
        version = "0.1.0",
        description = "Relay for free-text medical queries, forwarded to a local or hosted LLM backend.",
        license(name = "MIT"),
    ),
    paths(
        handlers::welcome,
        handlers::ask,
        handlers::health,
    ),
    components(schemas(
        AskRequest,
        AskResponse,
        WelcomeResponse,
        HealthResponse,
        ErrorBody,
    )),
    tags(
        (name = "Relay", description = "Query relay endpoints"),
        (name = "Health", description = "Health and monitoring endpoints"),
    )
)]
pub struct ApiDoc;

/// Upper bound on a single inbound request; the outbound client timeout
/// is configured separately.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Create the main application router
pub fn create_router(state: Arc<crate::AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/ask", post(handlers::ask))
        .route("/health", get(handlers::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}

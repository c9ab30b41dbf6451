//! Main entry point for the Medical Query Gateway

use med_query_gateway::{api, backend, config::Settings, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;
    settings.validate()?;

    init_tracing(&settings);

    info!(
        host = %settings.server.host,
        port = settings.server.port,
        backend = %settings.backend.protocol,
        model = %settings.backend.model,
        "starting medical query gateway"
    );

    // Construct the backend adapter; hosted credentials are resolved here
    let backend = backend::create_backend(&settings.backend)?;

    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let state = Arc::new(AppState {
        settings: Arc::new(settings),
        backend,
    });

    let app = api::routes::create_router(state);

    info!("server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone()));

    let registry = tracing_subscriber::registry().with(filter);

    if settings.logging.format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

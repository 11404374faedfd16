//! services/api/src/bin/api.rs

use agency_core::{invoice::InvoiceSequence, orchestrator::ContentOrchestrator};
use api_lib::{
    adapters::{InMemoryProjectRepository, OpenAiCompletionAdapter},
    config::Config,
    error::ApiError,
    web::{create_router, rest::ApiDoc, state::AppState},
};
use axum::Router;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let completion = Arc::new(OpenAiCompletionAdapter::new(
        config.openai_api_key.as_deref(),
        config.completion_model.clone(),
        config.completion_timeout,
    ));
    let repository = Arc::new(InMemoryProjectRepository::seeded());

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        orchestrator: ContentOrchestrator::new(completion, config.pricing.clone()),
        repository,
        invoices: Arc::new(InvoiceSequence::default()),
        config: config.clone(),
    });

    // --- 4. Create the Web Router ---
    let app = Router::new()
        .merge(create_router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

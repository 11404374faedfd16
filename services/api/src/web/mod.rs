pub mod client;
pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::any::Any as PanicPayload;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
};
use tracing::{error, warn};

use crate::web::{protocol::ErrorResponse, state::AppState};

fn panic_response(payload: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_default();
    error!("Request handler panicked: {}", detail);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".to_string(),
            details: None,
        }),
    )
        .into_response()
}

/// Turns a panicking handler into a generic 500 instead of a dropped connection.
fn guard_panics<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(CatchPanicLayer::custom(panic_response))
}

/// Builds the API router with its CORS layer. Swagger UI is mounted by the binary.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);
    let cors = match app_state.config.cors_origin.as_deref() {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(origin) => cors.allow_origin(origin),
            Err(_) => {
                warn!("Ignoring invalid CORS_ORIGIN '{}'", origin);
                cors.allow_origin(Any)
            }
        },
        None => cors.allow_origin(Any),
    };

    let content_routes = Router::new()
        .route("/api/generate-quote", post(rest::generate_quote_handler))
        .route("/api/generate-design", post(rest::generate_design_handler))
        .route("/api/generate-mockup", post(rest::generate_mockup_handler))
        .route("/api/generate-blog", post(rest::generate_blog_handler))
        .route("/api/generate-caption", post(rest::generate_caption_handler))
        .route("/api/generate-email", post(rest::generate_email_handler))
        .route("/api/generate-product", post(rest::generate_product_handler))
        .route("/api/generate-invoice", post(rest::generate_invoice_handler));

    let client_routes = Router::new()
        .route("/api/client/login", post(client::login_handler))
        .route("/api/client/project/{projectId}", get(client::get_project_handler))
        .route("/api/client/feedback", post(client::feedback_handler))
        .route("/api/client/ai-update", post(client::ai_update_handler));

    guard_panics(Router::new().merge(content_routes).merge(client_routes))
        .layer(cors)
        .with_state(app_state)
}

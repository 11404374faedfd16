//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the content generation endpoints and the
//! master definition for the OpenAPI specification.

use crate::web::{
    client,
    protocol::{
        AiUpdatePayload, AiUpdateResponse, BlogResponse, CaptionResponse, DesignResponse,
        EmailResponse, ErrorResponse, FailureResponse, FeedbackPayload, FeedbackResponse,
        GenerateBlogPayload, GenerateCaptionPayload, GenerateDesignPayload, GenerateEmailPayload,
        GenerateInvoicePayload, GenerateMockupPayload, GenerateProductPayload,
        GenerateQuotePayload, InvoiceItemPayload, InvoiceResponse, LoginPayload, LoginResponse,
        MockupResponse, ProductResponse, ProjectResponse, QuoteFailureResponse, QuoteResponse,
    },
    state::AppState,
};
use agency_core::{
    domain::{BlogRequest, CaptionRequest, DesignRequest, EmailRequest, ProductRequest},
    invoice::{compute_invoice, InvoiceRequest},
    mockup::render_mockup,
    orchestrator::ValidationError,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        generate_quote_handler,
        generate_design_handler,
        generate_mockup_handler,
        generate_blog_handler,
        generate_caption_handler,
        generate_email_handler,
        generate_product_handler,
        generate_invoice_handler,
        client::login_handler,
        client::get_project_handler,
        client::feedback_handler,
        client::ai_update_handler,
    ),
    components(
        schemas(
            GenerateQuotePayload, GenerateDesignPayload, GenerateMockupPayload,
            GenerateBlogPayload, GenerateCaptionPayload, GenerateEmailPayload,
            GenerateProductPayload, QuoteResponse, DesignResponse, MockupResponse,
            BlogResponse, CaptionResponse, EmailResponse, ProductResponse, ErrorResponse,
            LoginPayload, LoginResponse, ProjectResponse, FeedbackPayload, FeedbackResponse,
            AiUpdatePayload, AiUpdateResponse, FailureResponse, GenerateInvoicePayload,
            InvoiceItemPayload, InvoiceResponse, QuoteFailureResponse
        )
    ),
    tags(
        (name = "Agency Toolkit API", description = "Quote estimation, website design previews and marketing copy generation.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Mapping
//=========================================================================================

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Unpacks a JSON body, turning a rejection into a 400.
fn read_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HandlerError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!("Rejected request body: {}", rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid request body".to_string(),
                details: Some(rejection.body_text()),
            }),
        )
    })
}

fn bad_request(err: ValidationError) -> HandlerError {
    warn!(field = err.field, "Validation failed: {}", err.message);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.message,
            details: None,
        }),
    )
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Estimate the price and schedule of a website project.
///
/// Prices always come from the pricing rules. The completion service only
/// contributes suggestions, reported with `confidence = high`.
#[utoipa::path(
    post,
    path = "/api/generate-quote",
    request_body = GenerateQuotePayload,
    responses(
        (status = 200, description = "Quote generated", body = QuoteResponse),
        (status = 400, description = "Body is not a JSON object", body = QuoteFailureResponse)
    )
)]
pub async fn generate_quote_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<GenerateQuotePayload>, JsonRejection>,
) -> Result<impl IntoResponse, (StatusCode, Json<QuoteFailureResponse>)> {
    let payload = read_body(payload).map_err(|(status, Json(body))| {
        (
            status,
            Json(QuoteFailureResponse {
                success: false,
                error: body.details.unwrap_or(body.error),
            }),
        )
    })?;
    let quote = app_state
        .orchestrator
        .generate_quote(&payload.form_data, &payload.prompt)
        .await;

    Ok(Json(QuoteResponse {
        success: true,
        quote,
        timestamp: Utc::now(),
    }))
}

/// Generate a website design from a free-text description.
#[utoipa::path(
    post,
    path = "/api/generate-design",
    request_body = GenerateDesignPayload,
    responses(
        (status = 200, description = "Design generated", body = DesignResponse),
        (status = 400, description = "Description shorter than 10 characters", body = ErrorResponse)
    )
)]
pub async fn generate_design_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<GenerateDesignPayload>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let request: DesignRequest = read_body(payload)?.into();
    let generated = app_state
        .orchestrator
        .generate_design(&request)
        .await
        .map_err(bad_request)?;

    Ok(Json(DesignResponse {
        success: true,
        design: generated.content,
        timestamp: Utc::now(),
    }))
}

/// Render a design into a self-contained HTML preview page.
#[utoipa::path(
    post,
    path = "/api/generate-mockup",
    request_body = GenerateMockupPayload,
    responses(
        (status = 200, description = "Mockup rendered", body = MockupResponse),
        (status = 400, description = "Missing or malformed design", body = ErrorResponse)
    )
)]
pub async fn generate_mockup_handler(
    payload: Result<Json<GenerateMockupPayload>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let payload = read_body(payload)?;

    Ok(Json(MockupResponse {
        success: true,
        mockup: render_mockup(&payload.design),
        timestamp: Utc::now(),
    }))
}

/// Write a blog article outline with introduction, sections and conclusion.
#[utoipa::path(
    post,
    path = "/api/generate-blog",
    request_body = GenerateBlogPayload,
    responses(
        (status = 200, description = "Article generated", body = BlogResponse),
        (status = 400, description = "Topic shorter than 5 characters", body = ErrorResponse)
    )
)]
pub async fn generate_blog_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<GenerateBlogPayload>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let request: BlogRequest = read_body(payload)?.into();
    let generated = app_state
        .orchestrator
        .generate_blog(&request)
        .await
        .map_err(bad_request)?;

    Ok(Json(BlogResponse {
        success: true,
        content: generated.content,
        timestamp: Utc::now(),
    }))
}

/// Write three social media caption variants.
#[utoipa::path(
    post,
    path = "/api/generate-caption",
    request_body = GenerateCaptionPayload,
    responses(
        (status = 200, description = "Captions generated", body = CaptionResponse),
        (status = 400, description = "Post content shorter than 5 characters", body = ErrorResponse)
    )
)]
pub async fn generate_caption_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<GenerateCaptionPayload>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let request: CaptionRequest = read_body(payload)?.into();
    let generated = app_state
        .orchestrator
        .generate_caption(&request)
        .await
        .map_err(bad_request)?;

    Ok(Json(CaptionResponse {
        success: true,
        captions: generated.content,
        timestamp: Utc::now(),
    }))
}

/// Write a marketing email.
#[utoipa::path(
    post,
    path = "/api/generate-email",
    request_body = GenerateEmailPayload,
    responses(
        (status = 200, description = "Email generated", body = EmailResponse),
        (status = 400, description = "Subject or goal missing", body = ErrorResponse)
    )
)]
pub async fn generate_email_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<GenerateEmailPayload>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let request: EmailRequest = read_body(payload)?.into();
    let generated = app_state
        .orchestrator
        .generate_email(&request)
        .await
        .map_err(bad_request)?;

    Ok(Json(EmailResponse {
        success: true,
        content: generated.content,
        timestamp: Utc::now(),
    }))
}

/// Write a product description.
#[utoipa::path(
    post,
    path = "/api/generate-product",
    request_body = GenerateProductPayload,
    responses(
        (status = 200, description = "Product description generated", body = ProductResponse),
        (status = 400, description = "Name or features missing", body = ErrorResponse)
    )
)]
pub async fn generate_product_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<GenerateProductPayload>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let request: ProductRequest = read_body(payload)?.into();
    let generated = app_state
        .orchestrator
        .generate_product(&request)
        .await
        .map_err(bad_request)?;

    Ok(Json(ProductResponse {
        success: true,
        content: generated.content,
        timestamp: Utc::now(),
    }))
}

/// Price an invoice: line amounts, subtotal, tax and total.
#[utoipa::path(
    post,
    path = "/api/generate-invoice",
    request_body = GenerateInvoicePayload,
    responses(
        (status = 200, description = "Invoice computed", body = InvoiceResponse),
        (status = 400, description = "No line items", body = ErrorResponse)
    )
)]
pub async fn generate_invoice_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<GenerateInvoicePayload>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let request: InvoiceRequest = read_body(payload)?.into();
    let invoice = compute_invoice(&request, &app_state.invoices, Utc::now().date_naive())
        .map_err(bad_request)?;

    Ok(Json(InvoiceResponse {
        success: true,
        invoice,
        timestamp: Utc::now(),
    }))
}

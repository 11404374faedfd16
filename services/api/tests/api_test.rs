//! Tests for REST API endpoints

use agency_core::{
    invoice::InvoiceSequence,
    orchestrator::ContentOrchestrator,
    ports::{CompletionRequest, CompletionService, PortResult},
    pricing::PricingPolicy,
};
use api_lib::{
    adapters::{InMemoryProjectRepository, OpenAiCompletionAdapter},
    config::Config,
    web::{create_router, state::AppState},
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;
use tower::ServiceExt;

/// Answers every prompt with the same text and counts the calls.
struct FixedCompletion {
    answer: String,
    calls: AtomicUsize,
}

#[async_trait]
impl CompletionService for FixedCompletion {
    async fn complete(&self, _request: &CompletionRequest) -> PortResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}

fn router_with(completion: Arc<dyn CompletionService>) -> Router {
    let config = Arc::new(Config::default());
    let state = AppState {
        orchestrator: ContentOrchestrator::new(completion, PricingPolicy::default()),
        repository: Arc::new(InMemoryProjectRepository::seeded()),
        invoices: Arc::new(InvoiceSequence::default()),
        config,
    };
    create_router(Arc::new(state))
}

/// A router whose completion adapter has no API key, so every generator falls back.
fn offline_router() -> Router {
    router_with(Arc::new(OpenAiCompletionAdapter::new(
        None,
        "gpt-3.5-turbo".to_string(),
        Duration::from_secs(1),
    )))
}

fn fixed(answer: &str) -> Arc<FixedCompletion> {
    Arc::new(FixedCompletion {
        answer: answer.to_string(),
        calls: AtomicUsize::new(0),
    })
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

async fn post_raw(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_generate_quote_offline_uses_pricing_rules() {
    let (status, body) = post_json(
        offline_router(),
        "/api/generate-quote",
        json!({
            "formData": {
                "projectType": "business",
                "features": ["cms", "seo"],
                "timeline": "rush",
                "budgetRange": "medium"
            },
            "prompt": ""
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["quote"]["totalCost"], 4000);
    assert_eq!(body["quote"]["totalDays"], 14);
    assert_eq!(body["quote"]["confidence"], "medium");
    assert_eq!(body["quote"]["currency"], "USD");
    assert!(body["timestamp"].is_string());

    let breakdown_sum: u64 = body["quote"]["breakdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["amount"].as_u64().unwrap())
        .sum();
    assert_eq!(breakdown_sum, 4000);
}

#[tokio::test]
async fn test_generate_quote_with_ai_suggestions() {
    let completion = fixed(r#"{"totalCost": 99, "suggestions": ["Add online booking"]}"#);
    let (status, body) = post_json(
        router_with(completion.clone()),
        "/api/generate-quote",
        json!({ "formData": { "projectType": "blog", "timeline": "relaxed" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["totalCost"], 900);
    assert_eq!(body["quote"]["confidence"], "high");
    assert_eq!(body["quote"]["suggestions"], json!(["Add online booking"]));
    assert_eq!(completion.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_generate_quote_empty_body_defaults() {
    let (status, body) = post_json(offline_router(), "/api/generate-quote", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["totalCost"], 3000);
    assert_eq!(body["quote"]["totalDays"], 21);
}

#[tokio::test]
async fn test_generate_quote_null_fields_default() {
    let (status, body) = post_json(
        offline_router(),
        "/api/generate-quote",
        json!({
            "formData": { "projectType": null, "features": null, "timeline": null },
            "prompt": null
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["totalCost"], 3000);
    assert_eq!(body["quote"]["totalDays"], 21);

    let (status, body) = post_json(
        offline_router(),
        "/api/generate-quote",
        json!({ "formData": { "projectType": "blog", "features": "cms" } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["totalCost"], 1000);

    let (status, body) =
        post_json(offline_router(), "/api/generate-quote", json!({ "formData": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["totalCost"], 3000);
}

#[tokio::test]
async fn test_generate_quote_malformed_body_failure_shape() {
    let (status, body) =
        post_raw(offline_router(), "/api/generate-quote", "not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn test_generate_design_short_description_is_rejected() {
    let completion = fixed("{}");
    let (status, body) = post_json(
        router_with(completion.clone()),
        "/api/generate-design",
        json!({ "description": "  shop  " }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("10 characters"));
    assert_eq!(completion.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_generate_design_offline_and_mockup() {
    let app = offline_router();
    let (status, body) = post_json(
        app.clone(),
        "/api/generate-design",
        json!({ "description": "An online store for handmade candles" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["design"]["websiteType"], "ecommerce");
    assert!(!body["design"]["sections"].as_array().unwrap().is_empty());

    let (status, mockup) = post_json(
        app,
        "/api/generate-mockup",
        json!({ "design": body["design"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(mockup["mockup"]
        .as_str()
        .unwrap()
        .starts_with("<!DOCTYPE html>"));
}

#[tokio::test]
async fn test_generate_mockup_without_design_is_bad_request() {
    let (status, body) = post_json(offline_router(), "/api/generate-mockup", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_generate_caption_malformed_completion_falls_back() {
    let (status, body) = post_json(
        router_with(fixed("Sure! Here are some captions for you.")),
        "/api/generate-caption",
        json!({
            "content": "Grand opening this weekend",
            "includeHashtags": true,
            "platform": "instagram"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let captions = body["captions"]["captions"].as_array().unwrap();
    let counts = body["captions"]["characterCounts"].as_array().unwrap();
    assert_eq!(captions.len(), 3);
    for (caption, count) in captions.iter().zip(counts) {
        let text = caption["text"].as_str().unwrap();
        assert_eq!(count.as_u64().unwrap() as usize, text.chars().count());
    }
    assert_eq!(body["captions"]["platform"], "instagram");
}

#[tokio::test]
async fn test_content_validation_errors() {
    let app = offline_router();

    let (status, _) = post_json(app.clone(), "/api/generate-blog", json!({ "topic": "SEO" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(
        app.clone(),
        "/api/generate-email",
        json!({ "subject": "Spring sale" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = post_json(app, "/api/generate-product", json!({ "name": "Desk lamp" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_blog_email_product_offline() {
    let app = offline_router();

    let (status, body) = post_json(
        app.clone(),
        "/api/generate-blog",
        json!({ "topic": "Local SEO for bakeries", "length": "short" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"]["wordCount"], "450");

    let (status, body) = post_json(
        app.clone(),
        "/api/generate-email",
        json!({ "subject": "Spring sale", "goal": "Drive store visits" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["content"]["body"].is_string());

    let (status, body) = post_json(
        app,
        "/api/generate-product",
        json!({ "name": "Desk lamp", "features": "LED, dimmable, USB-C" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["content"]["shortDescription"].is_string());
}

#[tokio::test]
async fn test_client_login() {
    let app = offline_router();

    let (status, body) = post_json(
        app.clone(),
        "/api/client/login",
        json!({ "email": "john.doe@example.com", "password": "demo123" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token"], "demo_token_client_001");
    assert_eq!(body["client"]["projectId"], "proj_001");
    assert!(body["client"].get("password").is_none());

    let (status, body) = post_json(
        app,
        "/api/client/login",
        json!({ "email": "john.doe@example.com", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_client_project_lookup() {
    let app = offline_router();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/client/project/proj_001")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/client/project/proj_999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_client_feedback() {
    let app = offline_router();

    let (status, _) = post_json(
        app.clone(),
        "/api/client/feedback",
        json!({ "projectId": "proj_001", "clientId": "client_001", "message": "   " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(
        app,
        "/api/client/feedback",
        json!({
            "projectId": "proj_001",
            "clientId": "client_001",
            "message": "Love the new cart!"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["feedback"]["status"], "new");
    assert_eq!(body["feedback"]["message"], "Love the new cart!");
}

#[tokio::test]
async fn test_client_ai_update() {
    let (status, body) = post_json(
        offline_router(),
        "/api/client/ai-update",
        json!({ "projectId": "proj_001" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["update"]["confidence"], 85);
    assert!(!body["update"]["message"].as_str().unwrap().is_empty());

    let (status, body) = post_json(
        router_with(fixed("Development is on track for testing next week.")),
        "/api/client/ai-update",
        json!({ "projectId": "proj_001" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["update"]["confidence"], 95);

    let (status, _) = post_json(
        offline_router(),
        "/api/client/ai-update",
        json!({ "projectId": "proj_404" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_invoice() {
    let app = offline_router();

    let (status, body) = post_json(
        app.clone(),
        "/api/generate-invoice",
        json!({
            "issueDate": "2025-08-20",
            "currency": "USD",
            "taxRate": 10,
            "items": [
                { "description": "Landing page", "quantity": 1, "rate": 800 },
                { "description": "Copywriting", "quantity": 2.5, "rate": 40 }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invoice"]["invoiceNumber"], "INV-001");
    assert_eq!(body["invoice"]["subtotal"], "900.00");
    assert_eq!(body["invoice"]["tax"], "90.00");
    assert_eq!(body["invoice"]["total"], "990.00");
    assert_eq!(body["invoice"]["dueDate"], "2025-09-19");
    assert_eq!(body["invoice"]["currencySymbol"], "$");

    let (status, _) = post_json(app, "/api/generate-invoice", json!({ "items": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

//! crates/agency_core/src/orchestrator.rs
//!
//! Per-kind handlers that validate input, ask the gateway for content and
//! substitute the deterministic fallback whenever the gateway fails.
//!
//! Validation failures are returned to the caller. Gateway failures never are:
//! they are logged and replaced by fallback content of the same shape.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{
    BlogContent, BlogRequest, CaptionRequest, CaptionSet, Confidence, DesignRequest,
    EmailContent, EmailRequest, GeneratedQuote, ProductContent, ProductRequest, Project,
    ProjectUpdate, QuoteRequest, WebsiteDesign,
};
use crate::fallback::{self, generate_fallback};
use crate::gateway::{Gateway, ParsedContent};
use crate::ports::CompletionService;
use crate::pricing::{self, PricingPolicy};
use crate::prompts::ContentRequest;

/// Minimum trimmed length of a design description.
pub const MIN_DESIGN_DESCRIPTION: usize = 10;
/// Minimum trimmed length of a blog topic or caption content.
pub const MIN_SHORT_TEXT: usize = 5;

/// Confidence percentages reported on project updates.
const AI_UPDATE_CONFIDENCE: u8 = 95;
const FALLBACK_UPDATE_CONFIDENCE: u8 = 85;

/// A request rejected before any completion was attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Which path produced a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    pub content: T,
    pub source: Source,
}

fn require_min_chars(
    field: &'static str,
    value: &str,
    min: usize,
    message: &str,
) -> Result<(), ValidationError> {
    if value.trim().chars().count() < min {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

fn require_present(field: &'static str, value: &str, message: &str) -> Result<(), ValidationError> {
    require_min_chars(field, value, 1, message)
}

//=========================================================================================
// ContentOrchestrator
//=========================================================================================

#[derive(Clone)]
pub struct ContentOrchestrator {
    gateway: Gateway,
    policy: PricingPolicy,
}

impl ContentOrchestrator {
    pub fn new(completion: Arc<dyn CompletionService>, policy: PricingPolicy) -> Self {
        Self {
            gateway: Gateway::new(completion),
            policy,
        }
    }

    /// Calls the gateway once and falls back on any error.
    async fn produce(&self, request: ContentRequest<'_>) -> (ParsedContent, Source) {
        let kind = request.kind();
        match self.gateway.request_completion(request).await {
            Ok(parsed) => {
                info!(%kind, "Content generated by completion service");
                (parsed, Source::Ai)
            }
            Err(err) => {
                warn!(%kind, error = %err, "Completion failed, using fallback content");
                (generate_fallback(request), Source::Fallback)
            }
        }
    }

    /// Prices the request with the rule engine and attaches narrative
    /// suggestions from the completion service when available.
    ///
    /// Never fails: every field of the request has a default.
    pub async fn generate_quote(&self, request: &QuoteRequest, prompt: &str) -> GeneratedQuote {
        let mut quote = pricing::compute_quote(request, &self.policy, Utc::now());
        let (parsed, source) = self.produce(ContentRequest::Quote { request, prompt }).await;

        let narrative = match parsed {
            ParsedContent::Quote(narrative) => narrative,
            _ => fallback::quote(request),
        };
        quote.suggestions = narrative
            .suggestions
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        quote.confidence = match source {
            Source::Ai => Confidence::High,
            Source::Fallback => Confidence::Medium,
        };
        quote
    }

    pub async fn generate_design(
        &self,
        request: &DesignRequest,
    ) -> Result<Generated<WebsiteDesign>, ValidationError> {
        require_min_chars(
            "description",
            &request.description,
            MIN_DESIGN_DESCRIPTION,
            "Please provide a more detailed description of your website needs (at least 10 characters)",
        )?;

        let (parsed, source) = self.produce(ContentRequest::Design(request)).await;
        let content = match parsed {
            ParsedContent::Design(design) => design,
            _ => fallback::design(request),
        };
        Ok(Generated { content, source })
    }

    pub async fn generate_blog(
        &self,
        request: &BlogRequest,
    ) -> Result<Generated<BlogContent>, ValidationError> {
        require_min_chars(
            "topic",
            &request.topic,
            MIN_SHORT_TEXT,
            "Please provide a more detailed blog topic (at least 5 characters)",
        )?;

        let (parsed, source) = self.produce(ContentRequest::Blog(request)).await;
        let content = match parsed {
            ParsedContent::Blog(blog) => blog,
            _ => fallback::blog(request),
        };
        Ok(Generated { content, source })
    }

    pub async fn generate_caption(
        &self,
        request: &CaptionRequest,
    ) -> Result<Generated<CaptionSet>, ValidationError> {
        require_min_chars(
            "content",
            &request.content,
            MIN_SHORT_TEXT,
            "Please describe what your post is about (at least 5 characters)",
        )?;

        let (parsed, source) = self.produce(ContentRequest::Caption(request)).await;
        let content = match parsed {
            ParsedContent::Caption(captions) => captions,
            _ => fallback::caption(request),
        };
        Ok(Generated { content, source })
    }

    pub async fn generate_email(
        &self,
        request: &EmailRequest,
    ) -> Result<Generated<EmailContent>, ValidationError> {
        let message = "Please provide both subject and goal for the email";
        require_present("subject", &request.subject, message)?;
        require_present("goal", &request.goal, message)?;

        let (parsed, source) = self.produce(ContentRequest::Email(request)).await;
        let content = match parsed {
            ParsedContent::Email(email) => email,
            _ => fallback::email(request),
        };
        Ok(Generated { content, source })
    }

    pub async fn generate_product(
        &self,
        request: &ProductRequest,
    ) -> Result<Generated<ProductContent>, ValidationError> {
        let message = "Please provide both product name and features";
        require_present("name", &request.name, message)?;
        require_present("features", &request.features, message)?;

        let (parsed, source) = self.produce(ContentRequest::Product(request)).await;
        let content = match parsed {
            ParsedContent::Product(product) => product,
            _ => fallback::product(request),
        };
        Ok(Generated { content, source })
    }

    pub async fn generate_project_update(&self, project: &Project) -> ProjectUpdate {
        let (parsed, source) = self.produce(ContentRequest::ProjectUpdate(project)).await;
        let message = match parsed {
            ParsedContent::ProjectUpdate(message) => message,
            _ => fallback::project_update(project),
        };

        ProjectUpdate {
            message,
            timestamp: Utc::now(),
            confidence: match source {
                Source::Ai => AI_UPDATE_CONFIDENCE,
                Source::Fallback => FALLBACK_UPDATE_CONFIDENCE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetBand, Feature, ProjectType, TimelinePreference};
    use crate::gateway::tests::ScriptedCompletion;
    use crate::ports::PortError;
    use std::collections::BTreeSet;

    fn orchestrator(completion: Arc<ScriptedCompletion>) -> ContentOrchestrator {
        ContentOrchestrator::new(completion, PricingPolicy::default())
    }

    fn business_rush() -> QuoteRequest {
        QuoteRequest {
            project_type: ProjectType::Business,
            features: vec![Feature::Cms, Feature::Seo],
            timeline: TimelinePreference::Rush,
            budget_band: Some(BudgetBand::Medium),
            description: "Law firm".to_string(),
        }
    }

    fn keys(value: &serde_json::Value) -> BTreeSet<String> {
        value
            .as_object()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn ai_quote_keeps_rule_prices_and_takes_suggestions() {
        let completion = ScriptedCompletion::answering(Ok(
            r#"{"totalCost": 1, "suggestions": ["Add a client portal", " "]}"#.to_string(),
        ));
        let quote = orchestrator(completion)
            .generate_quote(&business_rush(), "")
            .await;

        assert_eq!(quote.total_cost, 4000);
        assert_eq!(quote.confidence, Confidence::High);
        assert_eq!(quote.suggestions, vec!["Add a client portal".to_string()]);
    }

    #[tokio::test]
    async fn failed_quote_uses_rule_engine() {
        let completion =
            ScriptedCompletion::answering(Err(PortError::Upstream("invalid api key".to_string())));
        let quote = orchestrator(completion)
            .generate_quote(&business_rush(), "")
            .await;

        assert_eq!(quote.total_cost, 4000);
        assert_eq!(quote.confidence, Confidence::Medium);
        assert_eq!(quote.suggestions, pricing::suggestions(&ProjectType::Business));
    }

    #[tokio::test]
    async fn quote_shapes_match_across_sources() {
        let ai = orchestrator(ScriptedCompletion::answering(Ok(
            r#"{"suggestions": ["Add a blog"]}"#.to_string(),
        )))
        .generate_quote(&business_rush(), "")
        .await;
        let fallback = orchestrator(ScriptedCompletion::answering(Ok("not json".to_string())))
            .generate_quote(&business_rush(), "")
            .await;

        let ai_json = serde_json::to_value(&ai).unwrap();
        let fallback_json = serde_json::to_value(&fallback).unwrap();
        assert_eq!(keys(&ai_json), keys(&fallback_json));
        assert_eq!(ai.breakdown, fallback.breakdown);
        assert_eq!(ai.timeline, fallback.timeline);
        assert_ne!(ai.confidence, fallback.confidence);
    }

    #[tokio::test]
    async fn malformed_caption_falls_back_with_same_shape() {
        let completion = ScriptedCompletion::answering(Ok("Here are three captions!".to_string()));
        let request = CaptionRequest {
            content: "Grand opening this Saturday".to_string(),
            platform: Some("facebook".to_string()),
            ..Default::default()
        };
        let generated = orchestrator(completion)
            .generate_caption(&request)
            .await
            .unwrap();

        assert_eq!(generated.source, Source::Fallback);
        assert_eq!(generated.content, fallback::caption(&request));

        let json = serde_json::to_value(&generated.content).unwrap();
        assert_eq!(
            keys(&json),
            ["captions", "characterCounts", "platform"]
                .into_iter()
                .map(String::from)
                .collect::<BTreeSet<String>>()
        );
    }

    #[tokio::test]
    async fn short_design_description_never_reaches_gateway() {
        let completion = ScriptedCompletion::answering(Ok("{}".to_string()));
        let err = orchestrator(completion.clone())
            .generate_design(&DesignRequest {
                description: "  shop    ".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.field, "description");
        assert_eq!(completion.call_count(), 0);
    }

    #[tokio::test]
    async fn content_validation_rules() {
        let orchestrator = orchestrator(ScriptedCompletion::answering(Ok("{}".to_string())));

        let blog = BlogRequest {
            topic: "SEO".to_string(),
            ..Default::default()
        };
        assert_eq!(orchestrator.generate_blog(&blog).await.unwrap_err().field, "topic");

        let email = EmailRequest {
            subject: "Launch".to_string(),
            ..Default::default()
        };
        assert_eq!(orchestrator.generate_email(&email).await.unwrap_err().field, "goal");

        let product = ProductRequest {
            name: "Lamp".to_string(),
            features: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            orchestrator.generate_product(&product).await.unwrap_err().field,
            "features"
        );
    }

    #[tokio::test]
    async fn ai_email_is_passed_through() {
        let completion = ScriptedCompletion::answering(Ok(r#"```json
{"subject":"S","opening":"O","body":"B","cta":"C","closing":"X"}
```"#
            .to_string()));
        let generated = orchestrator(completion)
            .generate_email(&EmailRequest {
                subject: "Launch".to_string(),
                goal: "Sign-ups".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(generated.source, Source::Ai);
        assert_eq!(generated.content.subject, "S");
    }
}

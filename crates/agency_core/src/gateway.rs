//! crates/agency_core/src/gateway.rs
//!
//! The AI completion gateway: one outbound completion call per request, with
//! the response parsed into the exact shape expected for its content kind.
//!
//! The gateway never retries and never caches. Any failure is returned to the
//! caller as a `GatewayError`, and recovery is the orchestrator's job.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::domain::{BlogContent, CaptionSet, EmailContent, ProductContent, WebsiteDesign};
use crate::ports::{CompletionService, PortError};
use crate::prompts::{ContentKind, ContentRequest};

//=========================================================================================
// Errors and Results
//=========================================================================================

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The completion service could not be reached or did not answer in time.
    #[error("Network failure: {0}")]
    NetworkFailure(String),
    /// The completion text did not match the shape expected for its kind.
    #[error("Malformed {kind} response: {reason}")]
    MalformedResponse { kind: ContentKind, reason: String },
    /// The completion service answered with an error or an empty completion.
    #[error("Upstream error: {0}")]
    UpstreamError(String),
}

impl From<PortError> for GatewayError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::Timeout(after) => {
                Self::NetworkFailure(format!("timed out after {:?}", after))
            }
            PortError::Upstream(msg) => Self::UpstreamError(msg),
            PortError::NotFound(msg) | PortError::Unexpected(msg) => Self::NetworkFailure(msg),
        }
    }
}

/// The narrative part of an AI-assisted quote. Prices always come from the
/// rule engine, so nothing else is read from the completion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteNarrative {
    pub suggestions: Vec<String>,
}

/// A successfully parsed completion, tagged by content kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedContent {
    Quote(QuoteNarrative),
    Design(WebsiteDesign),
    Blog(BlogContent),
    Caption(CaptionSet),
    Email(EmailContent),
    Product(ProductContent),
    ProjectUpdate(String),
}

//=========================================================================================
// Gateway
//=========================================================================================

#[derive(Clone)]
pub struct Gateway {
    completion: Arc<dyn CompletionService>,
}

impl Gateway {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Sends the prompt for `request` and parses the answer.
    pub async fn request_completion(
        &self,
        request: ContentRequest<'_>,
    ) -> Result<ParsedContent, GatewayError> {
        let kind = request.kind();
        let completion = request.to_completion();
        debug!(%kind, prompt_len = completion.prompt.len(), "Requesting completion");

        let text = self.completion.complete(&completion).await?;
        if text.trim().is_empty() {
            return Err(GatewayError::UpstreamError(format!(
                "empty completion for {}",
                kind
            )));
        }

        parse_completion(kind, &text)
    }
}

/// Parses completion text into the shape for `kind`, rejecting anything else.
pub fn parse_completion(kind: ContentKind, text: &str) -> Result<ParsedContent, GatewayError> {
    match kind {
        ContentKind::Quote => {
            let narrative: QuoteNarrative = parse_json(kind, text)?;
            if narrative.suggestions.iter().all(|s| s.trim().is_empty()) {
                return Err(malformed(kind, "no suggestions"));
            }
            Ok(ParsedContent::Quote(narrative))
        }
        ContentKind::Design => {
            let design: WebsiteDesign = parse_json(kind, text)?;
            if design.sections.is_empty() {
                return Err(malformed(kind, "no sections"));
            }
            Ok(ParsedContent::Design(design))
        }
        ContentKind::Blog => Ok(ParsedContent::Blog(parse_json(kind, text)?)),
        ContentKind::Caption => {
            let captions: CaptionSet = parse_json(kind, text)?;
            if captions.captions.is_empty() {
                return Err(malformed(kind, "no captions"));
            }
            Ok(ParsedContent::Caption(captions.with_counts()))
        }
        ContentKind::Email => Ok(ParsedContent::Email(parse_json(kind, text)?)),
        ContentKind::Product => Ok(ParsedContent::Product(parse_json(kind, text)?)),
        ContentKind::ProjectUpdate => Ok(ParsedContent::ProjectUpdate(text.trim().to_string())),
    }
}

fn parse_json<T: DeserializeOwned>(kind: ContentKind, text: &str) -> Result<T, GatewayError> {
    serde_json::from_str(strip_code_fence(text)).map_err(|e| malformed(kind, e.to_string()))
}

fn malformed(kind: ContentKind, reason: impl Into<String>) -> GatewayError {
    GatewayError::MalformedResponse {
        kind,
        reason: reason.into(),
    }
}

/// Removes a surrounding markdown code fence (```json ... ```), if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::{CaptionRequest, EmailRequest, QuoteRequest};
    use crate::ports::{CompletionRequest, PortResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// A completion service that replays one scripted answer and records prompts.
    pub(crate) struct ScriptedCompletion {
        answer: Mutex<Option<PortResult<String>>>,
        pub(crate) calls: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedCompletion {
        pub(crate) fn answering(answer: PortResult<String>) -> Arc<Self> {
            Arc::new(Self {
                answer: Mutex::new(Some(answer)),
                calls: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.lock().map(|c| c.len()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedCompletion {
        async fn complete(&self, request: &CompletionRequest) -> PortResult<String> {
            self.calls.lock().unwrap().push(request.clone());
            self.answer
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| {
                    Err(PortError::Unexpected("no scripted answer left".to_string()))
                })
        }
    }

    #[test]
    fn strips_json_code_fences() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn caption_counts_are_recomputed() {
        let text = r#"{"captions":[{"version":"A","text":"hello"}],"platform":"x","characterCounts":[99]}"#;
        let parsed = parse_completion(ContentKind::Caption, text).unwrap();

        match parsed {
            ParsedContent::Caption(set) => assert_eq!(set.character_counts, vec![5]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn blog_word_count_accepts_numbers() {
        let text = r#"{"title":"T","introduction":"I","sections":[],"conclusion":"C","wordCount":800}"#;
        match parse_completion(ContentKind::Blog, text).unwrap() {
            ParsedContent::Blog(blog) => assert_eq!(blog.word_count, "800"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let err = parse_completion(ContentKind::Email, r#"{"subject":"only a subject"}"#).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::MalformedResponse { kind: ContentKind::Email, .. }
        ));

        let err = parse_completion(ContentKind::Quote, "Sure! Here is your quote.").unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse { .. }));

        let err = parse_completion(ContentKind::Design, r#"{"websiteType":"spaceship"}"#).unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn sends_exactly_one_request() {
        let completion = ScriptedCompletion::answering(Ok(r#"{"suggestions":["Add a blog"]}"#.to_string()));
        let gateway = Gateway::new(completion.clone());
        let request = QuoteRequest::default();

        let parsed = gateway
            .request_completion(ContentRequest::Quote { request: &request, prompt: "" })
            .await
            .unwrap();

        assert_eq!(
            parsed,
            ParsedContent::Quote(QuoteNarrative {
                suggestions: vec!["Add a blog".to_string()]
            })
        );
        assert_eq!(completion.call_count(), 1);
    }

    #[tokio::test]
    async fn port_failures_map_to_gateway_errors() {
        let completion = ScriptedCompletion::answering(Err(PortError::Timeout(
            std::time::Duration::from_secs(15),
        )));
        let gateway = Gateway::new(completion);
        let request = EmailRequest::default();
        let err = gateway
            .request_completion(ContentRequest::Email(&request))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NetworkFailure(_)));

        let completion = ScriptedCompletion::answering(Err(PortError::Upstream("429".to_string())));
        let gateway = Gateway::new(completion);
        let request = CaptionRequest::default();
        let err = gateway
            .request_completion(ContentRequest::Caption(&request))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::UpstreamError(_)));
    }

    #[tokio::test]
    async fn blank_completion_is_an_upstream_error() {
        let completion = ScriptedCompletion::answering(Ok("   ".to_string()));
        let gateway = Gateway::new(completion);
        let request = EmailRequest::default();
        let err = gateway
            .request_completion(ContentRequest::Email(&request))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::UpstreamError(_)));
    }
}

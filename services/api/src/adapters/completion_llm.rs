//! services/api/src/adapters/completion_llm.rs
//!
//! This module contains the adapter for the content-generating LLM.
//! It implements the `CompletionService` port from the `core` crate.

use agency_core::ports::{CompletionRequest, CompletionService, PortError, PortResult};
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CompletionService` using an OpenAI-compatible chat model.
///
/// When no API key is configured the adapter has no client and every call
/// fails with `PortError::Upstream`, which sends all requests down the
/// fallback path.
#[derive(Clone)]
pub struct OpenAiCompletionAdapter {
    client: Option<Client<OpenAIConfig>>,
    model: String,
    timeout: Duration,
}

impl OpenAiCompletionAdapter {
    pub fn new(api_key: Option<&str>, model: String, timeout: Duration) -> Self {
        let client = api_key
            .map(|key| Client::with_config(OpenAIConfig::new().with_api_key(key)));
        if client.is_none() {
            warn!("OPENAI_API_KEY is not set; all content will come from the fallback generator");
        }
        Self {
            client,
            model,
            timeout,
        }
    }
}

//=========================================================================================
// `CompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompletionService for OpenAiCompletionAdapter {
    async fn complete(&self, request: &CompletionRequest) -> PortResult<String> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| PortError::Upstream("no API key configured".to_string()))?;

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system.as_str())
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.prompt.as_str())
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(request.max_tokens)
            .temperature(request.temperature)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        debug!(model = %self.model, "Sending chat completion request");
        let response = tokio::time::timeout(self.timeout, client.chat().create(chat_request))
            .await
            .map_err(|_| PortError::Timeout(self.timeout))?
            .map_err(map_openai_error)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PortError::Upstream("completion contained no choices".to_string()))
    }
}

/// Transport problems are unexpected; anything the API itself reported is upstream.
fn map_openai_error(err: OpenAIError) -> PortError {
    match err {
        OpenAIError::Reqwest(e) => PortError::Unexpected(e.to_string()),
        other => PortError::Upstream(other.to_string()),
    }
}

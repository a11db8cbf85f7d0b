//! OpenAI-compatible Provider - AIProvider over a `/chat/completions` endpoint.
//!
//! Perplexity and Together AI both expose the OpenAI chat-completions wire
//! format, so a single adapter serves either one (or any compatible host).
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAICompatConfig::new(api_key, "https://api.perplexity.ai", "sonar-medium-online")
//!     .with_provider_name("perplexity")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let provider = OpenAICompatProvider::new(config)?;
//! ```
//!
//! No retries are attempted: any non-success status or unexpected payload is
//! returned to the caller as an error.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, TokenUsage,
};

/// Configuration for an OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAICompatConfig {
    /// API key for bearer authentication.
    api_key: Secret<String>,
    /// Provider name reported in [`ProviderInfo`].
    pub provider_name: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAICompatConfig {
    /// Creates a new configuration.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            provider_name: "openai-compatible".to_string(),
            model: model.into(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the provider name.
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Chat-completions provider for Perplexity, Together AI and compatible APIs.
pub struct OpenAICompatProvider {
    config: OpenAICompatConfig,
    client: Client,
}

impl OpenAICompatProvider {
    /// Creates a new provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `AIError::Network` if the HTTP client cannot be built.
    pub fn new(config: OpenAICompatConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to the wire format.
    fn to_wire_request(&self, request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref prompt) = request.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(ChatMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            });
        }

        ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> AIError {
        if e.is_timeout() {
            AIError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            AIError::network(format!("Connection failed: {}", e))
        } else {
            AIError::network(e.to_string())
        }
    }
}

/// Extracts the first choice's content from a raw response body.
fn parse_completion(body: &str, fallback_model: &str) -> Result<CompletionResponse, AIError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| AIError::malformed(format!("Failed to parse response: {}", e)))?;

    let choice = parsed
        .choices
        .and_then(|choices| choices.into_iter().next())
        .ok_or_else(|| AIError::malformed("No choices in response"))?;

    let content = choice
        .message
        .and_then(|m| m.content)
        .ok_or_else(|| AIError::malformed("First choice has no message content"))?;

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    };

    let usage = parsed
        .usage
        .map(|u| TokenUsage::new(token_count(u.prompt_tokens), token_count(u.completion_tokens)))
        .unwrap_or_default();

    Ok(CompletionResponse {
        content,
        usage,
        model: parsed.model.unwrap_or_else(|| fallback_model.to_string()),
        finish_reason,
    })
}

#[async_trait]
impl AIProvider for OpenAICompatProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let wire_request = self.to_wire_request(&request);

        tracing::debug!(
            provider = %self.config.provider_name,
            model = %self.config.model,
            messages = wire_request.messages.len(),
            trace_id = %request.metadata.trace_id,
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AIError::network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(AIError::upstream(status.as_u16(), body));
        }

        let completion = parse_completion(&body, &self.config.model)?;

        tracing::debug!(
            model = %completion.model,
            total_tokens = completion.usage.total_tokens,
            trace_id = %request.metadata.trace_id,
            "Completion received"
        );

        Ok(completion)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new(&self.config.provider_name, &self.config.model)
    }
}

/// Clamps an upstream token count into `u32`; unreadable counts are zero.
fn token_count(count: Option<u64>) -> u32 {
    count.map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Deserializes an informational field, treating a value of the wrong shape as absent.
///
/// Only `choices[0].message.content` is required; `usage`, `model` and
/// `finish_reason` must never fail an otherwise valid reply.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// ----- Wire Types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default, deserialize_with = "lenient")]
    model: Option<String>,
    choices: Option<Vec<ChatChoice>>,
    #[serde(default, deserialize_with = "lenient")]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
    #[serde(default, deserialize_with = "lenient")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default, deserialize_with = "lenient")]
    prompt_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    completion_tokens: Option<u64>,
}

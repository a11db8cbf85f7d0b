//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Completion provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which provider family to talk to
    #[serde(default)]
    pub provider: AiProvider,

    /// API key; falls back to the provider's conventional variable
    /// (`PERPLEXITY_API_KEY`, `TOGETHER_API_KEY`) when unset
    pub api_key: Option<String>,

    /// Override for the provider base URL
    pub base_url: Option<String>,

    /// Override for the model identifier
    pub model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Supported chat-completion providers
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Perplexity,
    Together,
    /// Any OpenAI-compatible endpoint; `base_url` and `model` are required
    Custom,
}

impl AiProvider {
    /// Provider name used in logs and provider info
    pub fn name(&self) -> &'static str {
        match self {
            Self::Perplexity => "perplexity",
            Self::Together => "together",
            Self::Custom => "custom",
        }
    }

    /// Conventional environment variable holding this provider's key
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::Perplexity => Some("PERPLEXITY_API_KEY"),
            Self::Together => Some("TOGETHER_API_KEY"),
            Self::Custom => None,
        }
    }

    fn default_base_url(&self) -> Option<&'static str> {
        match self {
            Self::Perplexity => Some("https://api.perplexity.ai"),
            Self::Together => Some("https://api.together.xyz/v1"),
            Self::Custom => None,
        }
    }

    fn default_model(&self) -> Option<&'static str> {
        match self {
            Self::Perplexity => Some("sonar-medium-online"),
            Self::Together => Some("mistralai/Mixtral-8x7B-Instruct-v0.1"),
            Self::Custom => None,
        }
    }
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Base URL, explicit override first
    pub fn effective_base_url(&self) -> Option<String> {
        self.base_url
            .clone()
            .or_else(|| self.provider.default_base_url().map(str::to_string))
            .map(|url| url.trim_end_matches('/').to_string())
    }

    /// Model identifier, explicit override first
    pub fn effective_model(&self) -> Option<String> {
        self.model
            .clone()
            .or_else(|| self.provider.default_model().map(str::to_string))
    }

    /// Fill `api_key` from the provider's conventional variable if unset
    pub fn apply_key_fallback(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.has_api_key() {
            return;
        }
        if let Some(var) = self.provider.api_key_env() {
            self.api_key = lookup(var).filter(|k| !k.is_empty());
        }
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }
        if self.effective_base_url().is_none() {
            return Err(ValidationError::MissingRequired("AI__BASE_URL"));
        }
        if self.effective_model().is_none() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            api_key: None,
            base_url: None,
            model: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    60
}

//! AI provider adapters.
//!
//! - `OpenAICompatProvider` - Perplexity, Together AI and other `/chat/completions` hosts
//! - `MockAIProvider` - queued responses for tests

mod mock_provider;
mod openai_compat_provider;

pub use mock_provider::{MockAIProvider, MockResponse};
pub use openai_compat_provider::{OpenAICompatConfig, OpenAICompatProvider};

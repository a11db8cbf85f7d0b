//! Ports - Interfaces between the application and infrastructure.
//!
//! - `AIProvider` - completion provider used to generate replies
//! - `DebriefSessionStore` - keyed storage for debrief sessions

mod ai_provider;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use session_store::{DebriefSessionStore, SessionHandle, SessionStoreError};

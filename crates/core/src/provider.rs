//! ChatProvider trait — the transport abstraction over LLM backends.
//!
//! A ChatProvider knows how to send one system/user prompt pair to a
//! chat-completion endpoint and return the raw answer text. Prompt
//! construction and section parsing live above this seam, so the same logic
//! serves every backend without duplication.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A single chat-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The system instruction establishing the assistant's role.
    pub system_prompt: String,

    /// The user message (query + context + detail instruction).
    pub user_message: String,

    /// Maximum tokens to generate, resolved from the detail level.
    pub max_tokens: u32,

    /// Sampling temperature. Kept low — factual answers over creative ones.
    pub temperature: f32,
}

/// The transport seam between the answer pipeline and an LLM backend.
///
/// Implementations make exactly one network call per `complete` invocation
/// and classify failures as [`ProviderError`]s. No retries at this layer —
/// retry policy belongs to the caller.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// A human-readable name for this backend (e.g., "openai", "deepseek").
    fn name(&self) -> &str;

    /// Send the request and return the raw answer text.
    async fn complete(&self, request: ChatRequest)
    -> std::result::Result<String, ProviderError>;
}

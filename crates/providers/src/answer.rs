//! The answer pipeline: prompt → transport → parser.
//!
//! One `AnswerProvider` serves every backend; the transport strategy is
//! injected, so provider-specific request shaping never leaks into the
//! prompt-building or parsing logic.

use std::sync::Arc;
use tracing::debug;

use civiclens_core::{ChatProvider, DetailLevel, PromptContext, StructuredAnswer, error::ProviderError};

use crate::parser::SectionParser;
use crate::prompt::PromptBuilder;

/// Generates structured answers for civic queries.
pub struct AnswerProvider {
    prompt_builder: PromptBuilder,
    transport: Arc<dyn ChatProvider>,
    temperature: f32,
}

impl AnswerProvider {
    /// Create a provider with an injected transport.
    pub fn new(prompt_builder: PromptBuilder, transport: Arc<dyn ChatProvider>, temperature: f32) -> Self {
        Self {
            prompt_builder,
            transport,
            temperature,
        }
    }

    /// Build the provider from config with the OpenAI-compatible transport.
    pub fn from_config(config: &civiclens_config::AppConfig) -> Self {
        Self::new(
            PromptBuilder::new(
                config.simplified_response_tokens,
                config.detailed_response_tokens,
            ),
            Arc::new(crate::openai_compat::OpenAiCompatChat::from_config(config)),
            config.temperature,
        )
    }

    /// Generate a structured answer for one query.
    ///
    /// Exactly one provider call; a failure is returned as a classified
    /// [`ProviderError`], never retried here.
    pub async fn generate(
        &self,
        query_text: &str,
        detail_level: DetailLevel,
        context: &PromptContext,
    ) -> std::result::Result<StructuredAnswer, ProviderError> {
        let prompt = self.prompt_builder.build(query_text, detail_level, context);

        debug!(
            provider = %self.transport.name(),
            detail_level = %detail_level,
            max_tokens = prompt.max_tokens,
            "Generating answer"
        );

        let raw = self
            .transport
            .complete(prompt.into_request(self.temperature))
            .await?;

        Ok(SectionParser::parse(&raw))
    }
}

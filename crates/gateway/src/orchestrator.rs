//! Query orchestration: cache lookup, context resolution, provider call,
//! cache write-back.
//!
//! The orchestrator owns its collaborators (cache, answer provider) as
//! injected instances — no global singletons — so tests can swap in stub
//! transports without touching process state.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use civiclens_cache::ResponseCache;
use civiclens_core::{PromptContext, Query, StructuredAnswer, error::ProviderError};
use civiclens_providers::AnswerProvider;

/// A failure while handling a query, split by responsibility.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The LLM provider failed; surfaced to the caller, never cached.
    #[error("{0}")]
    Upstream(#[from] ProviderError),

    /// A fault inside orchestration, not attributable to the provider.
    #[error("{0}")]
    Internal(String),
}

/// Resolve prompt context from the topic category.
///
/// A fixed small mapping standing in for a real knowledge lookup. Unknown
/// categories (and none at all) resolve to an empty context.
pub fn resolve_topic_context(topic_category: Option<&str>) -> PromptContext {
    match topic_category {
        Some("constitution") => PromptContext {
            constitution_sections: Some("Sample constitution sections".into()),
            policy_data: None,
        },
        Some("policy") => PromptContext {
            constitution_sections: None,
            policy_data: Some("Sample policy data".into()),
        },
        _ => PromptContext::default(),
    }
}

/// Top-level sequencing for the query pipeline.
pub struct QueryOrchestrator {
    cache: Arc<ResponseCache>,
    provider: AnswerProvider,
    cache_ttl: Duration,
}

impl QueryOrchestrator {
    /// Create an orchestrator with injected collaborators.
    pub fn new(cache: Arc<ResponseCache>, provider: AnswerProvider, cache_ttl: Duration) -> Self {
        Self {
            cache,
            provider,
            cache_ttl,
        }
    }

    /// Handle one query end to end.
    ///
    /// Cache hit → cached answer, no provider call. Cache miss → resolve
    /// context, call the provider once, store the answer on success. Provider
    /// failures surface as [`QueryError::Upstream`] and are never cached.
    ///
    /// Concurrent identical misses are not coalesced: each performs its own
    /// provider call until one write populates the cache. Last-writer-wins is
    /// fine — answers for an identical key are interchangeable.
    pub async fn handle(&self, query: &Query) -> Result<StructuredAnswer, QueryError> {
        let key = ResponseCache::key_for(&query.text, query.detail_level);

        if let Some(cached) = self.cache.lookup(&key).await {
            info!(detail_level = %query.detail_level, "Cache hit");
            return Ok(cached);
        }

        debug!(detail_level = %query.detail_level, "Cache miss, querying provider");
        let context = resolve_topic_context(query.topic_category.as_deref());
        let answer = self
            .provider
            .generate(&query.text, query.detail_level, &context)
            .await?;

        self.cache
            .store(&key, answer.clone(), self.cache_ttl)
            .await;

        Ok(answer)
    }
}

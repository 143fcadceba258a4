//! OpenAI-compatible chat transport.
//!
//! Works with any backend exposing a `/chat/completions`-style endpoint:
//! OpenAI, DeepSeek, OpenRouter, Ollama, vLLM. One network call per request,
//! bounded by a fixed timeout, with failures classified for the caller.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use civiclens_core::{ChatProvider, ChatRequest, error::ProviderError};

/// A chat transport speaking the OpenAI wire format.
pub struct OpenAiCompatChat {
    name: String,
    api_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiCompatChat {
    /// Create a new transport.
    ///
    /// `api_url` is the full chat-completions endpoint URL.
    pub fn new(
        name: impl Into<String>,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: name.into(),
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        }
    }

    /// Build a transport from the application config.
    pub fn from_config(config: &civiclens_config::AppConfig) -> Self {
        Self::new(
            "openai-compat",
            config.api_url.clone(),
            config.api_key.clone().unwrap_or_default(),
            config.model.clone(),
            std::time::Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Assemble the JSON request body for one completion.
    fn request_body(&self, request: &ChatRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_message },
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiCompatChat {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: ChatRequest,
    ) -> std::result::Result<String, ProviderError> {
        let body = self.request_body(&request);

        debug!(
            provider = %self.name,
            model = %self.model,
            max_tokens = request.max_tokens,
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                body: error_body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Unexpected(format!("Failed to parse response: {e}")))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Unexpected("No choices in response".into()))?;

        Ok(content)
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}

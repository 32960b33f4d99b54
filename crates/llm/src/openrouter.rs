//! [`OpenRouterProvider`]: a [`CompletionProvider`] over OpenRouter's
//! OpenAI-compatible chat-completions API.
//!
//! Any endpoint speaking the same protocol works; point
//! [`OpenRouterConfig::base_url`] at it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use tutor::{
    Completion, CompletionError, CompletionProvider, CompletionRequest, ModelId, TokenCount,
    TokenUsage,
};

use crate::wire::{ChatCompletionBody, ChatCompletionResponse, ErrorEnvelope};

/// Public OpenRouter endpoint.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

/// Value sent in OpenRouter's `X-Title` attribution header.
const APP_TITLE: &str = "Study Gateway";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Bearer token for the upstream API. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` if the key is blank.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.trim().is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Connection settings for [`OpenRouterProvider`].
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// Sent as a bearer token.
    pub api_key: ApiKey,
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    /// Model requested on every call.
    pub model: ModelId,
    /// Whole-request timeout. `None` waits for as long as the upstream takes.
    pub timeout: Option<Duration>,
}

impl OpenRouterConfig {
    /// Settings for the public endpoint with no timeout.
    pub fn new(api_key: ApiKey, model: ModelId) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
            timeout: None,
        }
    }
}

/// The provider could not be constructed.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The key cannot be sent as an `Authorization` header value.
    #[error("API key contains characters that are not valid in an HTTP header")]
    InvalidApiKey,

    /// `reqwest` rejected the client configuration.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// Chat-completion client. Cheap to share: one instance serves every request.
#[derive(Debug, Clone)]
pub struct OpenRouterProvider {
    client: Client,
    endpoint: String,
    model: ModelId,
}

impl OpenRouterProvider {
    /// Builds the pooled HTTP client with the auth and attribution headers preset.
    pub fn new(config: OpenRouterConfig) -> Result<Self, ProviderBuildError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key.expose()))
            .map_err(|_| ProviderBuildError::InvalidApiKey)?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("X-Title", HeaderValue::from_static(APP_TITLE));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model,
        })
    }

    /// Model requested on every call.
    pub fn model(&self) -> &ModelId {
        &self.model
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    #[instrument(name = "llm.complete", skip_all, fields(model = %self.model, messages = request.messages.len()))]
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
        let body = ChatCompletionBody {
            model: self.model.as_str(),
            messages: &request.messages,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| CompletionError::Transport {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Upstream rejected completion request");
            return Err(status_error(status, &text));
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| CompletionError::Decode {
                message: e.to_string(),
            })?;

        if let Some(error) = parsed.error {
            warn!("Upstream reported an error in a successful response");
            return Err(CompletionError::Status {
                status: error.status().unwrap_or(status.as_u16()),
                body: error.message,
            });
        }

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(CompletionError::EmptyResponse)?;

        let usage = parsed.usage.map(|u| TokenUsage {
            prompt: TokenCount::new(u.prompt_tokens),
            completion: TokenCount::new(u.completion_tokens),
        });
        let model = parsed.model.and_then(ModelId::new);

        match usage {
            Some(usage) => info!(
                served_by = model.as_ref().map(|m| m.as_str()),
                prompt_tokens = usage.prompt.as_u64(),
                completion_tokens = usage.completion.as_u64(),
                "Completion succeeded"
            ),
            None => debug!("Completion succeeded without usage data"),
        }

        Ok(Completion { text, model, usage })
    }
}

/// Prefers the upstream's own error message over the raw body.
fn status_error(status: StatusCode, body: &str) -> CompletionError {
    let body = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    CompletionError::Status {
        status: status.as_u16(),
        body,
    }
}

//! The chat-completion port.
//!
//! [`CompletionProvider`] is the only outbound dependency of the domain. The
//! `llm` crate implements it for an OpenAI-compatible HTTP API; tests implement
//! it with scripted replies.

use async_trait::async_trait;
use serde::Serialize;

use crate::{CompletionError, ModelId, TokenUsage};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instruction turn that sets the assistant's persona and output format.
    System,
    /// The end user's turn.
    User,
}

/// A single role-tagged message sent to the upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Who the turn belongs to.
    pub role: Role,
    /// Message text, sent upstream unmodified.
    pub content: String,
}

impl ChatMessage {
    /// A [`Role::System`] message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A [`Role::User`] message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The messages for one completion call.
///
/// Model selection is a property of the provider, not of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Messages in the order they are sent.
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// Builds the system-then-user pair every gateway operation sends.
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        }
    }
}

/// A successful completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Text of the first choice, passed through unmodified.
    pub text: String,
    /// Model that actually served the request, when the upstream reports it.
    pub model: Option<ModelId>,
    /// Token accounting, when the upstream reports it.
    pub usage: Option<TokenUsage>,
}

impl Completion {
    /// A completion carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
            usage: None,
        }
    }
}

/// Sends a prompt to a chat-completion service and returns its reply.
///
/// Implementations are shared across concurrent requests behind an `Arc`, so
/// they must be `Send + Sync` and must not hold per-request state.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Performs exactly one upstream call. No retries.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let request = CompletionRequest::new("persona", "question");

        let json = serde_json::to_value(&request.messages).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {"role": "system", "content": "persona"},
                {"role": "user", "content": "question"},
            ])
        );
    }
}

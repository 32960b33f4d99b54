//! Study gateway LLM provider infrastructure adapter.
//!
//! Implements the [`tutor::CompletionProvider`] trait for OpenRouter's
//! OpenAI-compatible chat-completions API. Additional providers are added as
//! new types in this crate without any changes to the `tutor` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, bearer authentication, request
//! formatting and response parsing live here. The [`tutor`] crate sees only
//! [`tutor::CompletionProvider`].
//!
//! There is no retry or back-off: every [`tutor::CompletionProvider::complete`]
//! call maps to exactly one HTTP request.

mod openrouter;
mod wire;

pub use openrouter::{
    ApiKey, OpenRouterConfig, OpenRouterProvider, ProviderBuildError, DEFAULT_BASE_URL,
    DEFAULT_MODEL,
};

//! Error types for the study gateway domain.
//!
//! [`CompletionError`] is what a [`crate::CompletionProvider`] returns when the
//! upstream call fails. [`TutorError`] is what the [`crate::TutorService`]
//! operations return: either the request was unusable, or the upstream failed.
//!
//! Failed upstream calls are reported to the caller once; nothing here
//! classifies them for retry.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Port-level errors
// ---------------------------------------------------------------------------

/// Failure of a single chat-completion call.
///
/// Produced by infrastructure adapters; the domain never inspects the variant
/// beyond its message, which is surfaced to the HTTP caller verbatim.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The request never produced an HTTP response (DNS, TLS, connect, timeout).
    #[error("Upstream request failed: {message}")]
    Transport {
        /// Description from the transport layer.
        message: String,
    },

    /// The upstream answered with a non-success status code.
    #[error("Upstream returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error text extracted from the response body (or the raw body).
        body: String,
    },

    /// The upstream body could not be decoded as a chat-completion response.
    #[error("Upstream response could not be decoded: {message}")]
    Decode {
        /// Description of the decoding problem.
        message: String,
    },

    /// The upstream response contained no choice with message content.
    #[error("Upstream returned no completion content")]
    EmptyResponse,
}

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// Errors returned by [`crate::TutorService`] operations.
#[derive(Debug, Error)]
pub enum TutorError {
    /// A required request field was absent or empty.
    ///
    /// The message is shown to the client unchanged, e.g. `"No text provided."`.
    #[error("{message}")]
    Validation {
        /// Client-facing description.
        message: String,
    },

    /// The chat-completion call failed.
    #[error(transparent)]
    Upstream(#[from] CompletionError),
}

impl TutorError {
    /// Shorthand for a [`TutorError::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

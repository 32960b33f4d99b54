//! Core domain for the study gateway.
//!
//! This crate holds the three gateway operations (explain, generate a quiz,
//! evaluate a quiz), the prompt templates they render, and the
//! [`CompletionProvider`] port they call. Infrastructure crates implement the
//! port; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is sent upstream; infrastructure crates define *how*.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | Value types (`ModelId`, `QuestionCount`, `Seconds`, `TokenUsage`) |
//! | [`errors`] | `CompletionError` and `TutorError` |
//! | [`completion`] | The `CompletionProvider` port and its message types |
//! | [`prompts`] | Prompt templates |
//! | [`service`] | `TutorService` and the operation inputs/outputs |

pub mod completion;
pub mod errors;
pub mod prompts;
pub mod service;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use completion::{ChatMessage, Completion, CompletionProvider, CompletionRequest, Role};
pub use errors::{CompletionError, TutorError};
pub use service::{EvaluationRequest, GeneratedQuiz, QuizRequest, TutorService};
pub use types::{ModelId, QuestionCount, Seconds, TokenCount, TokenUsage};

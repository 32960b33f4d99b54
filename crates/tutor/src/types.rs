//! Shared value types for the study gateway domain.
//!
//! These wrap the handful of primitives that flow through a request: the
//! upstream model identifier, quiz sizing and timing values, and the token
//! usage the upstream reports back. None of them carry state beyond a single
//! request.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Model identity
// ---------------------------------------------------------------------------

/// Identifier of the upstream chat-completion model (e.g. `"openai/gpt-3.5-turbo"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId(String);

impl ModelId {
    /// Creates a new model identifier, returning `None` if the value is blank.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.trim().is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Quiz sizing and timing
// ---------------------------------------------------------------------------

/// Number of questions requested from the quiz generator.
///
/// No bounds are enforced; the value is only interpolated into the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionCount(u32);

impl QuestionCount {
    /// Count used when the caller does not specify one.
    pub const DEFAULT: Self = Self(5);

    /// Creates a [`QuestionCount`] from a raw integer.
    pub fn new(count: u32) -> Self {
        Self(count)
    }

    /// Returns the underlying integer value.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------

/// A duration in whole seconds, as supplied by the client.
///
/// Used for the per-question time allowance and the total time a student
/// spent on a quiz. Serialises as a bare integer so it can be echoed back
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seconds(u64);

impl Seconds {
    /// Default allowance per quiz question.
    pub const PER_QUESTION_DEFAULT: Self = Self(60);

    /// Default total time assumed for an evaluated quiz.
    pub const TOTAL_DEFAULT: Self = Self(300);

    /// Creates a [`Seconds`] value from a raw integer.
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Seconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} sec", self.0)
    }
}

// ---------------------------------------------------------------------------
// Token accounting
// ---------------------------------------------------------------------------

/// Number of tokens consumed by an upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenCount(u64);

impl TokenCount {
    /// Creates a [`TokenCount`] from a raw integer.
    pub fn new(count: u64) -> Self {
        Self(count)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TokenCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add for TokenCount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

/// Prompt/completion token split reported by the upstream for one call.
///
/// Purely informational: it is logged, never enforced against a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the messages sent upstream.
    pub prompt: TokenCount,
    /// Tokens in the generated reply.
    pub completion: TokenCount,
}

impl TokenUsage {
    /// Total tokens billed for the call.
    pub fn total(self) -> TokenCount {
        self.prompt + self.completion
    }
}

//! LLM presentation boundary
//!
//! The deterministic engine computes the numbers; this crate asks a hosted
//! model to phrase them. Features:
//! - Multiple backend support (Groq, OpenAI, Gemini) behind one trait
//! - Bounded retry with exponential backoff for transient failures
//! - Prompt construction that marks the computed facts as authoritative
//!
//! The engine's math is never retried through this path; only the network
//! call is transient.

pub mod backend;
pub mod factory;
pub mod gemini;
pub mod prompt;

pub use backend::{FinishReason, GenerationResult, LlmBackend, LlmConfig, OpenAiBackend};
pub use factory::{LlmFactory, LlmProvider, LlmProviderConfig};
pub use gemini::{GeminiBackend, GeminiConfig};
pub use prompt::{Message, PromptBuilder, Role};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("timeout")]
    Timeout,

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl LlmError {
    /// Only transient failures are worth another attempt; API rejections
    /// and malformed responses will fail identically on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LlmError::Network(_) | LlmError::Timeout)
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<LlmError> for mortgage_agent_core::Error {
    fn from(err: LlmError) -> Self {
        mortgage_agent_core::Error::Llm(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(LlmError::Network("connection reset".into()).is_retryable());
        assert!(LlmError::Timeout.is_retryable());
        assert!(!LlmError::Api("401 unauthorized".into()).is_retryable());
        assert!(!LlmError::InvalidResponse("no choices".into()).is_retryable());
    }
}

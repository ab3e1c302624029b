//! Error types shared across the mortgage agent crates

use thiserror::Error;

/// Result alias used throughout the workspace
pub type Result<T> = std::result::Result<T, Error>;

/// Workspace-wide error taxonomy
#[derive(Error, Debug)]
pub enum Error {
    /// A calculation precondition was violated. Deterministic: the same
    /// input always fails the same way, so this is never retried.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The external text-generation collaborator failed. The deterministic
    /// core is unaffected; callers fall back to templated output.
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for a named precondition violation
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_precondition() {
        let err = Error::invalid_input("property_price must be > 0");
        assert_eq!(
            err.to_string(),
            "invalid input: property_price must be > 0"
        );
    }
}

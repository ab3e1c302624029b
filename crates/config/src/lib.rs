//! Configuration for the mortgage agent
//!
//! Three layers:
//! - `constants` — the single source of truth for business numbers
//! - `policy` / `extraction` — typed, overridable policy structs with
//!   defaults drawn from the constants (extraction tables are YAML-loadable)
//! - `settings` — process settings from files and environment variables
//!   (`MORTGAGE_AGENT_` prefix)

pub mod constants;
pub mod extraction;
pub mod policy;
pub mod settings;

pub use extraction::{AmountPick, ExtractionConfig, FieldRule};
pub use policy::{DecisionThresholds, LendingPolicy};
pub use settings::{load_settings, AdvisorSettings, LlmSettings, Settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

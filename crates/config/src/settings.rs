//! Process settings
//!
//! Layered loading: an optional `config/advisor.{yaml,toml,json}` file,
//! overridden by `MORTGAGE_AGENT_`-prefixed environment variables
//! (e.g. `MORTGAGE_AGENT_LLM__PROVIDER=gemini`).

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// LLM provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Provider name: "groq", "openai", or "gemini"
    pub provider: String,
    /// Model override; each provider has its own default
    pub model: Option<String>,
    /// API key; falls back to the provider's conventional env var
    pub api_key: Option<String>,
    /// Endpoint override
    pub endpoint: Option<String>,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: None,
            api_key: None,
            endpoint: None,
            max_tokens: 512,
            temperature: 0.7,
        }
    }
}

/// Advisor session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorSettings {
    /// Turns of history included in prompt context
    pub context_turns: usize,
    /// Persona name the presenter speaks as
    pub persona_name: String,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            context_turns: 10,
            persona_name: "Zara".to_string(),
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub llm: LlmSettings,
    pub advisor: AdvisorSettings,
}

/// Load settings from `config/advisor.*` (optional) and the environment
pub fn load_settings() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/advisor").required(false))
        .add_source(
            config::Environment::with_prefix("MORTGAGE_AGENT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize::<Settings>()?;

    tracing::debug!(provider = %settings.llm.provider, "settings loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.llm.provider, "groq");
        assert_eq!(settings.advisor.context_turns, 10);
        assert_eq!(settings.advisor.persona_name, "Zara");
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let yaml = r#"
llm:
  provider: gemini
  temperature: 0.2
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.llm.provider, "gemini");
        assert_eq!(settings.llm.temperature, 0.2);
        assert_eq!(settings.llm.max_tokens, 512);
        assert_eq!(settings.advisor.persona_name, "Zara");
    }
}

//! Provider abstraction layer
//!
//! Creates LLM backends from a unified configuration. The advisor only
//! ever sees `Arc<dyn LlmBackend>`; which hosted API answers is a
//! deployment decision.

use std::sync::Arc;

use mortgage_agent_config::LlmSettings;

use crate::backend::{LlmBackend, LlmConfig, OpenAiBackend};
use crate::gemini::{GeminiBackend, GeminiConfig};
use crate::LlmError;

/// LLM provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    /// Groq-hosted open models (OpenAI-compatible API)
    #[default]
    Groq,
    /// OpenAI
    OpenAi,
    /// Google Gemini
    Gemini,
}

impl LlmProvider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "groq" => Some(LlmProvider::Groq),
            "openai" | "gpt" => Some(LlmProvider::OpenAi),
            "gemini" | "google" => Some(LlmProvider::Gemini),
            _ => None,
        }
    }

    /// The provider's conventional API-key environment variable
    pub fn api_key_env(&self) -> &'static str {
        match self {
            LlmProvider::Groq => "GROQ_API_KEY",
            LlmProvider::OpenAi => "OPENAI_API_KEY",
            LlmProvider::Gemini => "GEMINI_API_KEY",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Groq => "llama-3.3-70b-versatile",
            LlmProvider::OpenAi => "gpt-4o-mini",
            LlmProvider::Gemini => "gemini-1.5-flash",
        }
    }
}

/// Unified provider configuration
#[derive(Debug, Clone)]
pub struct LlmProviderConfig {
    pub provider: LlmProvider,
    pub api_key: Option<String>,
    /// Endpoint override; each provider has its own default
    pub endpoint: Option<String>,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl Default for LlmProviderConfig {
    fn default() -> Self {
        Self::for_provider(LlmProvider::default())
    }
}

impl LlmProviderConfig {
    fn for_provider(provider: LlmProvider) -> Self {
        Self {
            provider,
            api_key: std::env::var(provider.api_key_env()).ok(),
            endpoint: None,
            model: provider.default_model().to_string(),
            max_tokens: 512,
            temperature: 0.7,
        }
    }

    /// Groq config with an explicit key
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::for_provider(LlmProvider::Groq)
        }
    }

    /// OpenAI config with an explicit key
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::for_provider(LlmProvider::OpenAi)
        }
    }

    /// Gemini config with an explicit key
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::for_provider(LlmProvider::Gemini)
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Build from process settings; the key falls back to the provider's
    /// conventional environment variable.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self, LlmError> {
        let provider = LlmProvider::from_str(&settings.provider).ok_or_else(|| {
            LlmError::Configuration(format!("unknown LLM provider: {}", settings.provider))
        })?;

        let mut config = Self::for_provider(provider);
        if let Some(ref model) = settings.model {
            config.model = model.clone();
        }
        if let Some(ref key) = settings.api_key {
            config.api_key = Some(key.clone());
        }
        config.endpoint = settings.endpoint.clone();
        config.max_tokens = settings.max_tokens;
        config.temperature = settings.temperature;
        Ok(config)
    }
}

/// Creates backends from provider configuration
pub struct LlmFactory;

impl LlmFactory {
    pub fn create(config: &LlmProviderConfig) -> Result<Arc<dyn LlmBackend>, LlmError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            LlmError::Configuration(format!(
                "no API key configured; set {}",
                config.provider.api_key_env()
            ))
        })?;

        tracing::debug!(provider = ?config.provider, model = %config.model, "creating LLM backend");

        match config.provider {
            LlmProvider::Groq | LlmProvider::OpenAi => {
                let mut llm_config = match config.provider {
                    LlmProvider::Groq => LlmConfig::groq(api_key),
                    _ => LlmConfig::openai(api_key, config.model.clone()),
                };
                llm_config.model = config.model.clone();
                llm_config.max_tokens = config.max_tokens;
                llm_config.temperature = config.temperature;
                if let Some(ref endpoint) = config.endpoint {
                    llm_config.endpoint = endpoint.clone();
                }
                Ok(Arc::new(OpenAiBackend::new(llm_config)?))
            }
            LlmProvider::Gemini => {
                let mut gemini_config = GeminiConfig::new(api_key).with_model(config.model.clone());
                gemini_config.max_tokens = config.max_tokens;
                gemini_config.temperature = config.temperature;
                if let Some(ref endpoint) = config.endpoint {
                    gemini_config.endpoint = endpoint.clone();
                }
                Ok(Arc::new(GeminiBackend::new(gemini_config)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!(LlmProvider::from_str("groq"), Some(LlmProvider::Groq));
        assert_eq!(LlmProvider::from_str("OpenAI"), Some(LlmProvider::OpenAi));
        assert_eq!(LlmProvider::from_str("google"), Some(LlmProvider::Gemini));
        assert_eq!(LlmProvider::from_str("mistral"), None);
    }

    #[test]
    fn test_create_without_key_fails() {
        let config = LlmProviderConfig {
            api_key: None,
            ..LlmProviderConfig::groq("unused")
        };

        let err = LlmFactory::create(&config).unwrap_err();
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_create_groq_backend() {
        let backend = LlmFactory::create(&LlmProviderConfig::groq("key")).unwrap();
        assert_eq!(backend.model_name(), "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_create_gemini_backend() {
        let backend =
            LlmFactory::create(&LlmProviderConfig::gemini("key").with_model("gemini-1.5-pro"))
                .unwrap();
        assert_eq!(backend.model_name(), "gemini-1.5-pro");
    }

    #[test]
    fn test_from_settings_unknown_provider() {
        let settings = LlmSettings {
            provider: "llamafile".to_string(),
            ..Default::default()
        };
        assert!(LlmProviderConfig::from_settings(&settings).is_err());
    }

    #[test]
    fn test_from_settings_overrides() {
        let settings = LlmSettings {
            provider: "gemini".to_string(),
            model: Some("gemini-2.0-flash".to_string()),
            api_key: Some("key".to_string()),
            max_tokens: 256,
            ..Default::default()
        };

        let config = LlmProviderConfig::from_settings(&settings).unwrap();
        assert_eq!(config.provider, LlmProvider::Gemini);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.max_tokens, 256);
    }
}

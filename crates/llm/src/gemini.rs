//! Google Gemini backend
//!
//! Gemini does not speak the chat-completions wire format: system text
//! travels as `systemInstruction`, turns as `contents` with `user`/`model`
//! roles, and candidates come back as part lists. Retry semantics are the
//! same bounded loop used by the OpenAI-compatible backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use mortgage_agent_config::constants::{endpoints, retry, timeouts};

use crate::backend::{generate_with_retry, FinishReason, GenerationResult, LlmBackend};
use crate::prompt::{Message, Role};
use crate::LlmError;

/// Gemini backend configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub timeout: Duration,
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-1.5-flash".to_string(),
            endpoint: endpoints::GEMINI_DEFAULT.to_string(),
            max_tokens: 512,
            temperature: 0.7,
            timeout: Duration::from_millis(timeouts::LLM_REQUEST_MS),
            max_retries: retry::MAX_ATTEMPTS,
            initial_backoff: Duration::from_millis(retry::INITIAL_BACKOFF_MS),
        }
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Gemini `generateContent` backend
#[derive(Debug)]
pub struct GeminiBackend {
    config: GeminiConfig,
    client: Client,
}

impl GeminiBackend {
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        if config.api_key.is_empty() {
            return Err(LlmError::Configuration(
                "API key required for Gemini".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model,
            self.config.api_key
        )
    }

    /// Split messages into a system instruction and user/model contents
    fn build_request(&self, messages: &[Message]) -> GeminiRequest {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for message in messages {
            match message.role {
                Role::System => system_parts.push(GeminiPart {
                    text: message.content.clone(),
                }),
                Role::User | Role::Assistant => contents.push(GeminiContent {
                    role: if message.role == Role::User {
                        "user".to_string()
                    } else {
                        "model".to_string()
                    },
                    parts: vec![GeminiPart {
                        text: message.content.clone(),
                    }],
                }),
            }
        }

        GeminiRequest {
            contents,
            system_instruction: if system_parts.is_empty() {
                None
            } else {
                Some(GeminiSystemInstruction {
                    parts: system_parts,
                })
            },
            generation_config: GeminiGenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
            },
        }
    }

    async fn execute_request(&self, request: &GeminiRequest) -> Result<GeminiResponse, LlmError> {
        let response = self
            .client
            .post(self.generate_url())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = response.text().await.unwrap_or_default();
            if status.is_server_error() {
                return Err(LlmError::Network(format!("server error {}: {}", status, error)));
            }
            return Err(LlmError::Api(format!("HTTP {}: {}", status, error)));
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn generate(&self, messages: &[Message]) -> Result<GenerationResult, LlmError> {
        let start = std::time::Instant::now();
        let request = self.build_request(messages);

        let request = &request;
        generate_with_retry(
            self.config.max_retries,
            self.config.initial_backoff,
            move || async move {
                let response = self.execute_request(request).await?;
                let candidate = response
                    .candidates
                    .first()
                    .ok_or_else(|| LlmError::InvalidResponse("no candidates in response".to_string()))?;

                let text: String = candidate
                    .content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect();
                if text.is_empty() {
                    return Err(LlmError::InvalidResponse("empty candidate text".to_string()));
                }

                Ok(GenerationResult {
                    text,
                    tokens: 0,
                    total_time_ms: start.elapsed().as_millis() as u64,
                    finish_reason: match candidate.finish_reason.as_deref() {
                        Some("MAX_TOKENS") => FinishReason::Length,
                        _ => FinishReason::Stop,
                    },
                })
            },
        )
        .await
    }

    async fn is_available(&self) -> bool {
        let url = format!(
            "{}/v1beta/models?key={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.api_key
        );
        self.client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// Gemini wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    max_output_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: GeminiCandidateContent,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_rejected() {
        let err = GeminiBackend::new(GeminiConfig::default()).unwrap_err();
        assert!(matches!(err, LlmError::Configuration(_)));
    }

    #[test]
    fn test_request_splits_system_instruction() {
        let backend = GeminiBackend::new(GeminiConfig::new("key")).unwrap();
        let messages = vec![
            Message::system("be brief"),
            Message::user("hello"),
            Message::assistant("hi"),
        ];

        let request = backend.build_request(&messages);

        assert_eq!(request.contents.len(), 2);
        assert_eq!(request.contents[0].role, "user");
        assert_eq!(request.contents[1].role, "model");
        assert_eq!(
            request.system_instruction.as_ref().unwrap().parts[0].text,
            "be brief"
        );
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Hello "}, {"text": "there"}], "role": "model"},
                "finishReason": "STOP"
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let text: String = response.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();

        assert_eq!(text, "Hello there");
    }
}

//! LLM backend trait and the OpenAI-compatible implementation
//!
//! The OpenAI chat-completions wire format is shared by OpenAI and Groq,
//! so one backend serves both; Gemini has its own wire format and lives in
//! its own module.
//!
//! Every backend wraps its single outbound HTTP call in a bounded retry
//! loop with exponential backoff. Only transient failures (network errors,
//! timeouts, 5xx) are retried; API rejections surface immediately.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use mortgage_agent_config::constants::{endpoints, retry, timeouts};

use crate::prompt::Message;
use crate::LlmError;

/// Backend configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model name/ID
    pub model: String,
    /// API endpoint base
    pub endpoint: String,
    /// API key
    pub api_key: String,
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Temperature
    pub temperature: f32,
    /// Top-p sampling
    pub top_p: f32,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum attempts for transient failures
    pub max_retries: u32,
    /// Initial backoff duration, doubled each retry
    pub initial_backoff: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".to_string(),
            endpoint: endpoints::GROQ_DEFAULT.to_string(),
            api_key: String::new(),
            max_tokens: 512,
            temperature: 0.7,
            top_p: 0.9,
            timeout: Duration::from_millis(timeouts::LLM_REQUEST_MS),
            max_retries: retry::MAX_ATTEMPTS,
            initial_backoff: Duration::from_millis(retry::INITIAL_BACKOFF_MS),
        }
    }
}

impl LlmConfig {
    /// Groq-hosted model (OpenAI-compatible API)
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// OpenAI-hosted model
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoints::OPENAI_DEFAULT.to_string(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Generation result
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Generated text
    pub text: String,
    /// Tokens generated (0 when the provider omits usage)
    pub tokens: usize,
    /// Total generation time (ms)
    pub total_time_ms: u64,
    /// Finish reason
    pub finish_reason: FinishReason,
}

/// Finish reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    Error,
}

/// LLM backend trait
#[async_trait]
pub trait LlmBackend: Send + Sync + std::fmt::Debug {
    /// Generate a response
    async fn generate(&self, messages: &[Message]) -> Result<GenerationResult, LlmError>;

    /// Check if the backend is reachable
    async fn is_available(&self) -> bool;

    /// Get model name
    fn model_name(&self) -> &str;

    /// Estimate tokens (~4 chars per token for English chat)
    fn estimate_tokens(&self, text: &str) -> usize {
        (text.chars().count() / 4).max(1)
    }
}

/// Run `attempt` up to `max_retries + 1` times with doubling backoff.
///
/// Shared by all backends so retry semantics stay identical across
/// providers.
pub(crate) async fn generate_with_retry<F, Fut>(
    max_retries: u32,
    initial_backoff: Duration,
    mut attempt_fn: F,
) -> Result<GenerationResult, LlmError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<GenerationResult, LlmError>>,
{
    let mut backoff = initial_backoff;
    let mut last_error = None;

    for attempt in 0..=max_retries {
        if attempt > 0 {
            tracing::warn!(
                "LLM request failed, retrying in {:?} (attempt {}/{})",
                backoff,
                attempt,
                max_retries
            );
            tokio::time::sleep(backoff).await;
            backoff *= 2;
        }

        match attempt_fn().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_retryable() => {
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or_else(|| LlmError::Network("max retries exceeded".to_string())))
}

/// OpenAI-compatible backend.
///
/// Works with OpenAI and Groq (and any other chat-completions-compatible
/// server reachable at `config.endpoint`).
#[derive(Debug)]
pub struct OpenAiBackend {
    config: LlmConfig,
    client: Client,
}

impl OpenAiBackend {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        if config.api_key.is_empty() {
            return Err(LlmError::Configuration(
                "API key required for remote endpoints".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn chat_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    async fn execute_request(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatResponse, LlmError> {
        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = response.text().await.unwrap_or_default();
            // 5xx errors are retryable, 4xx are not
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
impl LlmBackend for OpenAiBackend {
    async fn generate(&self, messages: &[Message]) -> Result<GenerationResult, LlmError> {
        let start = std::time::Instant::now();

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str().to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
            top_p: Some(self.config.top_p),
        };

        let request = &request;
        generate_with_retry(
            self.config.max_retries,
            self.config.initial_backoff,
            move || async move {
                let response = self.execute_request(request).await?;
                let choice = response
                    .choices
                    .first()
                    .ok_or_else(|| LlmError::InvalidResponse("no choices in response".to_string()))?;

                Ok(GenerationResult {
                    text: choice.message.content.clone(),
                    tokens: response
                        .usage
                        .as_ref()
                        .map(|u| u.completion_tokens)
                        .unwrap_or(0),
                    total_time_ms: start.elapsed().as_millis() as u64,
                    finish_reason: match choice.finish_reason.as_deref() {
                        Some("length") => FinishReason::Length,
                        _ => FinishReason::Stop,
                    },
                })
            },
        )
        .await
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/models", self.config.endpoint.trim_end_matches('/'));
        self.client
            .get(&url)
            .bearer_auth(&self.config.api_key)
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

// Chat-completions wire types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    completion_tokens: usize,
}

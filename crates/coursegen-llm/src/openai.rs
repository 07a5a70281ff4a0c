//! OpenAI Provider Implementation
//!
//! Talks to an OpenAI-compatible chat completions endpoint. Each prompt is
//! sent as a single user message, optionally preceded by a system message.
//!
//! # Features
//!
//! - Configurable endpoint, model, temperature and token budget
//! - Retry logic with exponential backoff for rate limits and server errors
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use coursegen_llm::OpenAiProvider;
//! use coursegen_domain::traits::LlmProvider;
//!
//! let provider = OpenAiProvider::new("sk-...", "gpt-4")
//!     .unwrap()
//!     .with_system_prompt("You are an expert in compliance training script generation.");
//! let text = provider.generate("Expand Module 1 on \"Ethics\"").unwrap();
//! ```

use crate::LlmError;
use coursegen_domain::traits::LlmProvider as LlmProviderTrait;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default OpenAI API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Default timeout for a single request (long-form output is slow)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts per prompt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Default completion budget
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// OpenAI chat completions provider
pub struct OpenAiProvider {
    endpoint: String,
    api_key: String,
    model: String,
    system_prompt: Option<String>,
    temperature: f32,
    max_tokens: u32,
    max_retries: u32,
    request_timeout: Duration,
    client: Client,
}

/// Request body for the chat completions API
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider against the public endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the API key is blank or the HTTP client cannot be built
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Authentication("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
            model: model.into(),
            system_prompt: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            max_retries: DEFAULT_MAX_RETRIES,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client,
        })
    }

    /// Point the provider at another OpenAI-compatible endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Send a system message ahead of every prompt
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the completion token budget
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Give up on a single request after `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Model this provider sends requests to
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        ChatRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    fn send_once(&self, body: &ChatRequest<'_>) -> Result<String, Attempt> {
        let url = format!("{}/chat/completions", self.endpoint);

        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .map_err(|e| {
                Attempt::Retry(LlmError::Communication(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if status.is_success() {
            let text = response
                .text()
                .map_err(|e| Attempt::Fatal(LlmError::InvalidResponse(e.to_string())))?;
            return parse_chat_response(&text).map_err(Attempt::Fatal);
        }

        let error_text = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(Attempt::Fatal(LlmError::Authentication(error_text)))
            }
            StatusCode::NOT_FOUND => {
                Err(Attempt::Fatal(LlmError::ModelNotAvailable(self.model.clone())))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(Attempt::Retry(LlmError::RateLimitExceeded)),
            s if s.is_server_error() => Err(Attempt::Retry(LlmError::Communication(format!(
                "HTTP {}: {}",
                s, error_text
            )))),
            s => Err(Attempt::Fatal(LlmError::InvalidResponse(format!(
                "HTTP {}: {}",
                s, error_text
            )))),
        }
    }
}

/// Outcome of a single failed attempt
enum Attempt {
    Retry(LlmError),
    Fatal(LlmError),
}

/// Pull the first choice's message text out of a chat completions body
fn parse_chat_response(body: &str) -> Result<String, LlmError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no message".to_string()))
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let body = self.request_body(prompt);

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.send_once(&body) {
                Ok(text) => {
                    debug!("OpenAI returned {} chars", text.len());
                    return Ok(text);
                }
                Err(Attempt::Fatal(e)) => return Err(e),
                Err(Attempt::Retry(e)) => {
                    warn!("OpenAI attempt {} failed: {}", attempts + 1, e);
                    last_error = Some(e);
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                std::thread::sleep(Duration::from_secs(2u64.pow(attempts - 1)));
            }
        }

        Err(last_error.unwrap_or_else(|| {
            LlmError::Communication("Max retries exceeded".to_string())
        }))
    }
}

//! Text-generation provider selection.

use crate::config::{ProviderKind, ProviderSettings};
use crate::error::{CliError, Result};
use coursegen_domain::traits::LlmProvider;
use coursegen_extractor::SYSTEM_PROMPT;
use coursegen_llm::{LlmError, OllamaProvider, OpenAiProvider};
use std::time::Duration;
use tracing::debug;

/// The configured text-generation service.
pub enum Provider {
    /// OpenAI-compatible chat completions
    OpenAi(OpenAiProvider),
    /// Local Ollama server
    Ollama(OllamaProvider),
}

impl Provider {
    /// Build the provider described by `settings`.
    ///
    /// An OpenAI provider needs an API key: `api_key` when given, otherwise
    /// the environment variable named by `settings.api_key_env`. Each HTTP
    /// request is cut off after `timeout`.
    pub fn from_settings(
        settings: &ProviderSettings,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        debug!("Using {:?} provider with model {}", settings.kind, settings.model);

        match settings.kind {
            ProviderKind::OpenAi => {
                let api_key = api_key
                    .or_else(|| std::env::var(&settings.api_key_env).ok())
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| {
                        CliError::Config(format!(
                            "No API key: pass --api-key or set {}",
                            settings.api_key_env
                        ))
                    })?;

                let mut provider = OpenAiProvider::new(api_key, &settings.model)?
                    .with_system_prompt(SYSTEM_PROMPT)
                    .with_temperature(settings.temperature)
                    .with_max_tokens(settings.max_tokens)
                    .with_timeout(timeout);
                if let Some(endpoint) = &settings.endpoint {
                    provider = provider.with_endpoint(endpoint);
                }
                Ok(Provider::OpenAi(provider))
            }
            ProviderKind::Ollama => {
                let provider = match &settings.endpoint {
                    Some(endpoint) => OllamaProvider::new(endpoint, &settings.model)?,
                    None => OllamaProvider::default_endpoint(&settings.model)?,
                };
                Ok(Provider::Ollama(
                    provider.with_system_prompt(SYSTEM_PROMPT).with_timeout(timeout),
                ))
            }
        }
    }

    /// Model this provider calls.
    pub fn model(&self) -> &str {
        match self {
            Provider::OpenAi(p) => p.model(),
            Provider::Ollama(p) => p.model(),
        }
    }
}

impl LlmProvider for Provider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> std::result::Result<String, Self::Error> {
        match self {
            Provider::OpenAi(p) => p.generate(prompt),
            Provider::Ollama(p) => p.generate(prompt),
        }
    }
}

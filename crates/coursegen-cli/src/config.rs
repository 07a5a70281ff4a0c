//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use coursegen_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Segmentation and generation settings
    #[serde(default)]
    pub generator: ExtractorConfig,

    /// Text-generation service settings
    #[serde(default)]
    pub provider: ProviderSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Which text-generation service to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions API
    OpenAi,
    /// Local Ollama server
    Ollama,
}

/// Text-generation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Service to call
    pub kind: ProviderKind,

    /// API base URL; the provider's default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model name
    pub model: String,

    /// Sampling temperature (OpenAI only)
    pub temperature: f32,

    /// Maximum tokens per module (OpenAI only)
    pub max_tokens: u32,

    /// Environment variable holding the API key
    pub api_key_env: String,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".coursegen").join("config.toml"))
    }

    /// Resolve the configuration path, preferring an explicit override.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from `path`, or defaults when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.generator.validate().map_err(CliError::Config)?;

        if self.provider.model.trim().is_empty() {
            return Err(CliError::Config("provider.model must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(CliError::Config(format!(
                "provider.temperature must be between 0.0 and 2.0, got {}",
                self.provider.temperature
            )));
        }
        if self.provider.max_tokens == 0 {
            return Err(CliError::Config("provider.max_tokens must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ProviderKind::OpenAi,
            endpoint: None,
            model: coursegen_llm::openai::DEFAULT_MODEL.to_string(),
            temperature: coursegen_llm::openai::DEFAULT_TEMPERATURE,
            max_tokens: coursegen_llm::openai::DEFAULT_MAX_TOKENS,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.generator.identifier, "Module");
        assert_eq!(config.provider.kind, ProviderKind::OpenAi);
        assert_eq!(config.provider.model, "gpt-4");
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
        assert!(config.settings.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [generator]
            identifier = "Section"

            [provider]
            kind = "ollama"
            model = "llama3"
            "#,
        )
        .unwrap();

        assert_eq!(config.generator.identifier, "Section");
        assert_eq!(config.generator.max_document_length, 1_000_000);
        assert_eq!(config.provider.kind, ProviderKind::Ollama);
        assert_eq!(config.provider.max_tokens, 2000);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_invalid_temperature() {
        let mut config = Config::default();
        config.provider.temperature = 3.5;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_resolve_path_override() {
        let path = Config::resolve_path(Some(Path::new("/tmp/custom.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }
}

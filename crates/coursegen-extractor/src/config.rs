//! Configuration for outline extraction and script generation

use crate::error::ExtractorError;
use coursegen_domain::identifier::DEFAULT_IDENTIFIER;
use coursegen_domain::Identifier;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration shared by segmentation and generation
///
/// Passed explicitly to every component that needs it; nothing reads
/// ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Marker word that introduces each module ("Module", "Section", ...)
    pub identifier: String,

    /// Documents longer than this (characters) are skipped
    pub max_document_length: usize,

    /// Maximum time for a single generation call (seconds)
    pub generation_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Replace the identifier
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Get the validated identifier
    pub fn identifier(&self) -> Result<Identifier, ExtractorError> {
        Identifier::new(&self.identifier).map_err(ExtractorError::InvalidIdentifier)
    }

    /// Get the generation timeout as a Duration
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        Identifier::new(&self.identifier)?;
        if self.max_document_length == 0 {
            return Err("max_document_length must be greater than 0".to_string());
        }
        if self.generation_timeout_secs == 0 {
            return Err("generation_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            identifier: DEFAULT_IDENTIFIER.to_string(),
            max_document_length: 1_000_000,
            generation_timeout_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.identifier().unwrap().as_str(), "Module");
    }

    #[test]
    fn test_blank_identifier_invalid() {
        let config = ExtractorConfig::default().with_identifier("  ");
        assert!(config.validate().is_err());
        assert!(matches!(
            config.identifier(),
            Err(ExtractorError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_invalid_max_document_length() {
        let mut config = ExtractorConfig::default();
        config.max_document_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = ExtractorConfig::default();
        config.generation_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default().with_identifier("Topic");
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(parsed.identifier, "Topic");
        assert_eq!(config.max_document_length, parsed.max_document_length);
        assert_eq!(config.generation_timeout_secs, parsed.generation_timeout_secs);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("identifier = \"Section\"").unwrap();
        assert_eq!(parsed.identifier, "Section");
        assert_eq!(parsed.generation_timeout_secs, 120);
    }
}

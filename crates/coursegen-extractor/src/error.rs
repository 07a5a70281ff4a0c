//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while loading outlines or generating scripts
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Generation call took too long
    #[error("Generation timed out after {0}s")]
    Timeout(u64),

    /// Marker pattern could not be compiled
    #[error("Invalid marker pattern: {0}")]
    Pattern(String),

    /// Identifier rejected by validation
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Course details rejected by validation
    #[error("Invalid course details: {0}")]
    InvalidCourse(String),

    /// Nothing to generate
    #[error("No modules detected")]
    NoModules,

    /// File type without a registered text extractor
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Text extraction failed for a document
    #[error("Could not extract text from {document}: {reason}")]
    Extraction {
        /// Document name
        document: String,
        /// Extractor message
        reason: String,
    },

    /// I/O error while reading a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

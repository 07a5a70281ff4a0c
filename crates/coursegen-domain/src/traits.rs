//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// Trait for text generation services
///
/// Implemented by the infrastructure layer (coursegen-llm)
pub trait LlmProvider {
    /// Error type for generation
    type Error;

    /// Generate text for a prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for turning an uploaded file into plain text
///
/// Implemented per container format by the application layer
/// (coursegen-extractor) or by callers that bring their own PDF/DOCX reader.
/// Lines in the returned text correspond to paragraphs or lines of the
/// source document.
pub trait TextExtractor {
    /// Extract best-effort plain text from raw file bytes
    fn extract_text(&self, bytes: &[u8]) -> Result<String, String>;
}

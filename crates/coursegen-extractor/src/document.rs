//! Uploaded documents and their text extraction

use crate::error::ExtractorError;
use coursegen_domain::traits::TextExtractor;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Container format of an uploaded outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Portable Document Format
    Pdf,
    /// Office Open XML word processing document
    Docx,
    /// UTF-8 text (including Markdown)
    PlainText,
}

impl DocumentFormat {
    /// Get the format name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::PlainText => "text",
        }
    }

    /// Detect the format from a file extension (case-insensitive)
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" | "text" | "md" => Some(DocumentFormat::PlainText),
            _ => None,
        }
    }

    /// Detect the format from a file name or path
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExtractorError> {
        let path = path.as_ref();
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| ExtractorError::UnsupportedFormat(path.display().to_string()))
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extractor for UTF-8 text files
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, String> {
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| format!("File is not valid UTF-8: {}", e))
    }
}

/// Extracted text of one uploaded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// File name as uploaded
    pub name: String,

    /// Extracted plain text, possibly empty
    pub text: String,
}

impl SourceDocument {
    /// Create a new source document
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Turns uploaded files into [`SourceDocument`]s
///
/// Holds one [`TextExtractor`] per format. Plain text is supported out of
/// the box; PDF and DOCX readers are registered with
/// [`DocumentLoader::with_extractor`].
pub struct DocumentLoader {
    extractors: HashMap<DocumentFormat, Box<dyn TextExtractor + Send + Sync>>,
}

impl DocumentLoader {
    /// Create a loader that understands plain text
    pub fn new() -> Self {
        Self::empty().with_extractor(DocumentFormat::PlainText, PlainTextExtractor)
    }

    /// Create a loader with no extractors at all
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Register (or replace) the extractor for `format`
    pub fn with_extractor(
        mut self,
        format: DocumentFormat,
        extractor: impl TextExtractor + Send + Sync + 'static,
    ) -> Self {
        self.extractors.insert(format, Box::new(extractor));
        self
    }

    /// Check whether `format` has an extractor
    pub fn supports(&self, format: DocumentFormat) -> bool {
        self.extractors.contains_key(&format)
    }

    /// Extract the text of an uploaded file, detecting the format from `name`
    pub fn load(&self, name: &str, bytes: &[u8]) -> Result<SourceDocument, ExtractorError> {
        let format = DocumentFormat::from_path(name)?;
        let extractor = self
            .extractors
            .get(&format)
            .ok_or_else(|| ExtractorError::UnsupportedFormat(format!("{} ({})", name, format)))?;

        let text = extractor
            .extract_text(bytes)
            .map_err(|reason| ExtractorError::Extraction {
                document: name.to_string(),
                reason,
            })?;

        debug!("Extracted {} chars from {} ({})", text.len(), name, format);
        Ok(SourceDocument::new(name, text))
    }

    /// Read a file from disk and extract its text
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<SourceDocument, ExtractorError> {
        let path = path.as_ref();
        // Fail on the format before touching the file system
        DocumentFormat::from_path(path)?;

        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.load(&name, &bytes)
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

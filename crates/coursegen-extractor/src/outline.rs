//! Assembly of a course outline from several uploaded documents

use crate::document::SourceDocument;
use crate::segmenter::Segmenter;
use coursegen_domain::ModuleRecord;
use std::fmt;
use tracing::{info, warn};

/// Why a document contributed no modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentIssue {
    /// Extracted text was empty or whitespace
    NoText {
        /// Document name
        document: String,
    },

    /// Extracted text exceeded the configured length
    TooLong {
        /// Document name
        document: String,
        /// Length in characters
        length: usize,
        /// Configured maximum
        max: usize,
    },

    /// No marker for the identifier was found
    NoModules {
        /// Document name
        document: String,
        /// Identifier that was searched for
        identifier: String,
    },
}

impl DocumentIssue {
    /// Name of the document the issue is about
    pub fn document(&self) -> &str {
        match self {
            DocumentIssue::NoText { document }
            | DocumentIssue::TooLong { document, .. }
            | DocumentIssue::NoModules { document, .. } => document,
        }
    }
}

impl fmt::Display for DocumentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentIssue::NoText { document } => {
                write!(f, "Could not extract text from {}", document)
            }
            DocumentIssue::TooLong { document, length, max } => {
                write!(f, "{} is too long: {} chars (max: {})", document, length, max)
            }
            DocumentIssue::NoModules { document, identifier } => {
                write!(f, "No modules detected in {} using '{}'", document, identifier)
            }
        }
    }
}

/// Modules found in one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentModules {
    /// Document name
    pub document: String,

    /// Records in match order, ordinals starting at 1
    pub modules: Vec<ModuleRecord>,
}

/// Modules of every uploaded document, in upload order
///
/// Ordinals restart at 1 for each document; nothing is renumbered when the
/// documents are flattened together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseOutline {
    documents: Vec<DocumentModules>,
    issues: Vec<DocumentIssue>,
}

impl CourseOutline {
    /// Segment every document in order
    pub fn build(
        segmenter: &Segmenter,
        documents: &[SourceDocument],
        max_document_length: usize,
    ) -> Self {
        let mut outline = Self::default();

        for doc in documents {
            if doc.text.trim().is_empty() {
                outline.record_issue(DocumentIssue::NoText {
                    document: doc.name.clone(),
                });
                continue;
            }

            let length = doc.text.chars().count();
            if length > max_document_length {
                outline.record_issue(DocumentIssue::TooLong {
                    document: doc.name.clone(),
                    length,
                    max: max_document_length,
                });
                continue;
            }

            let modules = segmenter.segment(&doc.text);
            if modules.is_empty() {
                outline.record_issue(DocumentIssue::NoModules {
                    document: doc.name.clone(),
                    identifier: segmenter.identifier().to_string(),
                });
                continue;
            }

            info!("Detected {} modules in {}", modules.len(), doc.name);
            outline.documents.push(DocumentModules {
                document: doc.name.clone(),
                modules,
            });
        }

        outline
    }

    fn record_issue(&mut self, issue: DocumentIssue) {
        warn!("{}", issue);
        self.issues.push(issue);
    }

    /// Documents that produced modules
    pub fn documents(&self) -> &[DocumentModules] {
        &self.documents
    }

    /// Documents that produced nothing, and why
    pub fn issues(&self) -> &[DocumentIssue] {
        &self.issues
    }

    /// All modules, flattened in document order
    pub fn modules(&self) -> impl Iterator<Item = &ModuleRecord> {
        self.documents.iter().flat_map(|d| d.modules.iter())
    }

    /// Total number of modules
    pub fn module_count(&self) -> usize {
        self.documents.iter().map(|d| d.modules.len()).sum()
    }

    /// True when no document yielded a module
    pub fn is_empty(&self) -> bool {
        self.module_count() == 0
    }

    /// Consume the outline into a flat module list
    pub fn into_modules(self) -> Vec<ModuleRecord> {
        self.documents.into_iter().flat_map(|d| d.modules).collect()
    }
}

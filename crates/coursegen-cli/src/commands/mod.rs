//! Command implementations.

pub mod config;
pub mod generate;
pub mod segment;

pub use self::config::execute_config;
pub use self::generate::execute_generate;
pub use self::segment::execute_segment;

use crate::error::Result;
use crate::output::Formatter;
use coursegen_extractor::{CourseOutline, DocumentLoader, ExtractorConfig, Segmenter};
use std::path::PathBuf;
use tracing::warn;

/// Outline built from files on disk, plus the files that could not be read.
#[derive(Debug)]
pub struct LoadedOutline {
    /// Modules of every readable document
    pub outline: CourseOutline,

    /// One message per file that could not be loaded
    pub load_errors: Vec<String>,
}

impl LoadedOutline {
    /// Print load errors and per-document issues to stderr.
    pub fn print_issues(&self, formatter: &Formatter) {
        for error in &self.load_errors {
            eprintln!("{}", formatter.error(error));
        }
        for issue in self.outline.issues() {
            eprintln!("{}", formatter.warning(&issue.to_string()));
        }
    }
}

/// Load `files` in order and segment them with the configured identifier.
///
/// A file that cannot be read is reported and skipped; the others are
/// still segmented.
pub fn build_outline(
    files: &[PathBuf],
    config: &ExtractorConfig,
    loader: &DocumentLoader,
) -> Result<LoadedOutline> {
    let segmenter = Segmenter::new(config.identifier()?)?;

    let mut documents = Vec::with_capacity(files.len());
    let mut load_errors = Vec::new();
    for path in files {
        match loader.load_path(path) {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                load_errors.push(format!("{}: {}", path.display(), e));
            }
        }
    }

    let outline = CourseOutline::build(&segmenter, &documents, config.max_document_length);
    Ok(LoadedOutline {
        outline,
        load_errors,
    })
}

/// Apply a command-line identifier over the configured one.
pub(crate) fn with_identifier(
    config: &ExtractorConfig,
    identifier: Option<String>,
) -> ExtractorConfig {
    match identifier {
        Some(identifier) => config.clone().with_identifier(identifier),
        None => config.clone(),
    }
}

/// Warning shown when no document produced a module.
pub(crate) fn no_modules_message(config: &ExtractorConfig) -> String {
    format!(
        "No modules detected. Check that the documents use '{} 1', '{} 2', ... markers.",
        config.identifier, config.identifier
    )
}

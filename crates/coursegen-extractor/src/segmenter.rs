//! Marker-based segmentation of course outlines
//!
//! A marker is the identifier followed by whitespace, a number and an
//! optional `:`, `.` or `-` ("Module 3:", "topic 2."). The text is cut at
//! every marker; whatever precedes the first marker is preamble and is
//! dropped. Each remaining piece becomes one [`ModuleRecord`]: its first
//! non-blank line is the title and the lines after it are the content, so
//! a heading may sit on the marker's line or on a line of its own.
//!
//! The numeral in the marker is never read. Ordinals follow match order, so
//! "Module 1", "Module 5", "Module 2" yields ordinals 1, 2, 3.

use crate::error::ExtractorError;
use coursegen_domain::{Identifier, ModuleRecord};
use regex::{Regex, RegexBuilder};

/// Splits outline text into modules at identifier markers
///
/// The marker pattern is compiled once in [`Segmenter::new`]; segmenting is
/// then a pure function of the input text. A `Segmenter` holds no mutable
/// state and can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Segmenter {
    identifier: Identifier,
    marker: Regex,
}

/// Build the marker pattern for an identifier
///
/// The identifier is escaped, so every character in it matches literally.
pub fn marker_pattern(identifier: &Identifier) -> String {
    format!(r"\b{}\s+\d+[:.\-]?", regex::escape(identifier.as_str()))
}

impl Segmenter {
    /// Compile the marker pattern for `identifier`
    pub fn new(identifier: Identifier) -> Result<Self, ExtractorError> {
        let marker = RegexBuilder::new(&marker_pattern(&identifier))
            .case_insensitive(true)
            .build()
            .map_err(|e| ExtractorError::Pattern(e.to_string()))?;

        Ok(Self { identifier, marker })
    }

    /// Identifier this segmenter matches
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Number of markers found in `text`
    pub fn marker_count(&self, text: &str) -> usize {
        self.marker.find_iter(text).count()
    }

    /// Split `text` into module records
    ///
    /// Returns one record per marker, in document order. Text without any
    /// marker (including the empty string) yields an empty vector.
    pub fn segment(&self, text: &str) -> Vec<ModuleRecord> {
        self.marker
            .split(text)
            .skip(1)
            .enumerate()
            .map(|(idx, piece)| self.record_from_piece(piece, idx + 1))
            .collect()
    }

    fn record_from_piece(&self, piece: &str, ordinal: usize) -> ModuleRecord {
        // Only an empty piece gets the placeholder; whitespace alone gives
        // an empty title.
        if piece.is_empty() {
            return ModuleRecord::new(self.identifier.untitled(ordinal), "", ordinal);
        }

        let mut lines = piece.lines().skip_while(|line| line.trim().is_empty());
        let title = lines.next().map(|first| first.trim().to_string()).unwrap_or_default();
        let content = lines.collect::<Vec<_>>().join("\n").trim().to_string();

        ModuleRecord::new(title, content, ordinal)
    }
}

/// Segment `text` with a one-off [`Segmenter`]
///
/// Prefer building a `Segmenter` once when several documents share the
/// same identifier.
pub fn segment(text: &str, identifier: &Identifier) -> Result<Vec<ModuleRecord>, ExtractorError> {
    Ok(Segmenter::new(identifier.clone())?.segment(text))
}

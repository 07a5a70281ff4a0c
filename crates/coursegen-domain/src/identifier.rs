//! Identifier module - the marker word that introduces each module

use std::fmt;

/// Identifier used when the caller does not supply one
pub const DEFAULT_IDENTIFIER: &str = "Module";

/// Longest identifier accepted, in characters
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Marker word that precedes a module number in an outline
///
/// The value is user data: it is matched case-insensitively and always as a
/// literal, never as a pattern. The casing typed by the user is preserved so
/// that synthesized titles read the way the user wrote them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Create a new identifier, trimming surrounding whitespace
    ///
    /// # Errors
    /// Returns error if the trimmed value is empty, spans several lines,
    /// or is longer than [`MAX_IDENTIFIER_LEN`] characters
    pub fn new(value: impl AsRef<str>) -> Result<Self, String> {
        let trimmed = value.as_ref().trim();

        if trimmed.is_empty() {
            return Err("Identifier cannot be empty".to_string());
        }
        if trimmed.contains(['\n', '\r']) {
            return Err("Identifier cannot contain line breaks".to_string());
        }
        let len = trimmed.chars().count();
        if len > MAX_IDENTIFIER_LEN {
            return Err(format!(
                "Identifier is {} characters long (max: {})",
                len, MAX_IDENTIFIER_LEN
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get identifier as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title given to a module whose body is completely empty
    pub fn untitled(&self, ordinal: usize) -> String {
        format!("{} {} (Untitled)", self.0, ordinal)
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self(DEFAULT_IDENTIFIER.to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Identifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

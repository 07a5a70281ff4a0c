//! Module records produced by segmenting a course outline

/// One module cut out of a course outline
///
/// Records are created once per segmentation pass and only live for the
/// duration of the generation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRecord {
    /// First line of the module body, or a synthesized placeholder
    pub title: String,

    /// Remaining lines of the module body, trimmed
    pub content: String,

    /// 1-based position among the modules of one document, in match order
    pub ordinal: usize,
}

impl ModuleRecord {
    /// Create a new module record
    pub fn new(title: impl Into<String>, content: impl Into<String>, ordinal: usize) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ordinal,
        }
    }

    /// Check whether the module carried any body text below its title
    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_record_creation() {
        let record = ModuleRecord::new("Ethics", "Body A", 1);
        assert_eq!(record.title, "Ethics");
        assert_eq!(record.content, "Body A");
        assert_eq!(record.ordinal, 1);
        assert!(record.has_content());
    }

    #[test]
    fn test_module_without_content() {
        let record = ModuleRecord::new("Privacy", "", 2);
        assert!(!record.has_content());
    }
}

//! LLM prompt engineering for module script generation

use coursegen_domain::{CourseDetails, Identifier, ModuleRecord};

/// System message for chat-style providers
pub const SYSTEM_PROMPT: &str = "You are an expert in compliance training script generation.";

/// Builds the prompt that expands one module into a training script
pub struct PromptBuilder<'a> {
    identifier: &'a Identifier,
    sequence: usize,
    module: &'a ModuleRecord,
    course: Option<&'a CourseDetails>,
    custom_prompt: Option<String>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    ///
    /// `sequence` is the module's position in the whole course, which is
    /// what the prompt calls it ("Module 4"), regardless of its ordinal
    /// inside its source document.
    pub fn new(identifier: &'a Identifier, sequence: usize, module: &'a ModuleRecord) -> Self {
        Self {
            identifier,
            sequence,
            module,
            course: None,
            custom_prompt: None,
        }
    }

    /// Add course details as context
    pub fn with_course(mut self, course: &'a CourseDetails) -> Self {
        self.course = Some(course);
        self
    }

    /// Replace the template with a user-written prompt
    ///
    /// A blank prompt is ignored.
    pub fn with_custom_prompt(mut self, prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        if !prompt.trim().is_empty() {
            self.custom_prompt = Some(prompt);
        }
        self
    }

    /// Build the complete generation prompt
    pub fn build(&self) -> String {
        if let Some(custom) = &self.custom_prompt {
            return custom.clone();
        }

        let mut prompt = String::new();

        // 1. What to write
        prompt.push_str(&format!(
            "Expand {} {} on \"{}\" in compliance training.\n",
            self.identifier, self.sequence, self.module.title
        ));
        prompt.push_str(MODULE_REQUIREMENTS);
        prompt.push_str("\n\n");

        // 2. Scenario tied to this module
        prompt.push_str("**Scenario-Based Learning Activity:**\n");
        prompt.push_str(&format!(
            "- Provide a scenario related to \"{}\".\n\n",
            self.module.title
        ));

        prompt.push_str(REGULATORY_REFERENCES);
        prompt.push_str("\n\n");

        // 3. Course context
        if let Some(course) = self.course {
            prompt.push_str("Course context:\n");
            prompt.push_str(&format!("- Title: {}\n", course.title));
            prompt.push_str(&format!("- Description: {}\n", course.description));
            prompt.push_str(&format!("- Duration: {} minutes\n", course.duration_minutes));
            prompt.push_str(&format!("- Audience: {}\n", course.audience.label()));
            prompt.push_str(&format!("- Regulatory alignment: {}\n\n", course.regulation.label()));
        }

        // 4. Outline notes
        if self.module.has_content() {
            prompt.push_str("Outline notes for this module:\n");
            prompt.push_str("---\n");
            prompt.push_str(&self.module.content);
            prompt.push_str("\n---\n");
        }

        prompt
    }
}

const MODULE_REQUIREMENTS: &str = r#"The module should be 700-1,000 words and include:

**Learning Objectives:**
- Define the compliance issue.
- Provide practical applications.

**Content:**
- Overview of the compliance issue.
- Key regulatory requirements and best practices.
- Case study illustrating real-world application."#;

const REGULATORY_REFERENCES: &str = r#"**Regulatory References:**
- Cite SEC, FINRA, or applicable regulations."#;

#[cfg(test)]
mod tests {
    use super::*;
    use coursegen_domain::{Audience, Regulation};

    fn course() -> CourseDetails {
        CourseDetails {
            title: "Compliance Essentials".to_string(),
            description: "Annual training".to_string(),
            duration_minutes: 45,
            audience: Audience::ComplianceOfficers,
            regulation: Regulation::Finra,
        }
    }

    #[test]
    fn test_prompt_names_module() {
        let id = Identifier::new("Section").unwrap();
        let module = ModuleRecord::new("Ethics", "", 1);
        let prompt = PromptBuilder::new(&id, 4, &module).build();

        assert!(prompt.starts_with("Expand Section 4 on \"Ethics\" in compliance training."));
        assert!(prompt.contains("Provide a scenario related to \"Ethics\""));
        assert!(prompt.contains("**Learning Objectives:**"));
        assert!(prompt.contains("**Regulatory References:**"));
    }

    #[test]
    fn test_prompt_includes_content() {
        let id = Identifier::default();
        let module = ModuleRecord::new("Privacy", "Reg S-P overview\nSafeguards rule", 2);
        let prompt = PromptBuilder::new(&id, 2, &module).build();

        assert!(prompt.contains("Outline notes for this module:"));
        assert!(prompt.contains("Reg S-P overview\nSafeguards rule"));
    }

    #[test]
    fn test_prompt_omits_empty_content() {
        let id = Identifier::default();
        let module = ModuleRecord::new("Privacy", "", 1);
        let prompt = PromptBuilder::new(&id, 1, &module).build();
        assert!(!prompt.contains("Outline notes"));
    }

    #[test]
    fn test_prompt_includes_course_context() {
        let id = Identifier::default();
        let module = ModuleRecord::new("Ethics", "", 1);
        let course = course();
        let prompt = PromptBuilder::new(&id, 1, &module).with_course(&course).build();

        assert!(prompt.contains("- Title: Compliance Essentials"));
        assert!(prompt.contains("- Duration: 45 minutes"));
        assert!(prompt.contains("- Audience: Compliance Officers"));
        assert!(prompt.contains("- Regulatory alignment: FINRA"));
    }

    #[test]
    fn test_custom_prompt_replaces_template() {
        let id = Identifier::default();
        let module = ModuleRecord::new("Ethics", "body", 1);
        let prompt = PromptBuilder::new(&id, 1, &module)
            .with_custom_prompt("Write a haiku about ethics")
            .build();
        assert_eq!(prompt, "Write a haiku about ethics");
    }

    #[test]
    fn test_blank_custom_prompt_ignored() {
        let id = Identifier::default();
        let module = ModuleRecord::new("Ethics", "", 1);
        let prompt = PromptBuilder::new(&id, 1, &module)
            .with_custom_prompt("   ")
            .build();
        assert!(prompt.starts_with("Expand Module 1"));
    }
}

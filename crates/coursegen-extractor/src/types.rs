//! Request and response types for script generation

use coursegen_domain::{CourseDetails, Identifier, ModuleRecord};
use std::collections::HashMap;

/// Request to generate scripts for a set of modules
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Course the modules belong to
    pub course: CourseDetails,

    /// Modules in flattened document order
    pub modules: Vec<ModuleRecord>,

    /// User-written prompts keyed by 1-based sequence number
    pub custom_prompts: HashMap<usize, String>,
}

impl GenerationRequest {
    /// Create a new request with no custom prompts
    pub fn new(course: CourseDetails, modules: Vec<ModuleRecord>) -> Self {
        Self {
            course,
            modules,
            custom_prompts: HashMap::new(),
        }
    }

    /// Override the prompt of the module at `sequence`
    pub fn with_custom_prompt(mut self, sequence: usize, prompt: impl Into<String>) -> Self {
        self.custom_prompts.insert(sequence, prompt.into());
        self
    }
}

/// Result of generating one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOutcome {
    /// The service returned text
    Generated {
        /// Generated script, trimmed
        text: String,
    },

    /// The service call failed or timed out
    Failed {
        /// Error message
        reason: String,
    },
}

impl ModuleOutcome {
    /// True when text was generated
    pub fn is_generated(&self) -> bool {
        matches!(self, ModuleOutcome::Generated { .. })
    }

    /// Generated text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            ModuleOutcome::Generated { text } => Some(text),
            ModuleOutcome::Failed { .. } => None,
        }
    }
}

/// Generated script for one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleScript {
    /// 1-based position in the whole course
    pub sequence: usize,

    /// Ordinal within the source document
    pub ordinal: usize,

    /// Module title
    pub title: String,

    /// What the service produced
    pub outcome: ModuleOutcome,
}

/// Metadata about a generation run
#[derive(Debug, Clone)]
pub struct GenerationMetadata {
    /// Name of the LLM model used
    pub model_name: String,

    /// Timestamp when generation finished (seconds since epoch)
    pub timestamp: u64,

    /// Number of modules sent to the service
    pub modules_attempted: usize,

    /// Number of modules whose generation failed
    pub modules_failed: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

/// Result of a generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Identifier used to name modules in the output
    pub identifier: Identifier,

    /// One script per requested module, in request order
    pub scripts: Vec<ModuleScript>,

    /// Metadata about the run
    pub metadata: GenerationMetadata,
}

impl GenerationReport {
    /// Modules whose generation failed
    pub fn failures(&self) -> impl Iterator<Item = &ModuleScript> {
        self.scripts.iter().filter(|s| !s.outcome.is_generated())
    }

    /// Render the full script
    ///
    /// Each module is followed by a blank line. Failed modules are rendered
    /// as an error line in place of their text.
    pub fn assemble(&self) -> String {
        let mut script = String::new();
        for module in &self.scripts {
            match &module.outcome {
                ModuleOutcome::Generated { text } => script.push_str(text),
                ModuleOutcome::Failed { reason } => script.push_str(&format!(
                    "Error generating {} {}: {}",
                    self.identifier, module.sequence, reason
                )),
            }
            script.push_str("\n\n");
        }
        script
    }
}

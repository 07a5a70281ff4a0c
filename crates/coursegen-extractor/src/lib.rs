//! Coursegen Extractor
//!
//! Turns course outline documents into module records and expands each
//! module into a training script through an LLM.
//!
//! # Architecture
//!
//! ```text
//! Files → DocumentLoader → Segmenter → CourseOutline → ScriptGenerator → LLM
//! ```
//!
//! # Key Features
//!
//! - **Segmentation**: Cut outline text at identifier markers ("Module 1:")
//!   into titled modules
//! - **Multi-document outlines**: Flatten several documents in upload order,
//!   reporting per-document issues instead of failing
//! - **Prompt templating**: Build a compliance-training prompt per module,
//!   with optional user overrides
//! - **Isolated failures**: A module whose generation fails is reported as
//!   such while the rest of the course is still generated
//!
//! # Example Usage
//!
//! ```no_run
//! use coursegen_domain::{Audience, CourseDetails, Identifier, Regulation};
//! use coursegen_extractor::{
//!     CourseOutline, ExtractorConfig, GenerationRequest, ScriptGenerator, Segmenter,
//!     SourceDocument,
//! };
//! use coursegen_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractorConfig::default();
//! let segmenter = Segmenter::new(Identifier::new("Module")?)?;
//!
//! let docs = vec![SourceDocument::new(
//!     "outline.txt",
//!     "Module 1: Intro\nWelcome\nModule 2: Ethics\nBe good",
//! )];
//! let outline = CourseOutline::build(&segmenter, &docs, config.max_document_length);
//!
//! let course = CourseDetails {
//!     title: "Compliance 101".to_string(),
//!     description: "Annual refresher".to_string(),
//!     duration_minutes: 30,
//!     audience: Audience::RiaEmployees,
//!     regulation: Regulation::Sec,
//! };
//!
//! let generator = ScriptGenerator::new(MockProvider::new("script"), config);
//! let report = generator
//!     .generate(GenerationRequest::new(course, outline.into_modules()))
//!     .await?;
//!
//! println!("{}", report.assemble());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod document;
mod error;
mod generator;
mod outline;
mod prompt;
mod segmenter;
mod types;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use document::{DocumentFormat, DocumentLoader, PlainTextExtractor, SourceDocument};
pub use error::ExtractorError;
pub use generator::ScriptGenerator;
pub use outline::{CourseOutline, DocumentIssue, DocumentModules};
pub use prompt::{PromptBuilder, SYSTEM_PROMPT};
pub use segmenter::{marker_pattern, segment, Segmenter};
pub use types::{
    GenerationMetadata, GenerationReport, GenerationRequest, ModuleOutcome, ModuleScript,
};

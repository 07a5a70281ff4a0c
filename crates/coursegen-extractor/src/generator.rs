//! Script generation over an LLM provider

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::prompt::PromptBuilder;
use crate::types::{
    GenerationMetadata, GenerationReport, GenerationRequest, ModuleOutcome, ModuleScript,
};
use coursegen_domain::traits::LlmProvider;
use coursegen_domain::{CourseDetails, Identifier, ModuleRecord};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Expands outline modules into training scripts
pub struct ScriptGenerator<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: ExtractorConfig,
    model_name: String,
}

impl<L> ScriptGenerator<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new generator
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
            config,
            model_name: "llm".to_string(),
        }
    }

    /// Create a new generator with a specific model name
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Generate a script for every module in the request
    ///
    /// Modules are generated one after another. A module whose call fails or
    /// times out is reported as [`ModuleOutcome::Failed`] and the rest still run.
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationReport, ExtractorError> {
        request
            .course
            .validate()
            .map_err(ExtractorError::InvalidCourse)?;

        if request.modules.is_empty() {
            return Err(ExtractorError::NoModules);
        }

        let identifier = self.config.identifier()?;
        let start_time = SystemTime::now();

        info!(
            "Generating {} {} script(s) for course '{}'",
            request.modules.len(),
            identifier,
            request.course.title
        );

        let mut scripts = Vec::with_capacity(request.modules.len());
        let mut overrun: Option<JoinHandle<Result<String, ExtractorError>>> = None;
        for (idx, module) in request.modules.iter().enumerate() {
            let sequence = idx + 1;

            // Calls to the provider never overlap
            if let Some(handle) = overrun.take() {
                debug!("Waiting for the timed out call to finish");
                let _ = handle.await;
            }

            debug!("Generating {} {}/{}", identifier, sequence, request.modules.len());

            let (outcome, still_running) = self
                .generate_module(
                    &identifier,
                    sequence,
                    module,
                    &request.course,
                    &request.custom_prompts,
                )
                .await;
            overrun = still_running;

            if let ModuleOutcome::Failed { reason } = &outcome {
                warn!("{} {} failed: {}", identifier, sequence, reason);
            }

            scripts.push(ModuleScript {
                sequence,
                ordinal: module.ordinal,
                title: module.title.clone(),
                outcome,
            });
        }

        let modules_failed = scripts.iter().filter(|s| !s.outcome.is_generated()).count();
        let processing_time_ms = start_time
            .elapsed()
            .unwrap_or(Duration::from_secs(0))
            .as_millis() as u64;

        let metadata = GenerationMetadata {
            model_name: self.model_name.clone(),
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            modules_attempted: scripts.len(),
            modules_failed,
            processing_time_ms,
        };

        info!(
            "Generation complete: {} generated, {} failed",
            scripts.len() - modules_failed,
            modules_failed
        );

        Ok(GenerationReport {
            identifier,
            scripts,
            metadata,
        })
    }

    /// Generate one module, folding errors into the outcome
    ///
    /// On timeout the provider call is still running; its handle is returned
    /// alongside the outcome.
    async fn generate_module(
        &self,
        identifier: &Identifier,
        sequence: usize,
        module: &ModuleRecord,
        course: &CourseDetails,
        custom_prompts: &HashMap<usize, String>,
    ) -> (ModuleOutcome, Option<JoinHandle<Result<String, ExtractorError>>>) {
        let mut builder = PromptBuilder::new(identifier, sequence, module).with_course(course);
        if let Some(custom) = custom_prompts.get(&sequence) {
            builder = builder.with_custom_prompt(custom.clone());
        }
        let prompt = builder.build();

        debug!("Prompt length: {} chars", prompt.len());

        let limit = self.config.generation_timeout();
        let mut handle = self.spawn_llm(prompt);
        let waited = timeout(limit, &mut handle).await;
        let (result, still_running) = match waited {
            Ok(joined) => {
                let result = joined
                    .map_err(|e| ExtractorError::Llm(format!("Task join error: {}", e)))
                    .and_then(|result| result);
                (result, None)
            }
            Err(_) => (Err(ExtractorError::Timeout(limit.as_secs())), Some(handle)),
        };

        let outcome = match result {
            Ok(text) => {
                debug!("LLM response length: {} chars", text.len());
                ModuleOutcome::Generated {
                    text: text.trim().to_string(),
                }
            }
            Err(e) => ModuleOutcome::Failed {
                reason: e.to_string(),
            },
        };
        (outcome, still_running)
    }

    /// Start the LLM call on the blocking pool
    fn spawn_llm(&self, prompt: String) -> JoinHandle<Result<String, ExtractorError>> {
        let llm = Arc::clone(&self.llm_provider);

        // LlmProvider is synchronous
        tokio::task::spawn_blocking(move || {
            llm.generate(&prompt)
                .map_err(|e| ExtractorError::Llm(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursegen_domain::{Audience, Regulation};
    use coursegen_llm::MockProvider;

    fn course() -> CourseDetails {
        CourseDetails {
            title: "Compliance 101".to_string(),
            description: "Basics".to_string(),
            duration_minutes: 30,
            audience: Audience::RiaEmployees,
            regulation: Regulation::Sec,
        }
    }

    #[tokio::test]
    async fn test_generate_trims_output() {
        let generator =
            ScriptGenerator::new(MockProvider::new("  Script body \n"), ExtractorConfig::default());
        let request = GenerationRequest::new(course(), vec![ModuleRecord::new("Intro", "", 1)]);

        let report = generator.generate(request).await.unwrap();
        assert_eq!(report.scripts.len(), 1);
        assert_eq!(report.scripts[0].outcome.text(), Some("Script body"));
        assert_eq!(report.metadata.modules_attempted, 1);
        assert_eq!(report.metadata.modules_failed, 0);
    }

    #[tokio::test]
    async fn test_generate_uses_model_name() {
        let generator = ScriptGenerator::new(MockProvider::default(), ExtractorConfig::default())
            .with_model_name("gpt-4");
        let request = GenerationRequest::new(course(), vec![ModuleRecord::new("Intro", "", 1)]);

        let report = generator.generate(request).await.unwrap();
        assert_eq!(report.metadata.model_name, "gpt-4");
    }

    #[tokio::test]
    async fn test_generate_rejects_invalid_identifier() {
        let config = ExtractorConfig::default().with_identifier("  ");
        let generator = ScriptGenerator::new(MockProvider::default(), config);
        let request = GenerationRequest::new(course(), vec![ModuleRecord::new("Intro", "", 1)]);

        let result = generator.generate(request).await;
        assert!(matches!(result, Err(ExtractorError::InvalidIdentifier(_))));
    }
}

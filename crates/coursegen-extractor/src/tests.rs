//! Integration tests for the extractor pipeline

#[cfg(test)]
mod tests {
    use crate::{
        CourseOutline, DocumentIssue, ExtractorConfig, ExtractorError, GenerationRequest,
        ModuleOutcome, ScriptGenerator, Segmenter, SourceDocument,
    };
    use coursegen_domain::{Audience, CourseDetails, Identifier, ModuleRecord, Regulation};
    use coursegen_domain::traits::LlmProvider;
    use coursegen_llm::MockProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Slow provider that records how many calls ran at once
    #[derive(Clone, Default)]
    struct ConcurrencyTracker {
        active: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
        calls: Arc<AtomicUsize>,
    }

    impl LlmProvider for ConcurrencyTracker {
        type Error = String;

        fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(2500));
            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok("late".to_string())
        }
    }

    fn course() -> CourseDetails {
        CourseDetails {
            title: "Advisers Compliance".to_string(),
            description: "Annual refresher".to_string(),
            duration_minutes: 60,
            audience: Audience::InvestmentAdvisers,
            regulation: Regulation::InvestmentAdvisersAct1940,
        }
    }

    fn outline(docs: &[SourceDocument]) -> CourseOutline {
        let config = ExtractorConfig::default();
        let segmenter = Segmenter::new(config.identifier().unwrap()).unwrap();
        CourseOutline::build(&segmenter, docs, config.max_document_length)
    }

    #[test]
    fn test_outline_example() {
        let text = "Course intro\nModule 1: Ethics\nDuty of care\nFiduciary duty\nModule 2. AML\nKYC basics";
        let segmenter = Segmenter::new(Identifier::new("Module").unwrap()).unwrap();
        let modules = segmenter.segment(text);

        assert_eq!(
            modules,
            vec![
                ModuleRecord::new("Ethics", "Duty of care\nFiduciary duty", 1),
                ModuleRecord::new("AML", "KYC basics", 2),
            ]
        );
    }

    #[tokio::test]
    async fn test_two_documents_end_to_end() {
        let docs = vec![
            SourceDocument::new("a.txt", "Module 1: Intro\nWelcome\nModule 2: Ethics\nBe good"),
            SourceDocument::new("b.txt", "Module 1: Privacy\nReg S-P"),
        ];
        let outline = outline(&docs);
        assert_eq!(outline.module_count(), 3);
        assert!(outline.issues().is_empty());

        let llm = MockProvider::new("Generated script");
        let generator = ScriptGenerator::new(llm.clone(), ExtractorConfig::default());
        let report = generator
            .generate(GenerationRequest::new(course(), outline.into_modules()))
            .await
            .unwrap();

        let sequences: Vec<usize> = report.scripts.iter().map(|s| s.sequence).collect();
        let ordinals: Vec<usize> = report.scripts.iter().map(|s| s.ordinal).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert_eq!(ordinals, vec![1, 2, 1]);

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[2].starts_with("Expand Module 3 on \"Privacy\""));
        assert!(prompts[2].contains("Reg S-P"));

        assert_eq!(
            report.assemble(),
            "Generated script\n\nGenerated script\n\nGenerated script\n\n"
        );
    }

    #[tokio::test]
    async fn test_failing_module_does_not_abort_others() {
        let mut llm = MockProvider::new("ok");
        llm.add_error("\"Ethics\"");

        let generator = ScriptGenerator::new(llm, ExtractorConfig::default());
        let modules = vec![
            ModuleRecord::new("Intro", "", 1),
            ModuleRecord::new("Ethics", "", 2),
            ModuleRecord::new("Wrap-up", "", 3),
        ];
        let report = generator
            .generate(GenerationRequest::new(course(), modules))
            .await
            .unwrap();

        assert!(report.scripts[0].outcome.is_generated());
        assert!(matches!(report.scripts[1].outcome, ModuleOutcome::Failed { .. }));
        assert!(report.scripts[2].outcome.is_generated());
        assert_eq!(report.metadata.modules_failed, 1);
        assert_eq!(report.failures().count(), 1);

        let script = report.assemble();
        assert!(script.starts_with("ok\n\nError generating Module 2: "));
        assert!(script.ends_with("ok\n\n"));
    }

    #[tokio::test]
    async fn test_custom_prompt_applies_to_its_module_only() {
        let llm = MockProvider::new("ok");
        let generator = ScriptGenerator::new(llm.clone(), ExtractorConfig::default());
        let modules = vec![
            ModuleRecord::new("Intro", "", 1),
            ModuleRecord::new("Ethics", "", 2),
        ];
        let request = GenerationRequest::new(course(), modules)
            .with_custom_prompt(2, "Summarize ethics rules");

        generator.generate(request).await.unwrap();

        let prompts = llm.prompts();
        assert!(prompts[0].starts_with("Expand Module 1 on \"Intro\""));
        assert_eq!(prompts[1], "Summarize ethics rules");
    }

    #[tokio::test]
    async fn test_timeout_becomes_failed_outcome() {
        let llm = MockProvider::new("late").with_delay(Duration::from_secs(3));
        let config = ExtractorConfig {
            generation_timeout_secs: 1,
            ..ExtractorConfig::default()
        };
        let generator = ScriptGenerator::new(llm, config);
        let request = GenerationRequest::new(course(), vec![ModuleRecord::new("Intro", "", 1)]);

        let report = generator.generate(request).await.unwrap();
        assert_eq!(
            report.scripts[0].outcome,
            ModuleOutcome::Failed {
                reason: "Generation timed out after 1s".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_timed_out_call_does_not_overlap_next_module() {
        let tracker = ConcurrencyTracker::default();
        let config = ExtractorConfig {
            generation_timeout_secs: 1,
            ..ExtractorConfig::default()
        };
        let generator = ScriptGenerator::new(tracker.clone(), config);
        let modules = vec![
            ModuleRecord::new("Intro", "", 1),
            ModuleRecord::new("Ethics", "", 2),
        ];

        let report = generator
            .generate(GenerationRequest::new(course(), modules))
            .await
            .unwrap();

        assert_eq!(report.metadata.modules_failed, 2);
        assert_eq!(tracker.calls.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_course_rejected() {
        let llm = MockProvider::default();
        let generator = ScriptGenerator::new(llm.clone(), ExtractorConfig::default());
        let mut details = course();
        details.title = "   ".to_string();

        let result = generator
            .generate(GenerationRequest::new(details, vec![ModuleRecord::new("Intro", "", 1)]))
            .await;

        assert!(matches!(result, Err(ExtractorError::InvalidCourse(_))));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_module_list_rejected() {
        let generator = ScriptGenerator::new(MockProvider::default(), ExtractorConfig::default());
        let result = generator
            .generate(GenerationRequest::new(course(), Vec::new()))
            .await;
        assert!(matches!(result, Err(ExtractorError::NoModules)));
    }

    #[test]
    fn test_documents_without_modules_become_issues() {
        let docs = vec![
            SourceDocument::new("blank.txt", "  \n "),
            SourceDocument::new("notes.txt", "Just some notes"),
            SourceDocument::new("outline.txt", "Module 1: Intro"),
        ];
        let outline = outline(&docs);

        assert_eq!(outline.module_count(), 1);
        assert_eq!(outline.issues().len(), 2);
        assert!(matches!(outline.issues()[0], DocumentIssue::NoText { .. }));
        assert!(matches!(outline.issues()[1], DocumentIssue::NoModules { .. }));
    }

    #[test]
    fn test_custom_identifier_config() {
        let config = ExtractorConfig::default().with_identifier("Topic");
        let segmenter = Segmenter::new(config.identifier().unwrap()).unwrap();
        let docs = vec![SourceDocument::new(
            "t.txt",
            "Topic 1.\nRisk\nAppetite\nTopic 2.\n\nControls\nTopic 3.\n",
        )];
        let outline = CourseOutline::build(&segmenter, &docs, config.max_document_length);

        let modules: Vec<(&str, &str)> = outline
            .modules()
            .map(|m| (m.title.as_str(), m.content.as_str()))
            .collect();
        assert_eq!(modules, vec![("Risk", "Appetite"), ("Controls", ""), ("", "")]);
    }
}

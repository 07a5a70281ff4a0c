//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use coursegen_extractor::{CourseOutline, GenerationReport, ModuleOutcome};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const PREVIEW_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the modules of an outline.
    pub fn format_outline(&self, outline: &CourseOutline) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_outline_json(outline),
            OutputFormat::Table => self.format_outline_table(outline),
            OutputFormat::Quiet => Ok(self.format_outline_quiet(outline)),
        }
    }

    fn format_outline_json(&self, outline: &CourseOutline) -> Result<String> {
        let documents: Vec<serde_json::Value> = outline
            .documents()
            .iter()
            .map(|doc| {
                let modules: Vec<serde_json::Value> = doc
                    .modules
                    .iter()
                    .map(|m| {
                        serde_json::json!({
                            "ordinal": m.ordinal,
                            "title": m.title,
                            "content": m.content,
                        })
                    })
                    .collect();
                serde_json::json!({
                    "document": doc.document,
                    "modules": modules,
                })
            })
            .collect();

        let issues: Vec<String> = outline.issues().iter().map(|i| i.to_string()).collect();

        Ok(serde_json::to_string_pretty(&serde_json::json!({
            "documents": documents,
            "issues": issues,
        }))?)
    }

    fn format_outline_table(&self, outline: &CourseOutline) -> Result<String> {
        if outline.is_empty() {
            return Ok(self.colorize("No modules found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Document", "#", "Title", "Content"]);

        for doc in outline.documents() {
            for module in &doc.modules {
                builder.push_record([
                    doc.document.clone(),
                    module.ordinal.to_string(),
                    module.title.clone(),
                    preview(&module.content),
                ]);
            }
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    fn format_outline_quiet(&self, outline: &CourseOutline) -> String {
        let titles: Vec<&str> = outline.modules().map(|m| m.title.as_str()).collect();
        titles.join("\n")
    }

    /// Format a generation report.
    ///
    /// Table and quiet formats print the assembled script; JSON keeps each
    /// module's outcome separate.
    pub fn format_report(&self, report: &GenerationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(report),
            OutputFormat::Table | OutputFormat::Quiet => Ok(report.assemble()),
        }
    }

    fn format_report_json(&self, report: &GenerationReport) -> Result<String> {
        let scripts: Vec<serde_json::Value> = report
            .scripts
            .iter()
            .map(|s| match &s.outcome {
                ModuleOutcome::Generated { text } => serde_json::json!({
                    "sequence": s.sequence,
                    "ordinal": s.ordinal,
                    "title": s.title,
                    "status": "generated",
                    "text": text,
                }),
                ModuleOutcome::Failed { reason } => serde_json::json!({
                    "sequence": s.sequence,
                    "ordinal": s.ordinal,
                    "title": s.title,
                    "status": "failed",
                    "reason": reason,
                }),
            })
            .collect();

        let meta = &report.metadata;
        Ok(serde_json::to_string_pretty(&serde_json::json!({
            "identifier": report.identifier.as_str(),
            "scripts": scripts,
            "metadata": {
                "model_name": meta.model_name,
                "timestamp": meta.timestamp,
                "modules_attempted": meta.modules_attempted,
                "modules_failed": meta.modules_failed,
                "processing_time_ms": meta.processing_time_ms,
            },
        }))?)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a generation summary line.
    pub fn generation_summary(&self, report: &GenerationReport) -> String {
        let meta = &report.metadata;
        let generated = meta.modules_attempted - meta.modules_failed;
        let message = format!(
            "Generated {}/{} {} script(s) with {} in {} ms",
            generated,
            meta.modules_attempted,
            report.identifier,
            meta.model_name,
            meta.processing_time_ms
        );
        if meta.modules_failed == 0 {
            self.success(&message)
        } else {
            self.warning(&message)
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// First line of `content`, cut to a short preview.
fn preview(content: &str) -> String {
    let first = content.lines().next().unwrap_or("");
    if first.chars().count() > PREVIEW_CHARS || content.lines().nth(1).is_some() {
        let cut: String = first.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut)
    } else {
        first.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursegen_domain::Identifier;
    use coursegen_extractor::{
        GenerationMetadata, ModuleScript, Segmenter, SourceDocument,
    };

    fn outline() -> CourseOutline {
        let segmenter = Segmenter::new(Identifier::default()).unwrap();
        let docs = vec![SourceDocument::new(
            "outline.txt",
            "Module 1: Ethics\nDuty of care\nModule 2: AML",
        )];
        CourseOutline::build(&segmenter, &docs, 1_000)
    }

    fn report() -> GenerationReport {
        GenerationReport {
            identifier: Identifier::default(),
            scripts: vec![
                ModuleScript {
                    sequence: 1,
                    ordinal: 1,
                    title: "Ethics".to_string(),
                    outcome: ModuleOutcome::Generated { text: "Script".to_string() },
                },
                ModuleScript {
                    sequence: 2,
                    ordinal: 2,
                    title: "AML".to_string(),
                    outcome: ModuleOutcome::Failed { reason: "quota".to_string() },
                },
            ],
            metadata: GenerationMetadata {
                model_name: "gpt-4".to_string(),
                timestamp: 0,
                modules_attempted: 2,
                modules_failed: 1,
                processing_time_ms: 12,
            },
        }
    }

    #[test]
    fn test_outline_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_outline(&outline()).unwrap();
        assert!(output.contains("Title"));
        assert!(output.contains("Ethics"));
        assert!(output.contains("outline.txt"));
    }

    #[test]
    fn test_outline_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_outline(&outline()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["documents"][0]["modules"][0]["title"], "Ethics");
        assert_eq!(value["documents"][0]["modules"][1]["ordinal"], 2);
    }

    #[test]
    fn test_outline_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.format_outline(&outline()).unwrap(), "Ethics\nAML");
    }

    #[test]
    fn test_empty_outline() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_outline(&CourseOutline::default()).unwrap();
        assert!(output.contains("No modules found"));
    }

    #[test]
    fn test_report_formats() {
        let table = Formatter::new(OutputFormat::Table, false);
        assert_eq!(
            table.format_report(&report()).unwrap(),
            "Script\n\nError generating Module 2: quota\n\n"
        );

        let json = Formatter::new(OutputFormat::Json, false);
        let value: serde_json::Value =
            serde_json::from_str(&json.format_report(&report()).unwrap()).unwrap();
        assert_eq!(value["scripts"][1]["status"], "failed");
        assert_eq!(value["metadata"]["modules_failed"], 1);
    }

    #[test]
    fn test_generation_summary() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(
            formatter.generation_summary(&report()),
            "⚠ Generated 1/2 Module script(s) with gpt-4 in 12 ms"
        );
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short"), "short");
        assert_eq!(preview("one\ntwo"), "one…");
        assert_eq!(preview(""), "");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}

//! Generate command implementation.

use super::{build_outline, no_modules_message, with_identifier};
use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::provider::Provider;
use coursegen_domain::CourseDetails;
use coursegen_extractor::{DocumentLoader, GenerationRequest, ScriptGenerator};
use std::fs;
use tokio::runtime::Runtime;

/// Execute the generate command.
///
/// The provider is built and dropped outside `runtime`; only the generation
/// itself runs on it.
pub fn execute_generate(
    args: GenerateArgs,
    config: &Config,
    formatter: &Formatter,
    runtime: &Runtime,
) -> Result<()> {
    let generator_config = with_identifier(&config.generator, args.identifier);
    let loaded = build_outline(&args.files, &generator_config, &DocumentLoader::new())?;
    loaded.print_issues(formatter);

    if loaded.outline.is_empty() {
        eprintln!("{}", formatter.warning(&no_modules_message(&generator_config)));
        return Ok(());
    }

    let course = CourseDetails {
        title: args.title,
        description: args.description,
        duration_minutes: args.duration,
        audience: args.audience.into(),
        regulation: args.regulation.into(),
    };

    let mut settings = config.provider.clone();
    if let Some(kind) = args.provider {
        settings.kind = kind.into();
    }
    if let Some(model) = args.model {
        settings.model = model;
    }
    let provider = Provider::from_settings(
        &settings,
        args.api_key,
        generator_config.generation_timeout(),
    )?;
    let model_name = provider.model().to_string();

    let modules = loaded.outline.into_modules();
    eprintln!(
        "{}",
        formatter.info(&format!("Generating {} module(s) with {}", modules.len(), model_name))
    );

    for sequence in unmatched_prompts(&args.custom_prompts, modules.len()) {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "Ignoring custom prompt {}: only {} module(s) detected",
                sequence,
                modules.len()
            ))
        );
    }

    let request = args
        .custom_prompts
        .into_iter()
        .fold(GenerationRequest::new(course, modules), |request, (sequence, prompt)| {
            request.with_custom_prompt(sequence, prompt)
        });

    let generator = ScriptGenerator::new(provider, generator_config).with_model_name(model_name);
    let report = runtime.block_on(generator.generate(request))?;

    for failure in report.failures() {
        if let coursegen_extractor::ModuleOutcome::Failed { reason } = &failure.outcome {
            eprintln!(
                "{}",
                formatter.warning(&format!(
                    "{} {} ({}) failed: {}",
                    report.identifier, failure.sequence, failure.title, reason
                ))
            );
        }
    }

    match args.output {
        Some(path) => {
            fs::write(&path, report.assemble())?;
            println!("{}", formatter.generation_summary(&report));
            println!("{}", formatter.success(&format!("Script written to {}", path.display())));
        }
        None => {
            println!("{}", formatter.format_report(&report)?);
            eprintln!("{}", formatter.generation_summary(&report));
        }
    }

    Ok(())
}

/// Custom prompt numbers with no module to apply to, in the order given.
fn unmatched_prompts(custom_prompts: &[(usize, String)], module_count: usize) -> Vec<usize> {
    custom_prompts
        .iter()
        .map(|(sequence, _)| *sequence)
        .filter(|sequence| *sequence > module_count)
        .collect()
}

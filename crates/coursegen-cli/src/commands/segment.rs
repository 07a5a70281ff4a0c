//! Segment command implementation.

use super::{build_outline, no_modules_message, with_identifier};
use crate::cli::SegmentArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use coursegen_extractor::DocumentLoader;

/// Execute the segment command.
pub fn execute_segment(args: SegmentArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let generator = with_identifier(&config.generator, args.identifier);
    let loaded = build_outline(&args.files, &generator, &DocumentLoader::new())?;
    loaded.print_issues(formatter);

    if loaded.outline.is_empty() {
        eprintln!("{}", formatter.warning(&no_modules_message(&generator)));
        return Ok(());
    }

    println!("{}", formatter.format_outline(&loaded.outline)?);
    Ok(())
}

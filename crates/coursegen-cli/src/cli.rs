//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use coursegen_domain::{Audience, Regulation};
use std::path::PathBuf;

/// Coursegen - Split course outlines into modules and expand them into training scripts.
#[derive(Debug, Parser)]
#[command(name = "coursegen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (titles or script only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split outline documents into modules
    Segment(SegmentArgs),

    /// Generate a training script for every module
    Generate(GenerateArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the segment command.
#[derive(Debug, Parser)]
pub struct SegmentArgs {
    /// Outline documents, processed in the given order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Marker word that introduces each module
    #[arg(short, long)]
    pub identifier: Option<String>,
}

/// Arguments for the generate command.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Outline documents, processed in the given order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Course title
    #[arg(short, long)]
    pub title: String,

    /// Course description
    #[arg(short, long)]
    pub description: String,

    /// Course duration in minutes
    #[arg(long, default_value = "30")]
    pub duration: u32,

    /// Target audience
    #[arg(short, long, value_enum, default_value = "ria-employees")]
    pub audience: AudienceArg,

    /// Regulatory alignment
    #[arg(short, long, value_enum, default_value = "sec")]
    pub regulation: RegulationArg,

    /// Marker word that introduces each module
    #[arg(short, long)]
    pub identifier: Option<String>,

    /// Text-generation service
    #[arg(short, long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Model name
    #[arg(short, long)]
    pub model: Option<String>,

    /// API key (defaults to the variable named by provider.api_key_env)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Replace the prompt of one module (format: N=TEXT, N counted across all files)
    #[arg(long = "custom-prompt", value_parser = parse_custom_prompt)]
    pub custom_prompts: Vec<(usize, String)>,

    /// Write the assembled script to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for config management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

/// Audience argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum AudienceArg {
    /// RIA employees
    RiaEmployees,
    /// Compliance officers
    ComplianceOfficers,
    /// Investment advisers
    InvestmentAdvisers,
    /// General finance professionals
    GeneralFinanceProfessionals,
}

/// Regulation argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RegulationArg {
    /// SEC
    Sec,
    /// FINRA
    Finra,
    /// Investment Advisers Act of 1940
    AdvisersAct,
    /// Multiple regulators
    Multiple,
}

/// Provider argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProviderArg {
    /// OpenAI-compatible API
    Openai,
    /// Local Ollama server
    Ollama,
}

/// Parse `N=TEXT` into a sequence number and prompt.
pub fn parse_custom_prompt(input: &str) -> Result<(usize, String), String> {
    let (number, text) = input
        .split_once('=')
        .ok_or_else(|| format!("Invalid custom prompt '{}'. Expected 'N=TEXT'", input))?;

    let sequence: usize = number
        .trim()
        .parse()
        .map_err(|_| format!("Invalid module number '{}'", number.trim()))?;
    if sequence == 0 {
        return Err("Module numbers start at 1".to_string());
    }
    if text.trim().is_empty() {
        return Err(format!("Custom prompt for module {} is empty", sequence));
    }

    Ok((sequence, text.to_string()))
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<AudienceArg> for Audience {
    fn from(audience: AudienceArg) -> Self {
        match audience {
            AudienceArg::RiaEmployees => Audience::RiaEmployees,
            AudienceArg::ComplianceOfficers => Audience::ComplianceOfficers,
            AudienceArg::InvestmentAdvisers => Audience::InvestmentAdvisers,
            AudienceArg::GeneralFinanceProfessionals => Audience::GeneralFinanceProfessionals,
        }
    }
}

impl From<RegulationArg> for Regulation {
    fn from(regulation: RegulationArg) -> Self {
        match regulation {
            RegulationArg::Sec => Regulation::Sec,
            RegulationArg::Finra => Regulation::Finra,
            RegulationArg::AdvisersAct => Regulation::InvestmentAdvisersAct1940,
            RegulationArg::Multiple => Regulation::Multiple,
        }
    }
}

impl From<ProviderArg> for crate::config::ProviderKind {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Openai => crate::config::ProviderKind::OpenAi,
            ProviderArg::Ollama => crate::config::ProviderKind::Ollama,
        }
    }
}

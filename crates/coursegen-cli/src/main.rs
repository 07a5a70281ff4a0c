//! Coursegen CLI - Split course outlines into modules and generate training scripts.

use clap::Parser;
use coursegen_cli::commands;
use coursegen_cli::{Cli, CliError, Command, Config, Formatter};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` applies when no `-v` is given.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> coursegen_cli::Result<()> {
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Segment(args) => commands::execute_segment(args, &config, &formatter),
        Command::Generate(args) => {
            // Blocking HTTP clients must be created and dropped outside the runtime.
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(CliError::Io)?;
            let result = commands::execute_generate(args, &config, &formatter, &runtime);
            // A call that outlived its timeout may still hold a blocking thread.
            runtime.shutdown_background();
            result
        }
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)
        }
    }
}

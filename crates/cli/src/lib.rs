pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use profiler_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat, OutputFormat};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(
    name = "profiler",
    about = "Customer profile generator CLI",
    long_about = "Derive customer-behavior profiles from JSON customer records and inspect runtime configuration.",
    after_help = "Examples:\n  profiler generate --input customer.json\n  cat customers.jsonl | profiler batch\n  profiler doctor --json"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Config file to load instead of profiler.toml (must exist)"
    )]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override logging.level: trace|debug|info|warn|error")]
    log_level: Option<String>,
    #[arg(
        long,
        global = true,
        value_parser = parse_log_format,
        help = "Override logging.format: compact|pretty|json"
    )]
    log_format: Option<LogFormat>,
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                log_level: self.log_level.clone(),
                log_format: self.log_format,
                output_format: None,
            },
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Generate a profile from one JSON customer record")]
    Generate {
        #[arg(long, help = "Path to the record (reads stdin when omitted or `-`)")]
        input: Option<PathBuf>,
        #[arg(long, value_parser = parse_output_format, help = "Output format: json|pretty|text")]
        format: Option<OutputFormat>,
    },
    #[command(about = "Generate one profile per line of JSON Lines input")]
    Batch {
        #[arg(long, help = "Path to the JSON Lines file (reads stdin when omitted or `-`)")]
        input: Option<PathBuf>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config and run the profile engine self-check")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.load_options();
    init_logging(&options);

    let correlation_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!("profiler.command", correlation_id = %correlation_id);
    let _entered = span.enter();

    let result = match cli.command {
        Command::Generate { input, format } => {
            let mut options = options;
            options.overrides.output_format = format;
            commands::generate::run(input.as_deref(), options)
        }
        Command::Batch { input } => commands::batch::run(input.as_deref(), options),
        Command::Config => commands::config::run(options),
        Command::Doctor { json } => commands::doctor::run(json, options),
    };

    tracing::info!(
        event_name = "system.cli.completed",
        exit_code = result.exit_code,
        "profiler command finished"
    );

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

// Falls back to defaults when the config is invalid; the command itself reports the failure.
fn init_logging(options: &LoadOptions) {
    use tracing::Level;
    use LogFormat::*;

    let config = AppConfig::load(options.clone()).unwrap_or_default();
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::WARN);
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level);

    match config.logging.format {
        Compact => builder.compact().init(),
        Pretty => builder.pretty().init(),
        Json => builder.json().init(),
    }
}

fn parse_output_format(value: &str) -> Result<OutputFormat, String> {
    value.parse::<OutputFormat>().map_err(|error| error.to_string())
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    value.parse::<LogFormat>().map_err(|error| error.to_string())
}

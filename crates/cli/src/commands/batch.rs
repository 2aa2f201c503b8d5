use std::path::Path;

use profiler_core::config::{AppConfig, LoadOptions};
use profiler_core::{generate_batch, ApplicationError, BatchReport};

use crate::commands::{escape_json, read_input, CommandResult};

pub fn run(input: Option<&Path>, options: LoadOptions) -> CommandResult {
    if let Err(error) = AppConfig::load(options) {
        return CommandResult::from_error("batch", &ApplicationError::from(error));
    }

    let raw = match read_input(input) {
        Ok(raw) => raw,
        Err(error) => return CommandResult::from_error("batch", &error),
    };

    run_with_input(&raw)
}

/// One JSON entry per profiled line, then a summary envelope on the last line.
pub fn run_with_input(raw: &str) -> CommandResult {
    let report = generate_batch(raw.lines());

    let mut lines: Vec<String> = report
        .entries
        .iter()
        .map(|entry| {
            serde_json::to_string(entry).unwrap_or_else(|error| {
                format!(
                    "{{\"status\":\"error\",\"line\":{},\"message\":\"{}\"}}",
                    entry.line(),
                    escape_json(&error.to_string())
                )
            })
        })
        .collect();

    let summary = summarize(&report);
    lines.push(summary.output);

    CommandResult { exit_code: summary.exit_code, output: lines.join("\n") }
}

fn summarize(report: &BatchReport) -> CommandResult {
    let message = format!("generated {} profiles, {} lines failed", report.generated, report.failed);

    if report.is_complete() {
        CommandResult::success("batch", message)
    } else {
        CommandResult::failure("batch", "partial_batch", message, 1)
    }
}

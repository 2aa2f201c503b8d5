use std::path::Path;

use profiler_core::config::{AppConfig, LoadOptions, OutputFormat};
use profiler_core::{ApplicationError, CustomerProfile, CustomerRecord, ProfileGenerator};

use crate::commands::{escape_json, read_input, CommandResult};

/// `--format` arrives as `options.overrides.output_format`, so it outranks env and file.
pub fn run(input: Option<&Path>, options: LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::from_error("generate", &ApplicationError::from(error))
        }
    };

    let raw = match read_input(input) {
        Ok(raw) => raw,
        Err(error) => return CommandResult::from_error("generate", &error),
    };

    run_with_input(&raw, config.output.format)
}

pub fn run_with_input(raw: &str, format: OutputFormat) -> CommandResult {
    let record = match CustomerRecord::from_json_str(raw) {
        Ok(record) => record,
        Err(error) => return CommandResult::from_error("generate", &ApplicationError::from(error)),
    };

    let profile = ProfileGenerator::new().generate(&record);
    CommandResult { exit_code: 0, output: render_profile(&profile, format) }
}

pub fn render_profile(profile: &CustomerProfile, format: OutputFormat) -> String {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(profile),
        OutputFormat::Pretty => serde_json::to_string_pretty(profile),
        OutputFormat::Text => return render_text(profile),
    };

    rendered.unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"generate\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            escape_json(&error.to_string())
        )
    })
}

fn render_text(profile: &CustomerProfile) -> String {
    let recommendations = if profile.recommendations.is_empty() {
        "<none>".to_string()
    } else {
        profile.recommendations.join(", ")
    };

    [
        format!("ltv_segment: {}", profile.ltv_segment),
        format!("discount_sensitive: {}", profile.discount_sensitive),
        format!("recommendations: {recommendations}"),
        format!("loyalty_flag: {}", profile.loyalty_flag),
        format!("churn_risk: {}", profile.churn_risk),
        format!("cross_sell_opportunity: {}", profile.cross_sell_opportunity),
        format!("needs_more_data: {}", profile.needs_more_data),
    ]
    .join("\n")
}

use std::env;
use std::fs;
use std::path::Path;

use profiler_core::config::{resolve_config_path, AppConfig, LoadOptions};
use profiler_core::ApplicationError;
use toml::Value;

use crate::commands::CommandResult;

struct ConfigField<'a> {
    key_path: &'static str,
    value: String,
    override_flag: Option<&'static str>,
    env_keys: &'a [&'static str],
}

pub fn run(options: LoadOptions) -> CommandResult {
    let config_file_path = resolve_config_path(options.config_path.as_deref());
    let overrides = options.overrides.clone();

    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => return CommandResult::from_error("config", &ApplicationError::from(error)),
    };

    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let fields = [
        ConfigField {
            key_path: "logging.level",
            value: config.logging.level.clone(),
            override_flag: overrides.log_level.is_some().then_some("--log-level"),
            env_keys: &["PROFILER_LOGGING_LEVEL", "PROFILER_LOG_LEVEL"],
        },
        ConfigField {
            key_path: "logging.format",
            value: config.logging.format.as_str().to_string(),
            override_flag: overrides.log_format.is_some().then_some("--log-format"),
            env_keys: &["PROFILER_LOGGING_FORMAT", "PROFILER_LOG_FORMAT"],
        },
        ConfigField {
            key_path: "output.format",
            value: config.output.format.as_str().to_string(),
            override_flag: overrides.output_format.is_some().then_some("--format"),
            env_keys: &["PROFILER_OUTPUT_FORMAT"],
        },
    ];

    let mut lines =
        vec!["effective config (source precedence: flag > env > file > default):".to_string()];
    for field in &fields {
        let source = match field.override_flag {
            Some(flag) => format!("flag ({flag})"),
            None => field_source(
                field.key_path,
                field.env_keys,
                config_file_doc.as_ref(),
                config_file_path.as_deref(),
            ),
        };
        lines.push(render_line(field.key_path, &field.value, source));
    }

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    let env_hit = env_keys
        .iter()
        .find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()));
    if let Some(env_key) = env_hit {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

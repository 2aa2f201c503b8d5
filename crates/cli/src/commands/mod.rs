pub mod batch;
pub mod config;
pub mod doctor;
pub mod generate;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;
use profiler_core::ApplicationError;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<String>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            hint: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            hint: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Failure envelope for an [`ApplicationError`], carrying its user-facing hint.
    pub fn from_error(command: &str, error: &ApplicationError) -> Self {
        tracing::warn!(
            event_name = "system.cli.command_failed",
            command,
            error_class = error.error_class(),
            error = %error,
            "command failed"
        );
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error.error_class().to_string()),
            message: error.to_string(),
            hint: Some(error.user_message().to_string()),
        };
        Self { exit_code: error.exit_code(), output: serialize_payload(payload) }
    }
}

/// Reads the whole input from `path`, or from stdin when it is absent or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String, ApplicationError> {
    read_source(path).map_err(|error| ApplicationError::Input(format!("{error:#}")))
}

fn read_source(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("could not read `{}`", path.display())),
        _ => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw).context("could not read stdin")?;
            Ok(raw)
        }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            escape_json(&error.to_string())
        )
    })
}

pub(crate) fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

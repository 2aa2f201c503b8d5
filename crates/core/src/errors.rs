use thiserror::Error;

use crate::config::ConfigError;

/// Failures while turning raw input text into a [`crate::CustomerRecord`].
///
/// Field-level problems never surface here; they resolve to documented
/// defaults during decoding.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("record is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("record must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("input failure: {0}")]
    Input(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Decode(_) => "record_decode",
            Self::Input(_) => "input_read",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Configuration(_) => 2,
            Self::Input(_) => 3,
            Self::Decode(_) => 4,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Decode(_) => "The customer record could not be decoded. Check that it is a JSON object.",
            Self::Input(_) => "The input could not be read. Check the path and try again.",
            Self::Configuration(_) => "The configuration is invalid. Run `profiler config` to inspect it.",
        }
    }
}

impl From<ConfigError> for ApplicationError {
    fn from(value: ConfigError) -> Self {
        Self::Configuration(value.to_string())
    }
}

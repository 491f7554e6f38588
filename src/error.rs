use std::path::PathBuf;
use thiserror::Error;

use crate::value::ParseValueError;

#[derive(Debug, Error)]
pub enum FlagfigError {
    #[error("Unsupported type `{type_name}` for config item '{item}'")]
    UnsupportedType { item: String, type_name: &'static str },

    #[error("Flag '{0}' is defined more than once")]
    DuplicateFlag(String),

    #[error("Unknown parameter '{key}' in {path} (line {line})")]
    UnknownKey {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown parameters in config file: {}", unknown_key_names(.0))]
    UnknownKeys(Vec<FlagfigError>),

    #[error("Invalid value for '{key}': {source}")]
    InvalidValue {
        key: String,
        source: ParseValueError,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No such flag: {0}")]
    UnknownFlag(String),

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("Key not found: {0}")]
    KeyNotFound(String),
}

fn unknown_key_names(errors: &[FlagfigError]) -> String {
    errors
        .iter()
        .map(|e| match e {
            FlagfigError::UnknownKey { key, .. } => key.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

//! Error types for jumpdef.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the library.
#[derive(Debug, Error)]
pub enum JumpDefError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for {key}: {reason}")]
    ConfigValue { key: &'static str, reason: String },

    #[error("invalid cursor position: line {line} (lines are 1-based)")]
    InvalidPosition { line: u32 },

    #[error("invalid notebook cell: {0}")]
    InvalidCell(String),

    #[error("kernel produced no JSON result: {0:?}")]
    KernelOutput(String),

    #[error("result carries both a definition ({file}) and an error ({error})")]
    InconsistentResult { file: String, error: String },

    #[error("result is incomplete: no file and no error")]
    IncompleteResult,

    #[error("server check failed: {0}")]
    ServerCheck(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JumpDefError>;

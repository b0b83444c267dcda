//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Covers I/O failures, the two undefined-statistics conditions of the pipeline
//! (empty input, zero standard deviation), encoder/resizer failures, and the
//! batch-level conditions (output name collisions, cancellation).
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input is empty: grid size is undefined for a zero-length byte stream")]
    EmptyInput,

    #[error("Degenerate input: standard deviation is zero (every cell equals {mean})")]
    DegenerateInput { mean: f64 },

    #[error("Resize error: {0}")]
    Resize(String),

    #[error("Failed to encode {path:?}: {message}")]
    Encode { path: PathBuf, message: String },

    #[error("Output name {name:?} for {second:?} is already claimed by {first:?}")]
    OutputCollision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Cancelled before conversion started")]
    Cancelled,

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }

    pub(crate) fn encode<E: std::fmt::Display>(path: &std::path::Path, e: E) -> Self {
        Error::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    }
}

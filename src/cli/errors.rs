use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Input path does not exist: {path:?}")]
    InputNotFound { path: PathBuf },

    #[error("Invalid extension: {extension:?}")]
    InvalidExtension { extension: String },

    #[error("{failed} of {total} files failed to convert")]
    BatchFailures { failed: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),

    #[error(transparent)]
    Conversion(#[from] apkraster::Error),
}

use thiserror::Error;

use crate::biography::GenerationError;

/// Application-level error type.
/// Everything the walker and the exporter can fail with ends up here; `main`
/// reports it and exits without panicking.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),
}

impl AppError {
    /// Short code for the operator-facing failure line.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Dataset(_) => "DATASET_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Generation(_) => "GENERATION_ERROR",
        }
    }
}

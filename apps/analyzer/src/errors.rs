use thiserror::Error;

/// Application-level error type for failures that abort the run before
/// (or outside of) the pipeline itself. Stage failures never appear here —
/// the orchestrator absorbs them into the run status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),
}

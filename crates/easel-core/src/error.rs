//! Error types for the viewport engine.

use thiserror::Error;

/// Errors raised by the engine.
///
/// Numeric input is clamped rather than rejected, so the only hard failure
/// is starting without a surface. Configuration text that cannot be parsed
/// at all is reported separately so hosts can decide whether to fall back.
#[derive(Debug, Error)]
pub enum EaselError {
    #[error("Easel needs a surface element to start pan and zoom")]
    MissingSurface,
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for engine operations.
pub type EaselResult<T> = Result<T, EaselError>;

impl From<serde_json::Error> for EaselError {
    fn from(err: serde_json::Error) -> Self {
        EaselError::Config(err.to_string())
    }
}

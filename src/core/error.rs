//! Error types for karst

use thiserror::Error;

/// Main error type for the crate
///
/// Cave generation itself is infallible; errors only arise on the
/// parameter-file path (load, parse, validate).
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid parameters: {0}")]
    Params(String),
}

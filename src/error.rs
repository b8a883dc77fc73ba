//! Crate-wide error type.
//!
//! Every fallible operation in the loader, reactor driver and reporting layer
//! returns `Result<_, PyroError>`. Errors are propagated with `?` up to the
//! entry point and terminate the current run with a diagnostic message; there
//! is no retry or partial-result salvage anywhere in the crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PyroError {
    /// Missing or malformed feedstock or mechanism entry
    #[error("Configuration error: {0}")]
    Config(String),
    /// Feedstock identifier absent from the loaded table
    #[error("Feedstock '{0}' not found in feedstock table")]
    FeedstockNotFound(String),
    /// External solver failed to converge or produced an invalid state
    #[error("Integration error: {0}")]
    Integration(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

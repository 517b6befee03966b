//! Error types shared by every pipeline stage.

use std::time::Duration;

use thiserror::Error;

use crate::types::ReconcilePhase;

/// Errors that can stop a pipeline stage.
///
/// Per-track search failures and per-batch playlist failures are not part of
/// this enum; they are collected into reports by the resolver and reconciler
/// and only surface here as [`PortError::PartialFailure`].
#[derive(Error, Debug)]
pub enum PortError {
    /// A configuration value is missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The source page never rendered the ready selector
    #[error("Source page did not render `{selector}` within {timeout:?}")]
    PageLoadTimeout { selector: String, timeout: Duration },

    /// The browser automation layer failed
    #[error("Browser error: {0}")]
    Browser(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Spotify returned a non-success status
    #[error("Spotify API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The resolved-tracks snapshot could not be read or written
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Some playlist batches were rejected
    #[error("{phase} finished with {failed} of {total} batches failing")]
    PartialFailure {
        phase: ReconcilePhase,
        failed: usize,
        total: usize,
    },
}

impl PortError {
    pub fn browser(err: impl std::fmt::Display) -> Self {
        PortError::Browser(err.to_string())
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PortError>;

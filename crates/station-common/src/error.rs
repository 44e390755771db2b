//! Error types for station-plot crates.

use thiserror::Error;

/// Result type alias using StationError.
pub type StationResult<T> = Result<T, StationError>;

/// Primary error type for symbol compilation.
#[derive(Debug, Error)]
pub enum StationError {
    // === Decode bridge errors ===
    /// The decoder backend failed to boot. Fatal for the process; no retry.
    #[error("Decoder backend initialization failed: {0}")]
    BackendInit(String),

    /// `initialize` was called a second time on the same orchestrator.
    #[error("Decoder backend already initialized")]
    AlreadyInitialized,

    /// The backend task is gone (init failed or the runtime shut down).
    #[error("Decoder backend unavailable")]
    BackendUnavailable,

    /// No decode result arrived within the deadline. Per-request only.
    #[error("Decode request timed out after {0} ms")]
    DecodeTimeout(u64),

    // === Rendering errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Invalid slot index: {0}")]
    InvalidSlot(usize),
}

impl From<anyhow::Error> for StationError {
    fn from(err: anyhow::Error) -> Self {
        StationError::BackendInit(err.to_string())
    }
}

impl From<serde_json::Error> for StationError {
    fn from(err: serde_json::Error) -> Self {
        StationError::RenderError(format!("JSON error: {}", err))
    }
}

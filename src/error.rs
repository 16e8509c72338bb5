//! Error types shared by the session, the renderer and the boundary.

use thiserror::Error;

/// Everything that can go wrong inside a session operation.
///
/// These never cross the FFI boundary: [`crate::bridge::ScoreBridge`]
/// turns each one into the documented fallback value for its operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// The session has not been initialized (or was cleaned up).
    #[error("session is not initialized")]
    NotInitialized,

    /// A required argument was absent, empty or out of range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The document (or archive) could not be read.
    #[error("failed to load document: {0}")]
    LoadFailure(String),

    /// A fault raised while engraving a page.
    #[error("failed to render: {0}")]
    RenderFailure(String),

    /// `convert` was asked for a source format it does not know.
    #[error("unsupported source format: {0}")]
    UnsupportedFormat(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}

impl From<serde_json::Error> for ScoreError {
    fn from(e: serde_json::Error) -> Self {
        ScoreError::InvalidInput(format!("JSON error: {e}"))
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;

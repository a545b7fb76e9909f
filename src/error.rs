//! Error types for the insight index.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, InsightError>;

/// Errors raised by the index core and the engines behind it.
#[derive(Debug, Error)]
pub enum InsightError {
    /// The underlying engine rejected a mutation, a commit, or a read.
    #[error("engine error: {0}")]
    Engine(String),

    /// `drain_for_commit` was called twice for the same unit of work.
    #[error("change batch was already drained for this unit of work")]
    DoubleDrain,

    /// A reader was used after its snapshot was released.
    #[error("index reader is closed")]
    ReaderClosed,

    /// An operation was invoked in the wrong lifecycle phase.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl InsightError {
    pub fn engine<S: Into<String>>(msg: S) -> Self {
        InsightError::Engine(msg.into())
    }

    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        InsightError::InvalidOperation(msg.into())
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        InsightError::InvalidArgument(msg.into())
    }

    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        InsightError::InvalidConfig(msg.into())
    }

    /// Returns true for failures reported by the engine.
    pub fn is_engine_failure(&self) -> bool {
        matches!(self, InsightError::Engine(_))
    }
}

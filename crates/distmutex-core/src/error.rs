//! Error types for distributed mutex operations.

use thiserror::Error;

/// Errors that can occur during lock operations.
#[derive(Error, Debug)]
pub enum LockError {
    /// The lock is held by a live (non-expired) owner.
    ///
    /// This is a control-flow signal, not a fault: callers branch on it and
    /// retry on their own schedule.
    #[error("already locked")]
    AlreadyLocked,

    /// Unlock found no live lock owned by the caller.
    ///
    /// Covers an absent record, an owner mismatch, and a lease that has
    /// already elapsed. Like [`LockError::AlreadyLocked`], this is expected
    /// control flow.
    #[error("not locked")]
    NotLocked,

    /// Transport or driver failure while executing a lock operation.
    ///
    /// Wraps the underlying fault together with the name of the failing
    /// operation. Never retried internally.
    #[error("backend error during {operation}: {source}")]
    Backend {
        /// The store operation that failed (e.g. `"redis SET"`).
        operation: &'static str,
        /// The underlying driver error, surfaced verbatim.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Schema creation or statement preparation failed during provider
    /// construction. The provider is not usable.
    #[error("initialization error: {0}")]
    Initialization(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LockError {
    /// Wraps a driver error with the name of the failing operation.
    pub fn backend(
        operation: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Backend {
            operation,
            source: source.into(),
        }
    }

    /// Wraps a construction-time failure.
    pub fn initialization(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Initialization(source.into())
    }

    /// Returns `true` for the expected control-flow outcomes
    /// (`AlreadyLocked` / `NotLocked`) as opposed to backend faults.
    pub fn is_contention(&self) -> bool {
        matches!(self, Self::AlreadyLocked | Self::NotLocked)
    }
}

/// Result type for lock operations.
pub type LockResult<T> = Result<T, LockError>;

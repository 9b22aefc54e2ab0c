//! Service error taxonomy.

use questlog_progression::EngineError;
use questlog_storage::StorageError;

/// Errors raised by the activity services.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Malformed input; the caller must correct it, retrying is useless.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced activity or user does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Stored data passed structural checks but violates a domain
    /// invariant (future timestamp, NaN gains, negative stored EXP).
    /// The operation was aborted before any mutation.
    #[error("inconsistent state: {0}")]
    Inconsistent(String),

    /// A repository call failed. When this surfaces from the reversal
    /// flow the user state has been restored; retrying the whole
    /// operation is safe.
    #[error("persistence failure: {0}")]
    Persistence(#[source] StorageError),

    /// A repository call failed and the rollback save failed too.
    /// No automatic recovery is attempted past this point.
    #[error("rollback failed; data may be inconsistent (cause: {cause}, rollback: {rollback})")]
    RollbackFailed {
        /// The failure that triggered the rollback
        cause: StorageError,
        /// The failure of the rollback save itself
        rollback: StorageError,
    },
}

impl TrackerError {
    /// Whether retrying the operation (with the same input) can help.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, TrackerError::RollbackFailed { .. })
    }
}

impl From<EngineError> for TrackerError {
    fn from(e: EngineError) -> Self {
        TrackerError::Validation(e.to_string())
    }
}

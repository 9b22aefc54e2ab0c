//! Engine error type.

/// Errors raised by the pure progression functions.
///
/// These always indicate malformed input; the caller must correct the
/// arguments, retrying is never useful.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// An argument violated a precondition (negative duration, negative
    /// EXP delta, level below 1, non-finite amount).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

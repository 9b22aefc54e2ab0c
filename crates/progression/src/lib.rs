//! Questlog progression engines.
//!
//! Pure computation only: EXP/level arithmetic, activity gain tables,
//! stat application/reversal/sanitization, and time-based degradation.
//! Nothing in this crate performs I/O or holds state; every function is
//! an explicit mapping from inputs to outputs so the services crate can
//! retain snapshots and roll back freely.

mod error;

pub mod degradation;
pub mod exp;
pub mod gains;
pub mod stats;

pub use error::EngineError;

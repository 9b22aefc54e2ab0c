//! Questlog persistence layer.
//!
//! Defines the repository traits the progression services depend on and
//! a JSON-file backend that implements them.

mod json_store;
mod trait_;

pub use json_store::JsonStore;
pub use trait_::{ActivityRepository, Result, StorageError, UserRepository};

//! Questlog core data models.
//!
//! This crate defines the value types shared by every other questlog
//! crate: the user profile, activity log entries, and the closed stat
//! and activity taxonomies.

#![warn(missing_docs)]

// Core identities
mod id;

// Stat and activity taxonomies
mod activity;
mod stat;

// User profile and log entries
mod entry;
mod user;

// Runtime configuration
mod settings;

// Re-exports
pub use id::ActivityId;

pub use stat::{StatType, STAT_FLOOR};
pub use activity::{ActivityType, Category};

pub use entry::ActivityLogEntry;
pub use user::User;

pub use settings::Settings;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;

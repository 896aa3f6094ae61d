#![forbid(unsafe_code)]

//! Core domain model and business logic for the Ironlog fitness tracker.
//!
//! This crate provides:
//! - Domain types (player stats, daily records, personal records)
//! - Key-value store backends (in-memory, file-backed)
//! - Progression engine (XP, levels, achievements)
//! - Streak calculation
//! - Backup export/import with deterministic merge

pub mod types;
pub mod error;
pub mod keys;
pub mod store;
pub mod config;
pub mod logging;
pub mod journal;
pub mod records;
pub mod achievements;
pub mod progression;
pub mod streak;
pub mod backup;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use config::Config;
pub use achievements::Achievement;
pub use progression::{calculate_level, xp_to_next_level, ProgressionEngine};
pub use streak::{calculate_streak, StreakCategory, StreakOptions};
pub use backup::{export_json, import_json, merge, BackupData, ImportMode};

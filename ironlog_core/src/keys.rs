//! Store key namespace.
//!
//! Daily records get one key per calendar date; everything else is a
//! single fixed key. The two index keys hold sorted date lists so that
//! exports can enumerate daily records without a store-level scan.

use chrono::NaiveDate;

/// Singleton player stats blob (badges included)
pub const PLAYER_STATS: &str = "player_stats";

/// Whole personal-records list
pub const PERSONAL_RECORDS: &str = "personal_records";

/// Sorted list of dates that have a workout record
pub const WORKOUT_INDEX: &str = "workout_index";

/// Sorted list of dates that have a diet record
pub const DIET_INDEX: &str = "diet_index";

/// Key for the workout record of one calendar date
pub fn workout_key(date: NaiveDate) -> String {
    format!("workout_{}", date.format("%Y-%m-%d"))
}

/// Key for the diet record of one calendar date
pub fn diet_key(date: NaiveDate) -> String {
    format!("diet_{}", date.format("%Y-%m-%d"))
}

//! Core domain types for the Ironlog system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Player stats and XP events (progression)
//! - Achievement rarity
//! - Daily workout and diet records
//! - Personal records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Progression Types
// ============================================================================

/// Cumulative player statistics, persisted as a single store value.
///
/// `current_level` and `xp_to_next_level` are derived from `total_xp` and are
/// recomputed on every load; the persisted copies are never trusted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub total_xp: u32,
    pub current_level: u32,
    pub xp_to_next_level: u32,
    pub total_workouts: u32,
    pub total_diet_days: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_prs: u32,
    pub badges: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            total_xp: 0,
            current_level: 1,
            xp_to_next_level: 100,
            total_workouts: 0,
            total_diet_days: 0,
            current_streak: 0,
            longest_streak: 0,
            total_prs: 0,
            badges: Vec::new(),
            last_updated: Utc::now(),
        }
    }
}

impl PlayerStats {
    /// Whether an achievement id has already been unlocked.
    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b == id)
    }
}

/// Kind of event that awards XP
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum XPEventKind {
    ExerciseComplete,
    WorkoutComplete,
    PrAchieved,
    StreakMilestone,
    DietPerfect,
    BadgeEarned,
    LevelUp,
}

/// A single XP award, returned to the caller for display.
///
/// Events are ephemeral: they are never persisted, only the resulting
/// `PlayerStats` is.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct XPEvent {
    pub kind: XPEventKind,
    pub xp: u32,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// Achievement rarity tiers
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn display_name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

// ============================================================================
// Daily Record Types
// ============================================================================

/// A single exercise within a workout day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub completed: bool,
}

/// The workout record for one calendar date.
///
/// At most one record exists per date; saving again for the same date
/// overwrites the previous record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDay {
    pub id: String,
    pub date: NaiveDate,
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl WorkoutDay {
    /// A workout day counts as active when at least one exercise was done.
    pub fn any_completed(&self) -> bool {
        self.exercises.iter().any(|ex| ex.completed)
    }
}

/// A single meal within a diet day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub completed: bool,
}

/// The diet record for one calendar date
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DietDay {
    pub id: String,
    pub date: NaiveDate,
    pub meals: Vec<Meal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DietDay {
    /// Fraction of meals completed, in `[0.0, 1.0]`.
    ///
    /// A day with no meals has compliance 0.0 (nothing was followed).
    pub fn compliance(&self) -> f64 {
        if self.meals.is_empty() {
            return 0.0;
        }
        let completed = self.meals.iter().filter(|m| m.completed).count();
        completed as f64 / self.meals.len() as f64
    }

    /// Every meal completed.
    pub fn is_perfect(&self) -> bool {
        !self.meals.is_empty() && self.meals.iter().all(|m| m.completed)
    }
}

// ============================================================================
// Personal Record Type
// ============================================================================

/// Best lift ever observed for one exercise name.
///
/// The stored weight is monotonically non-decreasing: a submission only
/// replaces the record when its weight is strictly greater.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    pub exercise_name: String,
    pub weight: f64,
    pub reps: u32,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(name: &str, completed: bool) -> Meal {
        Meal {
            id: format!("meal_{name}"),
            name: name.into(),
            calories: None,
            protein: None,
            carbs: None,
            fat: None,
            notes: None,
            completed,
        }
    }

    #[test]
    fn test_diet_compliance_fraction() {
        let day = DietDay {
            id: "d1".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            meals: vec![
                meal("breakfast", true),
                meal("lunch", true),
                meal("dinner", true),
                meal("snack", false),
            ],
            notes: None,
        };
        assert_eq!(day.compliance(), 0.75);
        assert!(!day.is_perfect());
    }

    #[test]
    fn test_empty_diet_day_is_not_compliant() {
        let day = DietDay {
            id: "d1".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            meals: vec![],
            notes: None,
        };
        assert_eq!(day.compliance(), 0.0);
        assert!(!day.is_perfect());
    }

    #[test]
    fn test_workout_any_completed() {
        let mut day = WorkoutDay {
            id: "w1".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            exercises: vec![Exercise {
                id: "e1".into(),
                name: "Squat".into(),
                sets: Some(5),
                reps: Some(5),
                weight: Some(100.0),
                notes: None,
                completed: false,
            }],
            notes: None,
            duration_minutes: None,
        };
        assert!(!day.any_completed());

        day.exercises[0].completed = true;
        assert!(day.any_completed());
    }

    #[test]
    fn test_workout_day_serde_roundtrip() {
        let day = WorkoutDay {
            id: "w1".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            exercises: vec![],
            notes: Some("deload".into()),
            duration_minutes: Some(45),
        };

        let json = serde_json::to_string(&day).unwrap();
        assert!(json.contains("\"2024-03-01\""));

        let parsed: WorkoutDay = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, day);
    }

    #[test]
    fn test_player_stats_defaults() {
        let stats = PlayerStats::default();
        assert_eq!(stats.total_xp, 0);
        assert_eq!(stats.current_level, 1);
        assert_eq!(stats.xp_to_next_level, 100);
        assert!(stats.badges.is_empty());
    }
}

//! Consecutive-day streak calculation.
//!
//! Walks backward from a caller-supplied "today" through daily records and
//! counts days until the first gap or non-compliant day. The scan is pure:
//! fixed records plus a fixed today always yield the same count.
//!
//! Today rule: a date with no record yet does not break the streak when it
//! is today itself - the scan skips to yesterday and counts from there. A
//! record that exists for today but fails its compliance check still ends
//! the streak at 0.

use crate::{journal, KeyValueStore};
use chrono::{Duration, NaiveDate};

/// Scan bound; nothing older than this many days back is ever inspected.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

/// A diet day counts when at least this fraction of meals was completed.
pub const DEFAULT_DIET_COMPLIANCE: f64 = 0.8;

/// Which daily records feed the streak
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreakCategory {
    /// Days with at least one completed exercise
    Workout,
    /// Days meeting the diet compliance threshold
    Diet,
    /// Days where either the workout or the diet condition holds
    Overall,
}

/// Tunable streak parameters
#[derive(Clone, Copy, Debug)]
pub struct StreakOptions {
    pub diet_compliance_threshold: f64,
    pub lookback_days: u32,
}

impl Default for StreakOptions {
    fn default() -> Self {
        Self {
            diet_compliance_threshold: DEFAULT_DIET_COMPLIANCE,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

/// Consecutive active days ending at (or just before) `today`.
pub fn calculate_streak<S: KeyValueStore>(
    store: &S,
    today: NaiveDate,
    category: StreakCategory,
    opts: &StreakOptions,
) -> u32 {
    let mut streak = 0;

    for offset in 0..=opts.lookback_days {
        let date = today - Duration::days(i64::from(offset));
        let day = inspect_day(store, date, category, opts);

        match day {
            DayStatus::Active => streak += 1,
            DayStatus::NoRecord if offset == 0 => {
                // Today not yet logged; start counting at yesterday.
                continue;
            }
            DayStatus::NoRecord | DayStatus::NotCompliant => break,
        }
    }

    tracing::debug!("{:?} streak ending {}: {} days", category, today, streak);
    streak
}

/// Workout streak with default options.
pub fn workout_streak<S: KeyValueStore>(store: &S, today: NaiveDate) -> u32 {
    calculate_streak(store, today, StreakCategory::Workout, &StreakOptions::default())
}

/// Diet streak with default options.
pub fn diet_streak<S: KeyValueStore>(store: &S, today: NaiveDate) -> u32 {
    calculate_streak(store, today, StreakCategory::Diet, &StreakOptions::default())
}

/// Combined streak: a day counts when workout OR diet qualifies.
pub fn overall_streak<S: KeyValueStore>(store: &S, today: NaiveDate) -> u32 {
    calculate_streak(store, today, StreakCategory::Overall, &StreakOptions::default())
}

enum DayStatus {
    Active,
    NotCompliant,
    NoRecord,
}

fn inspect_day<S: KeyValueStore>(
    store: &S,
    date: NaiveDate,
    category: StreakCategory,
    opts: &StreakOptions,
) -> DayStatus {
    // Corrupt per-day JSON reads as None, i.e. no record for that day.
    let workout = journal::workout_day(store, date);
    let diet = journal::diet_day(store, date);

    let (present, active) = match category {
        StreakCategory::Workout => (
            workout.is_some(),
            workout.as_ref().is_some_and(|w| w.any_completed()),
        ),
        StreakCategory::Diet => (
            diet.is_some(),
            diet.as_ref()
                .is_some_and(|d| d.compliance() >= opts.diet_compliance_threshold),
        ),
        StreakCategory::Overall => (
            workout.is_some() || diet.is_some(),
            workout.as_ref().is_some_and(|w| w.any_completed())
                || diet
                    .as_ref()
                    .is_some_and(|d| d.compliance() >= opts.diet_compliance_threshold),
        ),
    };

    if !present {
        DayStatus::NoRecord
    } else if active {
        DayStatus::Active
    } else {
        DayStatus::NotCompliant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{keys, DietDay, Exercise, MemoryStore, Meal, WorkoutDay};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn log_workout(store: &mut MemoryStore, d: u32, completed: bool) {
        let day = WorkoutDay {
            id: format!("w{d}"),
            date: date(d),
            exercises: vec![Exercise {
                id: "e1".into(),
                name: "Squat".into(),
                sets: None,
                reps: None,
                weight: None,
                notes: None,
                completed,
            }],
            notes: None,
            duration_minutes: None,
        };
        journal::save_workout_day(store, &day).unwrap();
    }

    fn log_diet(store: &mut MemoryStore, d: u32, completed: usize, total: usize) {
        let meals = (0..total)
            .map(|i| Meal {
                id: format!("m{i}"),
                name: format!("meal {i}"),
                calories: None,
                protein: None,
                carbs: None,
                fat: None,
                notes: None,
                completed: i < completed,
            })
            .collect();
        let day = DietDay {
            id: format!("d{d}"),
            date: date(d),
            meals,
            notes: None,
        };
        journal::save_diet_day(store, &day).unwrap();
    }

    #[test]
    fn test_three_day_streak_with_gap_on_day_four() {
        let mut store = MemoryStore::new();
        // today = 20th; 20, 19, 18 logged; 17 is a gap
        for d in [18, 19, 20] {
            log_workout(&mut store, d, true);
        }

        assert_eq!(workout_streak(&store, date(20)), 3);
    }

    #[test]
    fn test_no_records_means_zero() {
        let store = MemoryStore::new();
        assert_eq!(workout_streak(&store, date(20)), 0);
    }

    #[test]
    fn test_missing_today_starts_at_yesterday() {
        let mut store = MemoryStore::new();
        for d in [17, 18, 19] {
            log_workout(&mut store, d, true);
        }

        // Today (20th) has no record yet; the streak survives.
        assert_eq!(workout_streak(&store, date(20)), 3);
    }

    #[test]
    fn test_incomplete_today_breaks_streak() {
        let mut store = MemoryStore::new();
        log_workout(&mut store, 19, true);
        log_workout(&mut store, 20, false);

        assert_eq!(workout_streak(&store, date(20)), 0);
    }

    #[test]
    fn test_diet_streak_uses_compliance_threshold() {
        let mut store = MemoryStore::new();
        log_diet(&mut store, 20, 4, 5); // 0.8 -> counts
        log_diet(&mut store, 19, 3, 5); // 0.6 -> breaks

        assert_eq!(diet_streak(&store, date(20)), 1);
    }

    #[test]
    fn test_overall_streak_ors_both_categories() {
        let mut store = MemoryStore::new();
        log_workout(&mut store, 20, true); // workout only
        log_diet(&mut store, 19, 5, 5); // diet only
        log_workout(&mut store, 18, false);
        log_diet(&mut store, 18, 4, 5); // workout failed, diet carries the day

        assert_eq!(overall_streak(&store, date(20)), 3);
        assert_eq!(workout_streak(&store, date(20)), 1);
    }

    #[test]
    fn test_corrupt_day_stops_scan() {
        let mut store = MemoryStore::new();
        log_workout(&mut store, 20, true);
        store
            .set(&keys::workout_key(date(19)), "{ mangled")
            .unwrap();
        log_workout(&mut store, 18, true);

        assert_eq!(workout_streak(&store, date(20)), 1);
    }

    #[test]
    fn test_lookback_limit_bounds_the_scan() {
        let mut store = MemoryStore::new();
        for d in 1..=20 {
            log_workout(&mut store, d, true);
        }

        let opts = StreakOptions {
            lookback_days: 4,
            ..StreakOptions::default()
        };
        assert_eq!(
            calculate_streak(&store, date(20), StreakCategory::Workout, &opts),
            5 // offsets 0..=4
        );
    }

    #[test]
    fn test_streak_is_deterministic() {
        let mut store = MemoryStore::new();
        for d in [18, 19, 20] {
            log_workout(&mut store, d, true);
        }
        let first = overall_streak(&store, date(20));
        let second = overall_streak(&store, date(20));
        assert_eq!(first, second);
    }
}

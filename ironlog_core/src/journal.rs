//! Daily workout and diet record persistence.
//!
//! Each calendar date holds at most one workout record and one diet record;
//! saving again for the same date overwrites the previous value. A sorted
//! date index per category is maintained alongside the per-date keys so
//! exports can enumerate records deterministically.

use crate::{keys, DietDay, KeyValueStore, Result, WorkoutDay};
use chrono::NaiveDate;

/// Save (or overwrite) the workout record for its date.
pub fn save_workout_day<S: KeyValueStore>(store: &mut S, day: &WorkoutDay) -> Result<()> {
    let json = serde_json::to_string(day)?;
    store.set(&keys::workout_key(day.date), &json)?;
    add_to_index(store, keys::WORKOUT_INDEX, day.date)?;
    tracing::debug!("Saved workout record for {}", day.date);
    Ok(())
}

/// Load the workout record for a date.
///
/// Corrupt or missing payloads both read as `None`.
pub fn workout_day<S: KeyValueStore>(store: &S, date: NaiveDate) -> Option<WorkoutDay> {
    parse_day(store.get(&keys::workout_key(date)), "workout", date)
}

/// All stored workout records, sorted ascending by date.
pub fn workout_days<S: KeyValueStore>(store: &S) -> Vec<WorkoutDay> {
    load_index(store, keys::WORKOUT_INDEX)
        .into_iter()
        .filter_map(|date| workout_day(store, date))
        .collect()
}

/// Save (or overwrite) the diet record for its date.
pub fn save_diet_day<S: KeyValueStore>(store: &mut S, day: &DietDay) -> Result<()> {
    let json = serde_json::to_string(day)?;
    store.set(&keys::diet_key(day.date), &json)?;
    add_to_index(store, keys::DIET_INDEX, day.date)?;
    tracing::debug!("Saved diet record for {}", day.date);
    Ok(())
}

/// Load the diet record for a date.
pub fn diet_day<S: KeyValueStore>(store: &S, date: NaiveDate) -> Option<DietDay> {
    parse_day(store.get(&keys::diet_key(date)), "diet", date)
}

/// All stored diet records, sorted ascending by date.
pub fn diet_days<S: KeyValueStore>(store: &S) -> Vec<DietDay> {
    load_index(store, keys::DIET_INDEX)
        .into_iter()
        .filter_map(|date| diet_day(store, date))
        .collect()
}

/// Drop every stored workout record and replace with `days`.
///
/// Used by import; duplicate dates in the input keep the last entry.
pub fn replace_workouts<S: KeyValueStore>(store: &mut S, days: &[WorkoutDay]) -> Result<()> {
    for date in load_index(store, keys::WORKOUT_INDEX) {
        store.remove(&keys::workout_key(date))?;
    }
    store.remove(keys::WORKOUT_INDEX)?;
    for day in days {
        save_workout_day(store, day)?;
    }
    Ok(())
}

/// Drop every stored diet record and replace with `days`.
pub fn replace_diets<S: KeyValueStore>(store: &mut S, days: &[DietDay]) -> Result<()> {
    for date in load_index(store, keys::DIET_INDEX) {
        store.remove(&keys::diet_key(date))?;
    }
    store.remove(keys::DIET_INDEX)?;
    for day in days {
        save_diet_day(store, day)?;
    }
    Ok(())
}

fn parse_day<T: serde::de::DeserializeOwned>(
    raw: Option<String>,
    category: &str,
    date: NaiveDate,
) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str(&raw) {
        Ok(day) => Some(day),
        Err(e) => {
            tracing::warn!(
                "Corrupt {} record for {}: {}. Treating as absent.",
                category,
                date,
                e
            );
            None
        }
    }
}

fn load_index<S: KeyValueStore>(store: &S, index_key: &str) -> Vec<NaiveDate> {
    let Some(raw) = store.get(index_key) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<NaiveDate>>(&raw) {
        Ok(dates) => dates,
        Err(e) => {
            tracing::warn!("Corrupt date index {}: {}. Rebuilding empty.", index_key, e);
            Vec::new()
        }
    }
}

fn add_to_index<S: KeyValueStore>(store: &mut S, index_key: &str, date: NaiveDate) -> Result<()> {
    let mut dates = load_index(store, index_key);
    if !dates.contains(&date) {
        dates.push(date);
        dates.sort();
        store.set(index_key, &serde_json::to_string(&dates)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Exercise, MemoryStore};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn workout(d: u32, completed: bool) -> WorkoutDay {
        WorkoutDay {
            id: format!("w{d}"),
            date: date(d),
            exercises: vec![Exercise {
                id: "e1".into(),
                name: "Squat".into(),
                sets: Some(5),
                reps: Some(5),
                weight: None,
                notes: None,
                completed,
            }],
            notes: None,
            duration_minutes: None,
        }
    }

    #[test]
    fn test_save_and_load_workout_day() {
        let mut store = MemoryStore::new();
        save_workout_day(&mut store, &workout(5, true)).unwrap();

        let loaded = workout_day(&store, date(5)).unwrap();
        assert_eq!(loaded.id, "w5");
        assert!(loaded.any_completed());
        assert!(workout_day(&store, date(6)).is_none());
    }

    #[test]
    fn test_same_date_overwrites() {
        let mut store = MemoryStore::new();
        save_workout_day(&mut store, &workout(5, false)).unwrap();

        let mut second = workout(5, true);
        second.id = "w5b".into();
        save_workout_day(&mut store, &second).unwrap();

        let all = workout_days(&store);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "w5b");
    }

    #[test]
    fn test_workout_days_sorted_by_date() {
        let mut store = MemoryStore::new();
        save_workout_day(&mut store, &workout(9, true)).unwrap();
        save_workout_day(&mut store, &workout(2, true)).unwrap();
        save_workout_day(&mut store, &workout(5, true)).unwrap();

        let dates: Vec<_> = workout_days(&store).iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![date(2), date(5), date(9)]);
    }

    #[test]
    fn test_corrupt_record_reads_as_absent() {
        crate::logging::init_test();
        let mut store = MemoryStore::new();
        store
            .set(&keys::workout_key(date(5)), "{ not json")
            .unwrap();
        assert!(workout_day(&store, date(5)).is_none());
    }

    #[test]
    fn test_replace_workouts_drops_old_dates() {
        let mut store = MemoryStore::new();
        save_workout_day(&mut store, &workout(1, true)).unwrap();
        save_workout_day(&mut store, &workout(2, true)).unwrap();

        replace_workouts(&mut store, &[workout(8, true)]).unwrap();

        let all = workout_days(&store);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].date, date(8));
        assert!(store.get(&keys::workout_key(date(1))).is_none());
    }
}

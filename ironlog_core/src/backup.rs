//! Backup export, validation, merge, and import.
//!
//! The wire format is a JSON object with three arrays: `workouts`, `diets`,
//! and `records`, with all dates as `YYYY-MM-DD` strings. Import is
//! all-or-nothing: a payload that fails to parse or validate leaves the
//! store untouched.

use crate::{journal, records, DietDay, Error, KeyValueStore, PersonalRecord, Result, WorkoutDay};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Backup payload: the full exportable dataset.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BackupData {
    #[serde(default)]
    pub workouts: Vec<WorkoutDay>,
    #[serde(default)]
    pub diets: Vec<DietDay>,
    #[serde(default)]
    pub records: Vec<PersonalRecord>,
}

/// How an incoming backup interacts with existing data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportMode {
    /// Drop existing workouts/diets/records and take the payload wholesale
    Replace,
    /// Reconcile payload with existing data (existing = older, payload = newer)
    Merge,
}

/// Counts reported back after a successful import
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImportSummary {
    pub workouts: usize,
    pub diets: usize,
    pub records: usize,
}

/// Stored-data overview for display
#[derive(Clone, Copy, Debug)]
pub struct StorageSummary {
    pub workouts: usize,
    pub diets: usize,
    pub records: usize,
    pub backup_bytes: usize,
}

/// Snapshot the store into a backup payload, date-sorted.
pub fn export_data<S: KeyValueStore>(store: &S) -> BackupData {
    BackupData {
        workouts: journal::workout_days(store),
        diets: journal::diet_days(store),
        records: records::personal_records(store),
    }
}

/// Export as pretty-printed JSON, the on-disk backup format.
pub fn export_json<S: KeyValueStore>(store: &S) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export_data(store))?)
}

/// Counts plus serialized size of the current dataset.
pub fn storage_summary<S: KeyValueStore>(store: &S) -> StorageSummary {
    let data = export_data(store);
    let backup_bytes = serde_json::to_string_pretty(&data)
        .map(|s| s.len())
        .unwrap_or(0);
    StorageSummary {
        workouts: data.workouts.len(),
        diets: data.diets.len(),
        records: data.records.len(),
        backup_bytes,
    }
}

/// Shape-check a payload before anything is written.
pub fn validate(data: &BackupData) -> Result<()> {
    for day in &data.workouts {
        if day.id.trim().is_empty() {
            return Err(Error::Validation(format!(
                "workout for {} has an empty id",
                day.date
            )));
        }
    }
    for day in &data.diets {
        if day.id.trim().is_empty() {
            return Err(Error::Validation(format!(
                "diet record for {} has an empty id",
                day.date
            )));
        }
    }
    for record in &data.records {
        if record.exercise_name.trim().is_empty() {
            return Err(Error::Validation(
                "personal record with empty exercise name".into(),
            ));
        }
        if !record.weight.is_finite() || record.weight <= 0.0 {
            return Err(Error::Validation(format!(
                "personal record for {} has invalid weight {}",
                record.exercise_name, record.weight
            )));
        }
    }
    Ok(())
}

/// Deterministically reconcile two datasets.
///
/// Daily records: last-write-wins per date, `newer` beating `older`; the
/// result is date-sorted. Personal records: the strictly heavier entry per
/// exercise wins; on equal weight the entry from `newer` is kept.
/// `merge(a, a) == a` for any normalized dataset.
pub fn merge(older: &BackupData, newer: &BackupData) -> BackupData {
    let mut workouts: BTreeMap<NaiveDate, WorkoutDay> = BTreeMap::new();
    for day in older.workouts.iter().chain(newer.workouts.iter()) {
        workouts.insert(day.date, day.clone());
    }

    let mut diets: BTreeMap<NaiveDate, DietDay> = BTreeMap::new();
    for day in older.diets.iter().chain(newer.diets.iter()) {
        diets.insert(day.date, day.clone());
    }

    let mut prs: BTreeMap<String, PersonalRecord> = BTreeMap::new();
    for record in &older.records {
        prs.insert(record.exercise_name.clone(), record.clone());
    }
    for record in &newer.records {
        match prs.get(&record.exercise_name) {
            Some(existing) if record.weight < existing.weight => {}
            _ => {
                prs.insert(record.exercise_name.clone(), record.clone());
            }
        }
    }

    BackupData {
        workouts: workouts.into_values().collect(),
        diets: diets.into_values().collect(),
        records: prs.into_values().collect(),
    }
}

/// Parse, validate, and apply a backup payload.
///
/// Nothing is written until the whole payload has been accepted.
pub fn import_json<S: KeyValueStore>(
    store: &mut S,
    json: &str,
    mode: ImportMode,
) -> Result<ImportSummary> {
    let incoming: BackupData = serde_json::from_str(json)
        .map_err(|e| Error::Import(format!("malformed backup payload: {e}")))?;
    validate(&incoming)?;

    // Normalizing against an empty dataset dedupes dates (last entry wins)
    // and sorts, so Replace and Merge share one write path.
    let data = match mode {
        ImportMode::Replace => merge(&BackupData::default(), &incoming),
        ImportMode::Merge => merge(&export_data(store), &incoming),
    };

    journal::replace_workouts(store, &data.workouts)?;
    journal::replace_diets(store, &data.diets)?;
    records::replace_personal_records(store, &data.records)?;

    tracing::info!(
        "Imported backup ({:?}): {} workouts, {} diets, {} records",
        mode,
        data.workouts.len(),
        data.diets.len(),
        data.records.len()
    );

    Ok(ImportSummary {
        workouts: data.workouts.len(),
        diets: data.diets.len(),
        records: data.records.len(),
    })
}

/// Wipe every persisted key (full data reset).
pub fn reset<S: KeyValueStore>(store: &mut S) -> Result<()> {
    store.clear()?;
    tracing::info!("All persisted data cleared");
    Ok(())
}

//! Personal record tracking.
//!
//! One entry per exercise name; the stored weight only ever goes up.

use crate::{keys, Error, KeyValueStore, PersonalRecord, Result};

/// All stored personal records.
///
/// Corrupt or missing payloads read as an empty list.
pub fn personal_records<S: KeyValueStore>(store: &S) -> Vec<PersonalRecord> {
    let Some(raw) = store.get(keys::PERSONAL_RECORDS) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Corrupt personal records: {}. Treating as empty.", e);
            Vec::new()
        }
    }
}

/// Look up the record for one exercise name.
pub fn personal_record<S: KeyValueStore>(store: &S, exercise_name: &str) -> Option<PersonalRecord> {
    personal_records(store)
        .into_iter()
        .find(|r| r.exercise_name == exercise_name)
}

/// Submit a candidate record.
///
/// Returns `Ok(true)` when the candidate became the new best, `Ok(false)`
/// when an equal-or-heavier record already exists. Non-finite or
/// non-positive weights and empty names are rejected without touching the
/// store.
pub fn submit_personal_record<S: KeyValueStore>(
    store: &mut S,
    candidate: &PersonalRecord,
) -> Result<bool> {
    if candidate.exercise_name.trim().is_empty() {
        return Err(Error::Validation("exercise name must not be empty".into()));
    }
    if !candidate.weight.is_finite() || candidate.weight <= 0.0 {
        return Err(Error::Validation(format!(
            "weight must be a positive number, got {}",
            candidate.weight
        )));
    }

    let mut records = personal_records(store);
    match records
        .iter_mut()
        .find(|r| r.exercise_name == candidate.exercise_name)
    {
        Some(existing) => {
            if candidate.weight > existing.weight {
                tracing::info!(
                    "New PR for {}: {} -> {}",
                    candidate.exercise_name,
                    existing.weight,
                    candidate.weight
                );
                *existing = candidate.clone();
            } else {
                return Ok(false);
            }
        }
        None => {
            tracing::info!(
                "First PR for {}: {}",
                candidate.exercise_name,
                candidate.weight
            );
            records.push(candidate.clone());
        }
    }

    write_records(store, &records)?;
    Ok(true)
}

/// Replace the whole record list (import path).
pub fn replace_personal_records<S: KeyValueStore>(
    store: &mut S,
    records: &[PersonalRecord],
) -> Result<()> {
    write_records(store, records)
}

fn write_records<S: KeyValueStore>(store: &mut S, records: &[PersonalRecord]) -> Result<()> {
    store.set(keys::PERSONAL_RECORDS, &serde_json::to_string(records)?)
}

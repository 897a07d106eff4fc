use crate::errors::AppError;
use crate::models::MoodEntry;
use crate::validation::{check_range, check_scale, recheck_entry, SLEEP_RANGE};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{error, info, warn};

pub const STORAGE_KEY: &str = "moodTrackerEntries";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("malformed data file: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported schema version {0}")]
    UnsupportedVersion(u32),
}

#[derive(Serialize)]
struct PersistedRef<'a> {
    version: u32,
    #[serde(rename = "moodTrackerEntries")]
    entries: &'a [MoodEntry],
}

#[derive(Deserialize)]
struct Persisted {
    version: u32,
    #[serde(rename = "moodTrackerEntries", default)]
    entries: Vec<MoodEntry>,
}

/// Unversioned layout: a bare array whose ids may be numbers and whose
/// scale values were never checked for being whole.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyEntry {
    #[serde(default)]
    id: serde_json::Value,
    date: String,
    sleep: f64,
    stress: f64,
    symptoms: f64,
    mood: f64,
    engagement: f64,
    #[serde(default)]
    drug_names: String,
    #[serde(default)]
    notes: String,
}

pub fn new_entry_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn encode_blob(entries: &[MoodEntry]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(&PersistedRef {
        version: SCHEMA_VERSION,
        entries,
    })
}

pub fn decode_blob(bytes: &[u8]) -> Result<Vec<MoodEntry>, BlobError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    if value.is_array() {
        let legacy: Vec<LegacyEntry> = serde_json::from_value(value)?;
        info!(count = legacy.len(), "migrating unversioned {STORAGE_KEY} data");
        return Ok(migrate_legacy(legacy));
    }

    let data: Persisted = serde_json::from_value(value)?;
    if data.version != SCHEMA_VERSION {
        return Err(BlobError::UnsupportedVersion(data.version));
    }
    Ok(admit_rows(data.entries))
}

/// Every row read from disk goes through the same checks as a submission.
fn admit_rows(entries: Vec<MoodEntry>) -> Vec<MoodEntry> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let date = entry.date;
            let admitted = recheck_entry(entry);
            if admitted.is_none() {
                warn!(%date, "dropping stored entry that fails validation");
            }
            admitted
        })
        .collect()
}

fn migrate_legacy(legacy: Vec<LegacyEntry>) -> Vec<MoodEntry> {
    let migrated = legacy
        .into_iter()
        .filter_map(|entry| {
            let migrated = migrate_entry(&entry);
            if migrated.is_none() {
                warn!(date = %entry.date, "dropping legacy entry outside the current schema");
            }
            migrated
        })
        .collect();
    admit_rows(migrated)
}

fn migrate_entry(entry: &LegacyEntry) -> Option<MoodEntry> {
    let id = match &entry.id {
        serde_json::Value::String(id) if !id.is_empty() => id.clone(),
        serde_json::Value::Number(id) => id.to_string(),
        _ => new_entry_id(),
    };

    Some(MoodEntry {
        id,
        date: NaiveDate::parse_from_str(entry.date.trim(), "%Y-%m-%d").ok()?,
        sleep: check_range(entry.sleep, SLEEP_RANGE.0, SLEEP_RANGE.1)?,
        stress: check_scale(entry.stress)?,
        symptoms: check_scale(entry.symptoms)?,
        mood: check_scale(entry.mood)?,
        engagement: check_scale(entry.engagement)?,
        drug_names: entry.drug_names.clone(),
        notes: entry.notes.clone(),
    })
}

pub async fn load_data(path: &Path) -> Vec<MoodEntry> {
    match fs::read(path).await {
        Ok(bytes) => match decode_blob(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse data file: {err}");
                Vec::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(err) => {
            error!("failed to read data file: {err}");
            Vec::new()
        }
    }
}

pub async fn persist_data(path: &Path, entries: &[MoodEntry]) -> Result<(), AppError> {
    let payload = encode_blob(entries).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(|err| {
        error!("failed to write data file: {err}");
        AppError::internal(err)
    })?;
    Ok(())
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name -> human readable message, one per failing field.
pub type FieldErrors = BTreeMap<String, String>;

/// One daily record. The date is the natural key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub date: NaiveDate,
    pub sleep: f64,
    pub stress: u8,
    pub symptoms: u8,
    pub mood: u8,
    pub engagement: u8,
    pub drug_names: String,
    pub notes: String,
}

/// Raw, unvalidated input as typed into the entry form or posted to the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryForm {
    pub date: String,
    pub sleep: String,
    pub stress: String,
    pub symptoms: String,
    pub mood: String,
    pub engagement: String,
    pub drug_names: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub label: String,
    pub mood: u8,
    pub stress: u8,
    pub engagement: u8,
    pub sleep: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugStat {
    pub name: String,
    pub count: u32,
    pub total_mood: u32,
    pub avg_mood: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub avg_mood: f64,
    pub avg_sleep: f64,
    pub avg_stress: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub recent: Vec<SeriesPoint>,
    pub drugs: Vec<DrugStat>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub entry_count: usize,
    pub summary: Option<Summary>,
    pub drugs: Vec<DrugStat>,
}

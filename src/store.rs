use crate::models::MoodEntry;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Entries keyed by date, newest first.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<MoodEntry>,
}

impl EntryStore {
    /// Builds a store from loaded entries. When a date appears more than once
    /// the later occurrence wins.
    pub fn from_entries(entries: Vec<MoodEntry>) -> Self {
        let by_date: BTreeMap<NaiveDate, MoodEntry> =
            entries.into_iter().map(|entry| (entry.date, entry)).collect();
        Self {
            entries: by_date.into_values().rev().collect(),
        }
    }

    /// Replaces any entry on the same date, then restores date-descending order.
    pub fn upsert(&mut self, entry: MoodEntry) -> Option<MoodEntry> {
        let replaced = self
            .entries
            .iter()
            .position(|existing| existing.date == entry.date)
            .map(|index| self.entries.remove(index));

        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.date.cmp(&a.date));
        replaced
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn get(&self, date: NaiveDate) -> Option<&MoodEntry> {
        self.entries.iter().find(|entry| entry.date == date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn sample_entry(date: &str, mood: u8, drugs: &str) -> MoodEntry {
    MoodEntry {
        id: format!("id-{date}"),
        date: date.parse().unwrap(),
        sleep: 7.0,
        stress: 3,
        symptoms: 2,
        mood,
        engagement: 5,
        drug_names: drugs.to_string(),
        notes: "steady day overall".to_string(),
    }
}

use crate::models::{DrugStat, MoodEntry, ReportResponse, SeriesPoint, StatsResponse, Summary};
use std::collections::BTreeMap;

pub const RECENT_WINDOW: usize = 30;

pub fn build_stats(entries: &[MoodEntry]) -> StatsResponse {
    StatsResponse {
        recent: recent_series(entries),
        drugs: drug_stats(entries),
    }
}

pub fn build_report(entries: &[MoodEntry]) -> ReportResponse {
    ReportResponse {
        entry_count: entries.len(),
        summary: summarize(entries),
        drugs: drug_stats(entries),
    }
}

/// The most recent entries, oldest first. Expects `entries` newest first, as
/// the store keeps them.
pub fn recent_window(entries: &[MoodEntry]) -> Vec<&MoodEntry> {
    let mut window: Vec<&MoodEntry> = entries.iter().take(RECENT_WINDOW).collect();
    window.reverse();
    window
}

pub fn recent_series(entries: &[MoodEntry]) -> Vec<SeriesPoint> {
    recent_window(entries)
        .into_iter()
        .map(|entry| SeriesPoint {
            date: entry.date,
            label: entry.date.format("%b %-d").to_string(),
            mood: entry.mood,
            stress: entry.stress,
            engagement: entry.engagement,
            sleep: entry.sleep,
        })
        .collect()
}

pub fn drug_names(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
}

/// Mood per drug over every entry, best average first.
pub fn drug_stats(entries: &[MoodEntry]) -> Vec<DrugStat> {
    let mut totals: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    for entry in entries {
        for name in drug_names(&entry.drug_names) {
            let (count, total_mood) = totals.entry(name).or_default();
            *count += 1;
            *total_mood += u32::from(entry.mood);
        }
    }

    let mut stats: Vec<DrugStat> = totals
        .into_iter()
        .map(|(name, (count, total_mood))| DrugStat {
            name,
            count,
            total_mood,
            avg_mood: f64::from(total_mood) / f64::from(count),
        })
        .collect();
    stats.sort_by(|a, b| {
        b.avg_mood
            .total_cmp(&a.avg_mood)
            .then_with(|| a.name.cmp(&b.name))
    });
    stats
}

pub fn summarize(entries: &[MoodEntry]) -> Option<Summary> {
    if entries.is_empty() {
        return None;
    }

    let count = entries.len() as f64;
    let mean = |value: fn(&MoodEntry) -> f64| {
        round_tenth(entries.iter().map(value).sum::<f64>() / count)
    };

    Some(Summary {
        avg_mood: mean(|entry| f64::from(entry.mood)),
        avg_sleep: mean(|entry| entry.sleep),
        avg_stress: mean(|entry| f64::from(entry.stress)),
    })
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{sample_entry, EntryStore};
    use chrono::{Duration, NaiveDate};

    fn store_of(entries: Vec<MoodEntry>) -> EntryStore {
        EntryStore::from_entries(entries)
    }

    #[test]
    fn drug_names_merge_case_insensitively() {
        let entries = vec![
            sample_entry("2026-10-02", 8, "caffeine"),
            sample_entry("2026-10-01", 4, "Caffeine, vitamin d"),
        ];
        let stats = drug_stats(&entries);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "caffeine");
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].total_mood, 12);
        assert_eq!(stats[0].avg_mood, 6.0);
        assert_eq!(stats[1].name, "vitamin d");
        assert_eq!(stats[1].count, 1);
        assert_eq!(stats[1].avg_mood, 4.0);
    }

    #[test]
    fn repeated_drug_in_one_entry_counts_twice() {
        let entries = vec![sample_entry("2026-10-02", 6, "tea, Tea, , ")];
        let stats = drug_stats(&entries);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].count, 2);
        assert_eq!(stats[0].total_mood, 12);
    }

    #[test]
    fn drug_table_orders_by_average_then_name() {
        let entries = vec![
            sample_entry("2026-10-03", 3, "b"),
            sample_entry("2026-10-02", 9, "c, a"),
            sample_entry("2026-10-01", 9, ""),
        ];
        let names: Vec<String> = drug_stats(&entries).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["a", "c", "b"]);
    }

    #[test]
    fn window_takes_latest_thirty_oldest_first() {
        let first = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let entries = (0..45)
            .map(|offset| {
                let date = (first + Duration::days(offset)).to_string();
                sample_entry(&date, 5, "")
            })
            .collect();
        let store = store_of(entries);

        let series = recent_series(store.entries());
        assert_eq!(series.len(), RECENT_WINDOW);
        assert_eq!(series[0].date, first + Duration::days(15));
        assert_eq!(series[29].date, first + Duration::days(44));
        assert!(series.windows(2).all(|pair| pair[0].date < pair[1].date));
        assert_eq!(series[29].label, "Sep 14");
    }

    #[test]
    fn window_shorter_than_thirty_keeps_everything() {
        let store = store_of(vec![
            sample_entry("2026-10-02", 8, ""),
            sample_entry("2026-10-01", 4, ""),
        ]);
        let series = recent_series(store.entries());
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].mood, 4);
        assert_eq!(series[1].mood, 8);
        assert_eq!(series[0].label, "Oct 1");
    }

    #[test]
    fn summary_covers_whole_collection_rounded() {
        let mut entries: Vec<MoodEntry> = (1..=40)
            .map(|day| {
                let date = (NaiveDate::from_ymd_opt(2026, 8, 1).unwrap() + Duration::days(day)).to_string();
                sample_entry(&date, 5, "")
            })
            .collect();
        entries[0].mood = 10;
        entries[1].mood = 9;
        entries[1].sleep = 8.0;

        let summary = summarize(&entries).unwrap();
        // 209 / 40 = 5.225
        assert_eq!(summary.avg_mood, 5.2);
        // 281 / 40 = 7.025
        assert_eq!(summary.avg_sleep, 7.0);
        assert_eq!(summary.avg_stress, 3.0);
    }

    #[test]
    fn empty_collection_has_no_summary() {
        assert!(summarize(&[]).is_none());
        let report = build_report(&[]);
        assert_eq!(report.entry_count, 0);
        assert!(report.summary.is_none());
        assert!(report.drugs.is_empty());
        assert!(build_stats(&[]).recent.is_empty());
    }
}

use crate::models::{EntryForm, FieldErrors, MoodEntry};
use chrono::{Days, NaiveDate};

pub const MAX_TEXT_LEN: usize = 500;
pub const MIN_NOTES_LEN: usize = 10;
pub const SLEEP_RANGE: (f64, f64) = (0.0, 24.0);
pub const SCALE_RANGE: (f64, f64) = (1.0, 10.0);

const DISALLOWED: [char; 10] = ['<', '>', '"', '\'', '/', ';', '(', ')', '&', '+'];

pub const DATE_WINDOW_DAYS: u64 = 365;

/// Parses a `YYYY-MM-DD` date and accepts it only when it falls within the
/// last 365 days, both ends included.
pub fn validate_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()?;
    let earliest = today.checked_sub_days(Days::new(DATE_WINDOW_DAYS)).unwrap_or(NaiveDate::MIN);
    (earliest..=today).contains(&date).then_some(date)
}

pub fn validate_number(input: &str, min: f64, max: f64) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    check_range(value, min, max)
}

pub fn check_range(value: f64, min: f64, max: f64) -> Option<f64> {
    (value.is_finite() && (min..=max).contains(&value)).then_some(value)
}

/// A whole number on the 1-10 scale used by stress, symptoms, mood and engagement.
pub fn check_scale(value: f64) -> Option<u8> {
    let value = check_range(value, SCALE_RANGE.0, SCALE_RANGE.1)?;
    (value.fract() == 0.0).then_some(value as u8)
}

pub fn validate_scale(input: &str) -> Option<u8> {
    let value: f64 = input.trim().parse().ok()?;
    check_scale(value)
}

pub fn sanitize_string(input: &str) -> String {
    let stripped: String = input.chars().filter(|c| !DISALLOWED.contains(c)).collect();
    stripped.trim().chars().take(MAX_TEXT_LEN).collect()
}

/// Holds an already-typed entry (one read back from disk) to the same rules a
/// submission passes: numbers in range, text sanitized, notes long enough.
pub fn recheck_entry(mut entry: MoodEntry) -> Option<MoodEntry> {
    check_range(entry.sleep, SLEEP_RANGE.0, SLEEP_RANGE.1)?;
    for value in [entry.stress, entry.symptoms, entry.mood, entry.engagement] {
        check_scale(f64::from(value))?;
    }
    entry.drug_names = sanitize_string(&entry.drug_names);
    entry.notes = sanitize_string(&entry.notes);
    if entry.notes.chars().count() < MIN_NOTES_LEN {
        return None;
    }
    Some(entry)
}

/// Checks every field of a submission and either builds the entry or reports
/// all failing fields at once.
pub fn validate_form(form: &EntryForm, id: String, today: NaiveDate) -> Result<MoodEntry, FieldErrors> {
    let mut errors = FieldErrors::new();

    let date = validate_date(&form.date, today);
    if date.is_none() {
        errors.insert(
            "date".to_string(),
            "Date must be a valid date within the past year".to_string(),
        );
    }

    let sleep = validate_number(&form.sleep, SLEEP_RANGE.0, SLEEP_RANGE.1);
    if sleep.is_none() {
        errors.insert(
            "sleep".to_string(),
            "Sleep must be a number of hours between 0 and 24".to_string(),
        );
    }

    let mut scale = |field: &str, label: &str, raw: &str| {
        let value = validate_scale(raw);
        if value.is_none() {
            errors.insert(
                field.to_string(),
                format!("{label} must be a whole number between 1 and 10"),
            );
        }
        value
    };
    let stress = scale("stress", "Stress", &form.stress);
    let symptoms = scale("symptoms", "Symptoms", &form.symptoms);
    let mood = scale("mood", "Mood", &form.mood);
    let engagement = scale("engagement", "Engagement", &form.engagement);

    let drug_names = sanitize_string(&form.drug_names);
    let notes = sanitize_string(&form.notes);
    if notes.chars().count() < MIN_NOTES_LEN {
        errors.insert(
            "notes".to_string(),
            format!("Notes must be at least {MIN_NOTES_LEN} characters"),
        );
    }

    match (date, sleep, stress, symptoms, mood, engagement) {
        (Some(date), Some(sleep), Some(stress), Some(symptoms), Some(mood), Some(engagement))
            if errors.is_empty() =>
        {
            Ok(MoodEntry {
                id,
                date,
                sleep,
                stress,
                symptoms,
                mood,
                engagement,
                drug_names,
                notes,
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn valid_form() -> EntryForm {
        EntryForm {
            date: "2026-10-17".into(),
            sleep: "7.5".into(),
            stress: "4".into(),
            symptoms: "2".into(),
            mood: "7".into(),
            engagement: "6".into(),
            drug_names: "Caffeine, vitamin d".into(),
            notes: "Slept fine, long walk.".into(),
        }
    }

    #[test]
    fn date_window_is_inclusive_on_both_ends() {
        let today = today();
        assert_eq!(validate_date("2026-10-18", today), Some(today));
        assert_eq!(
            validate_date("2025-10-18", today),
            NaiveDate::from_ymd_opt(2025, 10, 18)
        );
        assert_eq!(validate_date("2025-10-17", today), None);
        assert_eq!(validate_date("2026-10-19", today), None);
    }

    #[test]
    fn date_rejects_impossible_and_garbled_input() {
        assert_eq!(validate_date("2026-02-30", today()), None);
        assert_eq!(validate_date("yesterday", today()), None);
        assert_eq!(validate_date("", today()), None);
        assert!(validate_date(" 2026-10-01 ", today()).is_some());
    }

    #[test]
    fn window_is_365_days_across_a_leap_day() {
        let today = NaiveDate::from_ymd_opt(2028, 2, 29).unwrap();
        assert!(validate_date("2027-03-01", today).is_some());
        assert!(validate_date("2027-02-28", today).is_none());

        let today = NaiveDate::from_ymd_opt(2028, 3, 1).unwrap();
        assert!(validate_date("2027-03-02", today).is_some());
        assert!(validate_date("2027-03-01", today).is_none());
    }

    #[test]
    fn sleep_bounds() {
        assert_eq!(validate_number("0", 0.0, 24.0), Some(0.0));
        assert_eq!(validate_number("24", 0.0, 24.0), Some(24.0));
        assert_eq!(validate_number("7.25", 0.0, 24.0), Some(7.25));
        assert_eq!(validate_number("24.1", 0.0, 24.0), None);
        assert_eq!(validate_number("-0.5", 0.0, 24.0), None);
        assert_eq!(validate_number("NaN", 0.0, 24.0), None);
        assert_eq!(validate_number("inf", 0.0, 24.0), None);
        assert_eq!(validate_number("seven", 0.0, 24.0), None);
    }

    #[test]
    fn scale_requires_whole_numbers_in_range() {
        assert_eq!(validate_scale("1"), Some(1));
        assert_eq!(validate_scale("10"), Some(10));
        assert_eq!(validate_scale("10.0"), Some(10));
        assert_eq!(validate_scale("5.5"), None);
        assert_eq!(validate_scale("0"), None);
        assert_eq!(validate_scale("11"), None);
    }

    #[test]
    fn sanitize_strips_disallowed_characters() {
        assert_eq!(
            sanitize_string("  <b>\"tea\"</b>; (x) & y + 'z'  "),
            "bteab x  y  z"
        );
        let cleaned = sanitize_string("a<>\"'/;()&+b");
        assert_eq!(cleaned, "ab");
    }

    #[test]
    fn sanitize_caps_length() {
        let long = "x".repeat(MAX_TEXT_LEN + 50);
        assert_eq!(sanitize_string(&long).chars().count(), MAX_TEXT_LEN);
        let multibyte = "é".repeat(MAX_TEXT_LEN + 1);
        assert_eq!(sanitize_string(&multibyte).chars().count(), MAX_TEXT_LEN);
    }

    #[test]
    fn valid_form_builds_sanitized_entry() {
        let form = EntryForm {
            drug_names: "Caffeine (200mg); vitamin d+".into(),
            notes: "<b>Slept \"fine\"</b> & a long walk/run.".into(),
            ..valid_form()
        };
        let entry = validate_form(&form, "id-1".into(), today()).unwrap();
        assert_eq!(entry.id, "id-1");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        assert_eq!(entry.sleep, 7.5);
        assert_eq!(entry.mood, 7);
        assert_eq!(entry.drug_names, "Caffeine 200mg vitamin d");
        assert_eq!(entry.notes, "bSlept fineb  a long walkrun.");
    }

    #[test]
    fn recheck_sanitizes_loaded_text() {
        let mut entry = crate::store::sample_entry("2026-10-01", 6, "tea; <i>honey</i>");
        entry.notes = "  \"quiet\" evening (home)  ".into();
        let entry = recheck_entry(entry).unwrap();
        assert_eq!(entry.drug_names, "tea ihoneyi");
        assert_eq!(entry.notes, "quiet evening home");
    }

    #[test]
    fn recheck_drops_out_of_domain_rows() {
        let sample = || crate::store::sample_entry("2026-10-01", 6, "");
        assert!(recheck_entry(sample()).is_some());
        assert!(recheck_entry(MoodEntry { sleep: 99.0, ..sample() }).is_none());
        assert!(recheck_entry(MoodEntry { stress: 200, ..sample() }).is_none());
        assert!(recheck_entry(MoodEntry { mood: 0, ..sample() }).is_none());
        assert!(recheck_entry(MoodEntry { engagement: 55, ..sample() }).is_none());
        assert!(recheck_entry(MoodEntry { notes: "<<>>;;()&&++".into(), ..sample() }).is_none());
    }

    #[test]
    fn short_notes_are_rejected() {
        let form = EntryForm {
            notes: "123456789".into(),
            ..valid_form()
        };
        let errors = validate_form(&form, "id".into(), today()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("notes"));
    }

    #[test]
    fn notes_length_is_measured_after_sanitizing() {
        let form = EntryForm {
            notes: "<<<<<>>>>>".into(),
            ..valid_form()
        };
        let errors = validate_form(&form, "id".into(), today()).unwrap_err();
        assert!(errors.contains_key("notes"));
    }

    #[test]
    fn every_failing_field_is_reported() {
        let form = EntryForm {
            date: "2020-01-01".into(),
            sleep: "30".into(),
            mood: "11".into(),
            engagement: "".into(),
            notes: "short".into(),
            ..valid_form()
        };
        let errors = validate_form(&form, "id".into(), today()).unwrap_err();
        let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["date", "engagement", "mood", "notes", "sleep"]);
    }
}

//! Picking a single day out of a monthly schedule.

use chrono::{Datelike, NaiveDate};
use waktu_solat_types::{MonthlyPrayerSchedule, PrayerDay};

/// Finds the entry for `date` in `schedule`.
///
/// Matches the ISO `YYYY-MM-DD` string first. When no entry carries that
/// date, falls back to [`matches_day_number`].
pub fn find_day(schedule: &MonthlyPrayerSchedule, date: NaiveDate) -> Option<&PrayerDay> {
    let iso = date.format("%Y-%m-%d").to_string();
    schedule
        .iter()
        .find(|day| day.gregorian_date() == Some(iso.as_str()))
        .or_else(|| schedule.iter().find(|day| matches_day_number(day, date)))
}

/// Compares the wire `day` field with the day of the month of `date`.
///
/// The API documents `day` as the day of the week, so this can pick the wrong
/// entry. It is kept as-is for compatibility with existing callers.
pub fn matches_day_number(day: &PrayerDay, date: NaiveDate) -> bool {
    day.day_of_week() == i64::from(date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: Option<&str>, day_number: i64, fajr: i64) -> PrayerDay {
        let builder = PrayerDay::builder("1446-09-01", day_number).fajr(fajr);
        match date {
            Some(d) => builder.gregorian_date(d).build().unwrap(),
            None => builder.build().unwrap(),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_matches_by_date_string_first() {
        // Second entry has day == 2 but the third carries the actual date.
        let schedule = MonthlyPrayerSchedule::new(
            "sgr01",
            None,
            vec![
                day(Some("2025-03-01"), 6, 1),
                day(Some("2025-03-03"), 2, 2),
                day(Some("2025-03-02"), 0, 3),
            ],
        );
        let found = find_day(&schedule, ymd(2025, 3, 2)).unwrap();
        assert_eq!(found.fajr(), Some(3));
    }

    #[test]
    fn test_falls_back_to_day_number() {
        let schedule = MonthlyPrayerSchedule::new(
            "sgr01",
            None,
            vec![day(None, 1, 10), day(None, 2, 20), day(None, 3, 30)],
        );
        assert_eq!(find_day(&schedule, ymd(2025, 3, 2)).and_then(|d| d.fajr()), Some(20));
    }

    #[test]
    fn test_fallback_used_when_dates_mismatch() {
        let schedule = MonthlyPrayerSchedule::new(
            "sgr01",
            None,
            vec![day(Some("2025-04-01"), 15, 1)],
        );
        assert!(find_day(&schedule, ymd(2025, 3, 15)).is_some());
    }

    #[test]
    fn test_absent_when_nothing_matches() {
        let schedule = MonthlyPrayerSchedule::new("sgr01", None, vec![day(Some("2025-03-01"), 6, 1)]);
        assert!(find_day(&schedule, ymd(2025, 3, 20)).is_none());
        assert!(find_day(&MonthlyPrayerSchedule::new("sgr01", None, vec![]), ymd(2025, 3, 1)).is_none());
    }
}

use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::{json, Value};
use waktu_solat::find_day;
use waktu_solat::types::FromJson;
use waktu_solat::prelude::*;

fn base_day() -> Value {
    json!({ "hijri": "1446-09-01", "date": "2025-03-01", "day": 6 })
}

proptest! {
    /// Invariant: without imsak, imsak is exactly 10 minutes before fajr.
    #[test]
    fn imsak_derived_from_fajr(fajr in -4_000_000_000i64..4_000_000_000) {
        let mut v = base_day();
        v["fajr"] = json!(fajr);
        let day = PrayerDay::from_json(&v).unwrap();
        prop_assert_eq!(day.imsak(), Some(fajr - 600));
    }

    /// Invariant: a supplied imsak is kept verbatim.
    #[test]
    fn supplied_imsak_wins(fajr in 0i64..4_000_000_000, imsak in 0i64..4_000_000_000) {
        let mut v = base_day();
        v["fajr"] = json!(fajr);
        v["imsak"] = json!(imsak);
        let day = PrayerDay::from_json(&v).unwrap();
        prop_assert_eq!(day.imsak(), Some(imsak));
    }

    /// Invariant: isyraq is always syuruk + 15 minutes, whatever else is present.
    #[test]
    fn isyraq_derived_from_syuruk(
        syuruk in 0i64..4_000_000_000,
        imsak in proptest::option::of(0i64..4_000_000_000),
        fajr in proptest::option::of(0i64..4_000_000_000),
    ) {
        let mut v = base_day();
        v["syuruk"] = json!(syuruk);
        if let Some(imsak) = imsak {
            v["imsak"] = json!(imsak);
        }
        if let Some(fajr) = fajr {
            v["fajr"] = json!(fajr);
        }
        let day = PrayerDay::from_json(&v).unwrap();
        prop_assert_eq!(day.isyraq(), Some(syuruk + 900));
    }

    /// Invariant: digit-only strings decode to their base-10 value.
    #[test]
    fn numeric_strings_decode(ts in 0i64..4_000_000_000_000) {
        let mut v = base_day();
        for field in ["imsak", "fajr", "syuruk", "dhuhr", "asr", "maghrib", "isha"] {
            v[field] = json!(ts.to_string());
        }
        let day = PrayerDay::from_json(&v).unwrap();
        prop_assert_eq!(day.fajr(), Some(ts));
        prop_assert_eq!(day.isha(), Some(ts));
        prop_assert_eq!(day.imsak(), Some(ts));
    }

    /// Invariant: a number with no fractional part decodes like the integer it holds.
    #[test]
    fn whole_floats_decode(ts in -4_000_000_000i64..4_000_000_000) {
        let mut v = base_day();
        v["fajr"] = json!(ts as f64);
        let day = PrayerDay::from_json(&v).unwrap();
        prop_assert_eq!(day.fajr(), Some(ts));
    }

    /// Invariant: timestamps near the i64 edges fail to decode instead of wrapping.
    #[test]
    fn edge_timestamps_never_wrap(offset in 0i64..600) {
        let mut v = base_day();
        v["fajr"] = json!(i64::MIN + offset);
        prop_assert!(PrayerDay::from_json(&v).is_err());

        let mut v = base_day();
        v["syuruk"] = json!(i64::MAX - offset);
        prop_assert!(PrayerDay::from_json(&v).is_err());
    }

    /// Invariant: strings that are not integers are rejected, never defaulted.
    #[test]
    fn non_numeric_strings_rejected(s in "[a-zA-Z:. ]{1,12}") {
        let mut v = base_day();
        v["dhuhr"] = json!(s);
        prop_assert!(PrayerDay::from_json(&v).is_err());
    }

    /// Invariant: decoding keeps the day count and the first date of the payload.
    #[test]
    fn schedule_keeps_count_and_order(count in 1usize..31) {
        let prayers: Vec<Value> = (1..=count)
            .map(|d| json!({
                "hijri": format!("1446-09-{:02}", d),
                "date": format!("2025-03-{:02}", d),
                "day": (d % 7) as i64,
                "fajr": 1425480480i64 + (d as i64) * 86_400
            }))
            .collect();
        let payload = json!({ "zone": "sgr01", "origin": "JAKIM", "prayers": prayers });

        let schedule = MonthlyPrayerSchedule::from_json(&payload).unwrap();
        prop_assert_eq!(schedule.len(), count);
        prop_assert_eq!(schedule.days()[0].gregorian_date(), Some("2025-03-01"));

        let encoded = serde_json::to_value(&schedule).unwrap();
        prop_assert_eq!(encoded["prayers"].as_array().map(Vec::len), Some(count));
        prop_assert_eq!(&encoded["prayers"][0]["date"], &payload["prayers"][0]["date"]);
    }

    /// Invariant: a date present in the schedule is always found by its date string.
    #[test]
    fn lookup_finds_listed_dates(day_of_month in 1u32..=28) {
        let prayers: Vec<Value> = (1..=28u32)
            .map(|d| json!({
                "hijri": "1446-09-01",
                "date": format!("2025-02-{:02}", d),
                // Day numbers that would mislead the day-number fallback.
                "day": ((d + 3) % 28) as i64
            }))
            .collect();
        let schedule = MonthlyPrayerSchedule::from_json(&json!({ "zone": "sgr01", "prayers": prayers })).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 2, day_of_month).unwrap();

        let found = find_day(&schedule, date).unwrap();
        prop_assert_eq!(found.date(), Some(date));
    }
}

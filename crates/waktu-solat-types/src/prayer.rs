//! Prayer-time records: a single day and a zone's monthly schedule.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::decode::{
    decode_elements, expect_object, flexible_int, impl_try_from_value, optional_str, required_int,
    required_str, DecodeError, FromJson,
};

/// Seconds subtracted from Fajr when the API omits Imsak.
pub const IMSAK_OFFSET_SECS: i64 = 10 * 60;
/// Seconds added to Syuruk to obtain Isyraq.
pub const ISYRAQ_OFFSET_SECS: i64 = 15 * 60;

/// The times carried by a [`PrayerDay`], in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prayer {
    /// Start of fasting, shortly before Fajr.
    Imsak,
    Fajr,
    /// Sunrise.
    Syuruk,
    /// Post-sunrise marker, 15 minutes after Syuruk.
    Isyraq,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 8] = [
        Prayer::Imsak,
        Prayer::Fajr,
        Prayer::Syuruk,
        Prayer::Isyraq,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Key used for this time in API payloads.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Prayer::Imsak => "imsak",
            Prayer::Fajr => "fajr",
            Prayer::Syuruk => "syuruk",
            Prayer::Isyraq => "isyraq",
            Prayer::Dhuhr => "dhuhr",
            Prayer::Asr => "asr",
            Prayer::Maghrib => "maghrib",
            Prayer::Isha => "isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Prayer::Imsak => "Imsak",
            Prayer::Fajr => "Subuh (Fajr)",
            Prayer::Syuruk => "Syuruk (Sunrise)",
            Prayer::Isyraq => "Isyraq",
            Prayer::Dhuhr => "Zohor (Dhuhr)",
            Prayer::Asr => "Asar (Asr)",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isyak (Isha)",
        };
        write!(f, "{}", s)
    }
}

/// Prayer times for a single day.
///
/// Timestamps are seconds since the Unix epoch. `imsak` and `isyraq` are
/// settled once, when the record is built:
/// - `imsak` keeps the supplied value, or falls back to `fajr - 10 min`;
/// - `isyraq` is always `syuruk + 15 min` and is never read from input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct PrayerDay {
    #[serde(rename = "hijri")]
    hijri_date: String,
    #[serde(rename = "date", skip_serializing_if = "Option::is_none")]
    gregorian_date: Option<String>,
    #[serde(rename = "day")]
    day_of_week: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    imsak: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fajr: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    syuruk: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dhuhr: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    asr: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maghrib: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    isha: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    isyraq: Option<i64>,
}

impl PrayerDay {
    /// Starts building a day by hand. Derived times are filled in by
    /// [`PrayerDayBuilder::build`].
    pub fn builder(hijri_date: impl Into<String>, day_of_week: i64) -> PrayerDayBuilder {
        PrayerDayBuilder {
            hijri_date: hijri_date.into(),
            day_of_week,
            gregorian_date: None,
            imsak: None,
            fajr: None,
            syuruk: None,
            dhuhr: None,
            asr: None,
            maghrib: None,
            isha: None,
        }
    }

    pub fn hijri_date(&self) -> &str {
        &self.hijri_date
    }

    /// ISO `YYYY-MM-DD` string as sent by the API.
    pub fn gregorian_date(&self) -> Option<&str> {
        self.gregorian_date.as_deref()
    }

    /// The wire `day` field. The API documents it as day of week (0 = Sunday).
    pub fn day_of_week(&self) -> i64 {
        self.day_of_week
    }

    /// Parsed gregorian date, if present and well formed.
    pub fn date(&self) -> Option<NaiveDate> {
        self.gregorian_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }

    pub fn imsak(&self) -> Option<i64> {
        self.imsak
    }

    pub fn fajr(&self) -> Option<i64> {
        self.fajr
    }

    pub fn syuruk(&self) -> Option<i64> {
        self.syuruk
    }

    pub fn isyraq(&self) -> Option<i64> {
        self.isyraq
    }

    pub fn dhuhr(&self) -> Option<i64> {
        self.dhuhr
    }

    pub fn asr(&self) -> Option<i64> {
        self.asr
    }

    pub fn maghrib(&self) -> Option<i64> {
        self.maghrib
    }

    pub fn isha(&self) -> Option<i64> {
        self.isha
    }

    /// Epoch seconds for `prayer`.
    pub fn timestamp(&self, prayer: Prayer) -> Option<i64> {
        match prayer {
            Prayer::Imsak => self.imsak,
            Prayer::Fajr => self.fajr,
            Prayer::Syuruk => self.syuruk,
            Prayer::Isyraq => self.isyraq,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// UTC instant for `prayer`.
    pub fn time(&self, prayer: Prayer) -> Option<DateTime<Utc>> {
        self.timestamp(prayer)
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
    }

    /// Present times in chronological order.
    pub fn timings(&self) -> impl Iterator<Item = (Prayer, DateTime<Utc>)> + '_ {
        Prayer::ALL
            .into_iter()
            .filter_map(move |p| self.time(p).map(|t| (p, t)))
    }
}

impl FromJson for PrayerDay {
    fn from_json(value: &Value) -> Result<Self, DecodeError> {
        let obj = expect_object(value, "a prayer day object")?;

        let hijri_date = required_str(obj, "hijri")?;
        let gregorian_date = optional_str(obj, "date")?;
        let day_of_week = required_int(obj, "day")?;

        let time = |prayer: Prayer| flexible_int(obj, prayer.wire_name());

        PrayerDayBuilder {
            hijri_date,
            day_of_week,
            gregorian_date,
            imsak: time(Prayer::Imsak)?,
            fajr: time(Prayer::Fajr)?,
            syuruk: time(Prayer::Syuruk)?,
            dhuhr: time(Prayer::Dhuhr)?,
            asr: time(Prayer::Asr)?,
            maghrib: time(Prayer::Maghrib)?,
            isha: time(Prayer::Isha)?,
        }
        .build()
    }
}

/// Hand construction of a [`PrayerDay`], mainly for tests and mocks.
#[derive(Debug, Clone)]
pub struct PrayerDayBuilder {
    hijri_date: String,
    day_of_week: i64,
    gregorian_date: Option<String>,
    imsak: Option<i64>,
    fajr: Option<i64>,
    syuruk: Option<i64>,
    dhuhr: Option<i64>,
    asr: Option<i64>,
    maghrib: Option<i64>,
    isha: Option<i64>,
}

impl PrayerDayBuilder {
    pub fn gregorian_date(mut self, date: impl Into<String>) -> Self {
        self.gregorian_date = Some(date.into());
        self
    }

    pub fn imsak(mut self, ts: i64) -> Self {
        self.imsak = Some(ts);
        self
    }

    pub fn fajr(mut self, ts: i64) -> Self {
        self.fajr = Some(ts);
        self
    }

    pub fn syuruk(mut self, ts: i64) -> Self {
        self.syuruk = Some(ts);
        self
    }

    pub fn dhuhr(mut self, ts: i64) -> Self {
        self.dhuhr = Some(ts);
        self
    }

    pub fn asr(mut self, ts: i64) -> Self {
        self.asr = Some(ts);
        self
    }

    pub fn maghrib(mut self, ts: i64) -> Self {
        self.maghrib = Some(ts);
        self
    }

    pub fn isha(mut self, ts: i64) -> Self {
        self.isha = Some(ts);
        self
    }

    /// Settles the derived times and freezes the record.
    ///
    /// Fails when a derived time would not fit in an `i64`, naming the
    /// time it was derived from.
    pub fn build(self) -> Result<PrayerDay, DecodeError> {
        let imsak = match (self.imsak, self.fajr) {
            (Some(imsak), _) => Some(imsak),
            (None, Some(fajr)) => Some(shifted(fajr, -IMSAK_OFFSET_SECS, Prayer::Fajr)?),
            (None, None) => None,
        };
        let isyraq = self
            .syuruk
            .map(|syuruk| shifted(syuruk, ISYRAQ_OFFSET_SECS, Prayer::Syuruk))
            .transpose()?;

        Ok(PrayerDay {
            hijri_date: self.hijri_date,
            gregorian_date: self.gregorian_date,
            day_of_week: self.day_of_week,
            imsak,
            fajr: self.fajr,
            syuruk: self.syuruk,
            dhuhr: self.dhuhr,
            asr: self.asr,
            maghrib: self.maghrib,
            isha: self.isha,
            isyraq,
        })
    }
}

fn shifted(ts: i64, secs: i64, source: Prayer) -> Result<i64, DecodeError> {
    ts.checked_add(secs).ok_or(DecodeError::InvalidField {
        field: source.wire_name(),
        expected: "a timestamp within range",
    })
}

/// A zone's prayer times for one month, as returned by `/v2/solat/...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct MonthlyPrayerSchedule {
    #[serde(rename = "zone")]
    zone_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    origin: Option<String>,
    #[serde(rename = "prayers")]
    days: Vec<PrayerDay>,
}

impl MonthlyPrayerSchedule {
    pub fn new(zone_code: impl Into<String>, origin: Option<String>, days: Vec<PrayerDay>) -> Self {
        Self {
            zone_code: zone_code.into(),
            origin,
            days,
        }
    }

    pub fn zone_code(&self) -> &str {
        &self.zone_code
    }

    /// Source of the data, usually `JAKIM`.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Days in the order the API sent them.
    pub fn days(&self) -> &[PrayerDay] {
        &self.days
    }

    pub fn into_days(self) -> Vec<PrayerDay> {
        self.days
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PrayerDay> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl<'a> IntoIterator for &'a MonthlyPrayerSchedule {
    type Item = &'a PrayerDay;
    type IntoIter = std::slice::Iter<'a, PrayerDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromJson for MonthlyPrayerSchedule {
    fn from_json(value: &Value) -> Result<Self, DecodeError> {
        let obj = expect_object(value, "a prayer schedule object")?;

        let zone_code = required_str(obj, "zone")?;
        let origin = optional_str(obj, "origin")?;
        let days = match obj.get("prayers") {
            None => {
                return Err(DecodeError::MissingField {
                    field: "prayers",
                    expected: "an array of prayer days",
                });
            }
            Some(Value::Array(items)) => decode_elements(items, "prayers")?,
            Some(_) => {
                return Err(DecodeError::InvalidField {
                    field: "prayers",
                    expected: "an array of prayer days",
                });
            }
        };

        Ok(Self {
            zone_code,
            origin,
            days,
        })
    }
}

impl_try_from_value!(PrayerDay, MonthlyPrayerSchedule);

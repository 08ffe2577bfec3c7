//! Core types for waktu-solat.
//!
//! Immutable records for the Waktu Solat API and the decoder that builds them
//! from loosely typed JSON (numeric strings, nulls, omitted fields).

pub mod decode;
pub mod prayer;
pub mod records;

pub use decode::{decode_list, parse_json, DecodeError, FromJson};
pub use prayer::{MonthlyPrayerSchedule, Prayer, PrayerDay, PrayerDayBuilder};
pub use records::{ApiErrorPayload, StateEntry, ZoneDirectoryEntry};

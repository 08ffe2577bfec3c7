//! # Waktu Solat
//!
//! Async Rust client for the [Waktu Solat](https://api.waktusolat.app) API,
//! which publishes JAKIM prayer times for Malaysian zones.
//!
//! This crate is a facade over the `waktu-solat-*` crates.
//!
//! ## Modules
//!
//! - `types`: records (`PrayerDay`, `MonthlyPrayerSchedule`, ...) and the JSON decoder
//! - `network`: configuration, transport seam, request executor, errors
//! - `client`: the public operations
//! - `lookup`: picking one day out of a monthly schedule
//!
//! ## Usage
//!
//! ```rust,no_run
//! use waktu_solat::prelude::*;
//! use chrono::NaiveDate;
//!
//! # async fn run() -> waktu_solat::Result<()> {
//! let client = WaktuSolatClient::new()?;
//! let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
//! if let Some(day) = client.fetch_prayer_time_for_date("sgr01", date).await? {
//!     for (prayer, time) in day.timings() {
//!         println!("{prayer}: {time}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod lookup;

pub use waktu_solat_network as network;
pub use waktu_solat_types as types;

pub use client::WaktuSolatClient;
pub use lookup::find_day;
pub use waktu_solat_network::{
    ClientConfig, ErrorKind, RawResponse, ReqwestTransport, Result, Transport, TransportError,
    WaktuSolatError,
};
pub use waktu_solat_types::{
    ApiErrorPayload, DecodeError, MonthlyPrayerSchedule, Prayer, PrayerDay, StateEntry,
    ZoneDirectoryEntry,
};

pub mod prelude {
    pub use crate::types::{
        ApiErrorPayload, MonthlyPrayerSchedule, Prayer, PrayerDay, StateEntry, ZoneDirectoryEntry,
    };
    pub use crate::{ClientConfig, ErrorKind, WaktuSolatClient, WaktuSolatError};
}

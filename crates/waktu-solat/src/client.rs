//! The public API client.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};
use waktu_solat_network::{
    ClientConfig, MonthQuery, RequestExecutor, ReqwestTransport, Result, Transport, Url,
};
use waktu_solat_types::{
    decode_list, DecodeError, FromJson, MonthlyPrayerSchedule, PrayerDay, StateEntry,
    ZoneDirectoryEntry,
};

use crate::lookup::find_day;

/// Client for the Waktu Solat API.
///
/// Holds no per-request state; share it between tasks freely. Every
/// operation performs exactly one HTTP request and never retries.
///
/// # Example
/// ```rust,no_run
/// use waktu_solat::WaktuSolatClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), waktu_solat::WaktuSolatError> {
///     let client = WaktuSolatClient::new()?;
///     let schedule = client.fetch_prayer_times_by_zone("sgr01", Some(2025), Some(3)).await?;
///     for day in &schedule {
///         println!("{} fajr={:?}", day.hijri_date(), day.fajr());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct WaktuSolatClient<T = ReqwestTransport> {
    executor: RequestExecutor<T>,
}

impl WaktuSolatClient<ReqwestTransport> {
    /// Client for the production endpoint with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Client backed by `reqwest`, configured from `config`.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(&config, transport)
    }
}

impl<T: Transport> WaktuSolatClient<T> {
    /// Client using a caller-provided transport. Only the base URL of
    /// `config` is used; timeouts and user agent belong to the transport.
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self> {
        let base_url = config.parsed_base_url()?;
        Ok(Self {
            executor: RequestExecutor::new(base_url, transport),
        })
    }

    pub fn base_url(&self) -> &Url {
        self.executor.base_url()
    }

    /// All states and the zone codes in each (`GET /v2/negeri`).
    pub async fn fetch_states(&self) -> Result<Vec<StateEntry>> {
        let value = self.executor.get_json(&["v2", "negeri"], &[]).await?;
        let states: Vec<StateEntry> = decoded(decode_list(&value, "states"))?;
        debug!(count = states.len(), "decoded states");
        Ok(states)
    }

    /// The zone directory (`GET /zones`).
    pub async fn fetch_zones(&self) -> Result<Vec<ZoneDirectoryEntry>> {
        let value = self.executor.get_json(&["zones"], &[]).await?;
        let zones: Vec<ZoneDirectoryEntry> = decoded(decode_list(&value, "zones"))?;
        debug!(count = zones.len(), "decoded zones");
        Ok(zones)
    }

    /// Monthly prayer times for a zone code such as `sgr01`.
    ///
    /// Without `year`/`month` the service picks the current month.
    pub async fn fetch_prayer_times_by_zone(
        &self,
        zone: &str,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<MonthlyPrayerSchedule> {
        let query = MonthQuery::new(year, month).pairs();
        let value = self.executor.get_json(&["v2", "solat", zone], &query).await?;
        decode_schedule(&value)
    }

    /// Monthly prayer times for the zone containing the given coordinates.
    ///
    /// Coordinates are passed through unvalidated; the service rejects
    /// positions outside its coverage. Whole values keep their decimal point
    /// (`3.0`, not `3`).
    pub async fn fetch_prayer_times_by_gps(
        &self,
        latitude: f64,
        longitude: f64,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<MonthlyPrayerSchedule> {
        let lat = format!("{latitude:?}");
        let lon = format!("{longitude:?}");
        let query = MonthQuery::new(year, month).pairs();
        let value = self
            .executor
            .get_json(&["v2", "solat", "gps", lat.as_str(), lon.as_str()], &query)
            .await?;
        decode_schedule(&value)
    }

    /// Prayer times of a single date for a zone.
    ///
    /// Fetches the month containing `date` and picks the matching entry
    /// (see [`find_day`]). `Ok(None)` when the month has no such entry.
    pub async fn fetch_prayer_time_for_date(
        &self,
        zone: &str,
        date: NaiveDate,
    ) -> Result<Option<PrayerDay>> {
        let schedule = self
            .fetch_prayer_times_by_zone(zone, Some(date.year()), Some(date.month()))
            .await?;
        Ok(find_day(&schedule, date).cloned())
    }

    /// Prayer times of a single date for GPS coordinates.
    pub async fn fetch_prayer_time_for_date_by_gps(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<Option<PrayerDay>> {
        let schedule = self
            .fetch_prayer_times_by_gps(latitude, longitude, Some(date.year()), Some(date.month()))
            .await?;
        Ok(find_day(&schedule, date).cloned())
    }
}

fn decode_schedule(value: &serde_json::Value) -> Result<MonthlyPrayerSchedule> {
    let schedule = decoded(MonthlyPrayerSchedule::from_json(value))?;
    debug!(zone = schedule.zone_code(), days = schedule.len(), "decoded prayer schedule");
    Ok(schedule)
}

fn decoded<T>(result: std::result::Result<T, DecodeError>) -> Result<T> {
    result.map_err(|e| {
        warn!(error = %e, cause = %e.root_cause(), "response did not match the expected shape");
        e.into()
    })
}

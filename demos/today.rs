//! Prints today's prayer times for a zone.
//!
//! ```sh
//! cargo run -p waktu-solat --example today -- sgr01
//! RUST_LOG=waktu_solat_network=debug cargo run -p waktu-solat --example today
//! ```

use anyhow::Context;
use chrono::{FixedOffset, Local};
use tracing_subscriber::EnvFilter;
use waktu_solat::prelude::*;

/// Malaysia Time (UTC+8), used for display.
const MYT_OFFSET_SECS: i32 = 8 * 3600;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let zone = std::env::args().nth(1).unwrap_or_else(|| "sgr01".to_string());
    let today = Local::now().date_naive();
    let myt = FixedOffset::east_opt(MYT_OFFSET_SECS).context("invalid UTC offset")?;

    let client = WaktuSolatClient::new()?;

    println!("\n==========================================================");
    println!("   WAKTU SOLAT: {} on {}", zone.to_uppercase(), today.format("%A, %d %B %Y"));
    println!("==========================================================\n");

    let zones = client.fetch_zones().await.context("fetching zone directory")?;
    if let Some(entry) = zones.iter().find(|z| z.jakim_code().eq_ignore_ascii_case(&zone)) {
        println!("📍 {} ({})\n", entry.district_label(), entry.state_name());
    }

    match client.fetch_prayer_time_for_date(&zone, today).await {
        Ok(Some(day)) => {
            println!("🗓  Hijri: {}\n", day.hijri_date());
            for (prayer, time) in day.timings() {
                println!("   {:<18} {}", prayer.to_string(), time.with_timezone(&myt).format("%H:%M"));
            }
        }
        Ok(None) => println!("No entry for {} in this month's schedule.", today),
        Err(e) => match e.kind() {
            ErrorKind::Network => println!("❌ Could not reach the server, try again later: {}", e),
            ErrorKind::Api => println!("❌ The server rejected the request: {}", e),
            _ => return Err(e.into()),
        },
    }

    println!();
    Ok(())
}

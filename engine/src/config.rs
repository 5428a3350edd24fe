use anyhow::anyhow;
use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Business timezone the daily cutoff is interpreted in.
    pub time_zone: Tz,
    /// Wall-clock boundary past which open sessions are force-closed.
    pub cutoff_time: NaiveTime,
    pub sweep_interval_secs: u64,
    pub autofill_debounce_ms: u64,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/floortrack".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let time_zone_name = env::var("APP_TIMEZONE").unwrap_or_else(|_| "UTC".to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let cutoff_raw = env::var("SESSION_CUTOFF_TIME").unwrap_or_else(|_| "17:00".to_string());
        let cutoff_time = NaiveTime::parse_from_str(&cutoff_raw, "%H:%M")
            .map_err(|_| anyhow!("Invalid SESSION_CUTOFF_TIME value: {}", cutoff_raw))?;

        let sweep_interval_secs = env::var("SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .unwrap_or(300);

        let autofill_debounce_ms = env::var("AUTOFILL_DEBOUNCE_MS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .unwrap_or(300);

        Ok(Config {
            database_url,
            bind_addr,
            time_zone,
            cutoff_time,
            sweep_interval_secs,
            autofill_debounce_ms,
        })
    }
}

//! Types that mirror the monitoring backend's JSON schema.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{de, Deserialize, Deserializer};

/// Latest measurement reported by `/api/current`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub timestamp: Option<NaiveDateTime>,
    pub cpu_percent: f64,
    pub ram_percent: f64,
    pub disk_percent: f64,
    #[serde(default)]
    pub net_rx_kbps: Option<f64>,
    #[serde(default)]
    pub net_tx_kbps: Option<f64>,
    // null, "" (no battery on the host) or a number
    #[serde(default, deserialize_with = "de_battery")]
    pub battery_percent: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HistoryPoint {
    #[serde(deserialize_with = "de_timestamp")]
    pub timestamp: NaiveDateTime,
    pub cpu_percent: f64,
    pub ram_percent: f64,
    pub disk_percent: f64,
    #[serde(default)]
    pub net_rx_kbps: f64,
    #[serde(default)]
    pub net_tx_kbps: f64,
}

/// Oldest first; the backend decides the length.
pub type HistoryWindow = Vec<HistoryPoint>;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct StatBlock {
    pub current: f64,
    pub avg: f64,
    pub max: f64,
    pub min: f64,
}

/// Category name (cpu, ram, disk) -> aggregates.
pub type StatsReport = BTreeMap<String, StatBlock>;

/// Snapshot plus the alerts evaluated against it by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentReading {
    pub snapshot: Snapshot,
    pub alerts: Vec<Alert>,
    /// "ok" or "alert" when the backend sends it.
    pub status: Option<String>,
}

/// `{success, data, ...}` wrapper shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub alerts: Option<Vec<Alert>>,
    pub status: Option<String>,
    pub error: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrText {
    Num(f64),
    Text(String),
}

fn de_battery<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<NumOrText>::deserialize(d)? {
        Some(NumOrText::Num(v)) => Some(v),
        Some(NumOrText::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

fn de_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(d)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp {raw:?}")))
}

fn de_opt_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDateTime>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// Accepts naive ISO-8601 (local wall clock, what the collector writes) or
/// RFC 3339 with an offset, which is converted to local time.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

//! Runtime settings: defaults, then profile values, then command-line overrides.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use crate::profiles::Tuning;
use crate::scheduler::Cadence;
use crate::state::OrderingPolicy;

pub const DEFAULT_HISTORY_HOURS: u32 = 1;

/// Warning levels in percent. Loaded and logged, but alerts come
/// pre-evaluated from the backend so nothing renders from these yet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Thresholds {
    pub cpu: f64,
    pub ram: f64,
    pub disk: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu: 85.0,
            ram: 85.0,
            disk: 90.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: Url,
    pub tls_ca: Option<PathBuf>,
    pub cadence: Cadence,
    pub history_hours: u32,
    pub thresholds: Thresholds,
    pub policy: OrderingPolicy,
}

impl Settings {
    pub fn build(
        url: &str,
        tls_ca: Option<&str>,
        tuning: Tuning,
        thresholds: Thresholds,
        policy: OrderingPolicy,
    ) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(url)?;
        let defaults = Cadence::default();
        let cadence = Cadence {
            snapshot: millis("snapshot interval", tuning.snapshot_ms, defaults.snapshot)?,
            history: millis("history interval", tuning.history_ms, defaults.history)?,
            stats: millis("stats interval", tuning.stats_ms, defaults.stats)?,
        };
        let history_hours = tuning.history_hours.unwrap_or(DEFAULT_HISTORY_HOURS);
        if history_hours == 0 {
            return Err(ConfigError::Zero {
                name: "history hours",
            });
        }
        Ok(Self {
            base_url,
            tls_ca: tls_ca.filter(|s| !s.trim().is_empty()).map(PathBuf::from),
            cadence,
            history_hours,
            thresholds,
            policy,
        })
    }
}

fn millis(name: &'static str, v: Option<u64>, default: Duration) -> Result<Duration, ConfigError> {
    match v {
        None => Ok(default),
        Some(0) => Err(ConfigError::Zero { name }),
        Some(ms) => Ok(Duration::from_millis(ms)),
    }
}

/// Only http(s) with a host is accepted.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".into()));
    }
    Ok(url)
}

//! HTTP client for the monitoring backend's JSON endpoints.

use std::future::Future;
use std::path::Path;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ConfigError, FetchError, ProtocolError};
use crate::types::{CurrentReading, Envelope, HistoryWindow, Snapshot, StatsReport};

/// Where refresh cycles get their data. One call is one request/response cycle.
pub trait MetricsSource: Send + Sync + 'static {
    fn current(&self) -> impl Future<Output = Result<CurrentReading, FetchError>> + Send;
    fn history(&self) -> impl Future<Output = Result<HistoryWindow, FetchError>> + Send;
    fn stats(&self) -> impl Future<Output = Result<StatsReport, FetchError>> + Send;
}

pub struct HttpSource {
    http: reqwest::Client,
    current_url: Url,
    history_url: Url,
    stats_url: Url,
}

impl HttpSource {
    pub fn new(base: &Url, tls_ca: Option<&Path>, history_hours: u32) -> Result<Self, ConfigError> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("healthtop/", env!("CARGO_PKG_VERSION")));
        if let Some(path) = tls_ca {
            let pem = std::fs::read(path).map_err(|source| ConfigError::CaFile {
                path: path.to_path_buf(),
                source,
            })?;
            builder = builder.add_root_certificate(reqwest::Certificate::from_pem(&pem)?);
        }
        Ok(Self {
            http: builder.build()?,
            current_url: endpoint(base, "api/current")?,
            history_url: endpoint(base, &format!("api/history/{history_hours}"))?,
            stats_url: endpoint(base, "api/stats")?,
        })
    }

    async fn get_body(&self, url: &Url) -> Result<Bytes, FetchError> {
        let res = self.http.get(url.clone()).send().await?.error_for_status()?;
        Ok(res.bytes().await?)
    }
}

impl MetricsSource for HttpSource {
    async fn current(&self) -> Result<CurrentReading, FetchError> {
        parse_current(&self.get_body(&self.current_url).await?)
    }

    async fn history(&self) -> Result<HistoryWindow, FetchError> {
        parse_history(&self.get_body(&self.history_url).await?)
    }

    async fn stats(&self) -> Result<StatsReport, FetchError> {
        parse_stats(&self.get_body(&self.stats_url).await?)
    }
}

/// Joins `path` under `base`, keeping any path prefix the base already has.
pub fn endpoint(base: &Url, path: &str) -> Result<Url, ConfigError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let p = format!("{}/", base.path());
        base.set_path(&p);
    }
    base.join(path).map_err(|e| ConfigError::InvalidUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })
}

fn envelope<T: DeserializeOwned>(body: &[u8]) -> Result<Envelope<T>, FetchError> {
    let env: Envelope<T> = serde_json::from_slice(body).map_err(ProtocolError::Malformed)?;
    if !env.success {
        return Err(ProtocolError::Rejected(env.error).into());
    }
    Ok(env)
}

pub fn parse_current(body: &[u8]) -> Result<CurrentReading, FetchError> {
    let env = envelope::<Snapshot>(body)?;
    let snapshot = env.data.ok_or(ProtocolError::MissingData)?;
    Ok(CurrentReading {
        snapshot,
        alerts: env.alerts.unwrap_or_default(),
        status: env.status,
    })
}

pub fn parse_history(body: &[u8]) -> Result<HistoryWindow, FetchError> {
    Ok(envelope::<HistoryWindow>(body)?.data.ok_or(ProtocolError::MissingData)?)
}

pub fn parse_stats(body: &[u8]) -> Result<StatsReport, FetchError> {
    Ok(envelope::<StatsReport>(body)?.data.ok_or(ProtocolError::MissingData)?)
}

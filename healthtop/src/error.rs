//! Error types for fetchers and configuration.

use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a refresh cycle produced nothing. Caught at the fetcher boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be completed (connect, TLS, body read, non-2xx).
    #[error("request failed: {0}")]
    Transport(#[source] BoxError),
    /// A response arrived but was not a usable envelope.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(Box::new(err))
    }
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("backend reported failure: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("envelope carried no data")]
    MissingData,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid backend url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
    #[error("invalid value for {flag}: {value:?}")]
    BadNumber { flag: &'static str, value: String },
    #[error("cannot read CA certificate {path:?}: {source}")]
    CaFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot build http client: {0}")]
    Client(#[from] reqwest::Error),
}

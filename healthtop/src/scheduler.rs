//! Poll scheduler: three independent timers, one per fetcher.
//!
//! Every tick spawns its own fetch task and never waits for the previous one,
//! so a slow backend can leave several requests of the same kind in flight.
//! Results are handed to the UI loop over an unbounded channel.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::fetch::MetricsSource;
use crate::types::{CurrentReading, HistoryWindow, StatsReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    Snapshot,
    History,
    Stats,
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FetchKind::Snapshot => "snapshot",
            FetchKind::History => "history",
            FetchKind::Stats => "stats",
        })
    }
}

#[derive(Debug)]
pub enum Outcome {
    Snapshot(Result<CurrentReading, FetchError>),
    History(Result<HistoryWindow, FetchError>),
    Stats(Result<StatsReport, FetchError>),
}

impl Outcome {
    pub fn kind(&self) -> FetchKind {
        match self {
            Outcome::Snapshot(_) => FetchKind::Snapshot,
            Outcome::History(_) => FetchKind::History,
            Outcome::Stats(_) => FetchKind::Stats,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Outcome::Snapshot(r) => r.as_ref().err(),
            Outcome::History(r) => r.as_ref().err(),
            Outcome::Stats(r) => r.as_ref().err(),
        }
    }
}

/// One completed refresh cycle. `seq` counts issued fetches per kind, from 1.
#[derive(Debug)]
pub struct Update {
    pub seq: u64,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub snapshot: Duration,
    pub history: Duration,
    pub stats: Duration,
}

impl Cadence {
    pub fn period(&self, kind: FetchKind) -> Duration {
        match kind {
            FetchKind::Snapshot => self.snapshot,
            FetchKind::History => self.history,
            FetchKind::Stats => self.stats,
        }
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            snapshot: Duration::from_millis(3000),
            history: Duration::from_millis(5000),
            stats: Duration::from_millis(5000),
        }
    }
}

/// Owns the timer tasks; dropping it stops all three timers.
pub struct Scheduler {
    tickers: Vec<JoinHandle<()>>,
}

impl Scheduler {
    /// Fires one fetch of each kind right away, then one per cadence period.
    pub fn spawn<S: MetricsSource>(
        source: Arc<S>,
        cadence: &Cadence,
        tx: UnboundedSender<Update>,
    ) -> Self {
        let tickers = [FetchKind::Snapshot, FetchKind::History, FetchKind::Stats]
            .into_iter()
            .map(|kind| spawn_ticker(kind, cadence.period(kind), source.clone(), tx.clone()))
            .collect();
        Self { tickers }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for t in &self.tickers {
            t.abort();
        }
    }
}

fn spawn_ticker<S: MetricsSource>(
    kind: FetchKind,
    period: Duration,
    source: Arc<S>,
    tx: UnboundedSender<Update>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        // stay on the wall-clock grid if the runtime stalls
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut seq = 0u64;
        loop {
            ticker.tick().await;
            if tx.is_closed() {
                break;
            }
            seq += 1;
            debug!(%kind, seq, "tick");
            let source = source.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = refresh(kind, source.as_ref()).await;
                if let Some(err) = outcome.error() {
                    warn!(%kind, seq, error = %err, "refresh failed, keeping previous data");
                }
                // receiver gone means the app is shutting down
                let _ = tx.send(Update { seq, outcome });
            });
        }
    })
}

/// One request/response cycle of the given kind.
pub async fn refresh<S: MetricsSource>(kind: FetchKind, source: &S) -> Outcome {
    match kind {
        FetchKind::Snapshot => Outcome::Snapshot(source.current().await),
        FetchKind::History => Outcome::History(source.history().await),
        FetchKind::Stats => Outcome::Stats(source.stats().await),
    }
}

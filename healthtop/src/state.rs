//! Dashboard state: the latest generation of each data kind.
//!
//! Each slot is replaced wholesale on success and left alone on failure.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::scheduler::{FetchKind, Outcome, Update};
use crate::types::{CurrentReading, HistoryWindow, StatsReport};

/// How results that complete out of issue order are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingPolicy {
    /// The most recently completed response wins, whatever its sequence number.
    #[default]
    LastWriterWins,
    /// Results older than the last applied one of the same kind are dropped.
    DropStale,
}

#[derive(Debug, Clone)]
pub struct Slot<T> {
    value: Option<T>,
    applied_seq: Option<u64>,
    failures: u32,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: None,
            applied_seq: None,
            failures: 0,
        }
    }
}

impl<T> Slot<T> {
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn applied_seq(&self) -> Option<u64> {
        self.applied_seq
    }

    /// Consecutive failed cycles since the last applied result.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Returns false when the policy rejected the value.
    pub fn publish(&mut self, seq: u64, value: T, policy: OrderingPolicy) -> bool {
        if policy == OrderingPolicy::DropStale && self.applied_seq.is_some_and(|a| seq < a) {
            return false;
        }
        self.value = Some(value);
        self.applied_seq = Some(seq);
        self.failures = 0;
        true
    }

    pub fn record_failure(&mut self) {
        self.failures = self.failures.saturating_add(1);
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub snapshot: Slot<CurrentReading>,
    pub history: Slot<HistoryWindow>,
    pub stats: Slot<StatsReport>,
    policy: OrderingPolicy,
    last_updated: Option<DateTime<Local>>,
}

impl DashboardState {
    pub fn new(policy: OrderingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    /// Local time of the last applied snapshot.
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn apply(&mut self, update: Update) -> Option<FetchKind> {
        self.apply_at(update, Local::now())
    }

    /// Folds one completed cycle into the state. Returns the kind whose widget
    /// must be redrawn, or None when nothing changed.
    pub fn apply_at(&mut self, update: Update, now: DateTime<Local>) -> Option<FetchKind> {
        let Update { seq, outcome } = update;
        let kind = outcome.kind();
        let policy = self.policy;
        let applied = match outcome {
            Outcome::Snapshot(Ok(v)) => {
                let ok = self.snapshot.publish(seq, v, policy);
                if ok {
                    self.last_updated = Some(now);
                }
                ok
            }
            Outcome::History(Ok(v)) => self.history.publish(seq, v, policy),
            Outcome::Stats(Ok(v)) => self.stats.publish(seq, v, policy),
            Outcome::Snapshot(Err(_)) => {
                self.snapshot.record_failure();
                false
            }
            Outcome::History(Err(_)) => {
                self.history.record_failure();
                false
            }
            Outcome::Stats(Err(_)) => {
                self.stats.record_failure();
                false
            }
        };
        if applied {
            debug!(%kind, seq, "applied");
            Some(kind)
        } else {
            debug!(%kind, seq, "not applied");
            None
        }
    }
}

//! Poll scheduler tests against a scripted source on a paused clock.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use healthtop::error::FetchError;
use healthtop::fetch::MetricsSource;
use healthtop::scheduler::{Cadence, FetchKind, Outcome, Scheduler, Update};
use healthtop::state::{DashboardState, OrderingPolicy};
use healthtop::types::{
    CurrentReading, HistoryPoint, HistoryWindow, Snapshot, StatBlock, StatsReport,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::{sleep, timeout, timeout_at, Instant};

#[derive(Default)]
struct Scripted {
    snapshot_calls: AtomicU64,
    history_calls: AtomicU64,
    stats_calls: AtomicU64,
    // per-call latency of snapshot requests, in issue order
    snapshot_delays: Mutex<VecDeque<Duration>>,
    fail_snapshot: bool,
}

impl Scripted {
    fn with_delays(delays: &[u64]) -> Self {
        Self {
            snapshot_delays: Mutex::new(delays.iter().map(|s| Duration::from_secs(*s)).collect()),
            ..Self::default()
        }
    }
}

impl MetricsSource for Scripted {
    async fn current(&self) -> Result<CurrentReading, FetchError> {
        let n = self.snapshot_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self
            .snapshot_delays
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        if !delay.is_zero() {
            sleep(delay).await;
        }
        if self.fail_snapshot {
            return Err(FetchError::Transport("connection refused".into()));
        }
        Ok(CurrentReading {
            snapshot: Snapshot {
                timestamp: None,
                // encode the issue order in the payload
                cpu_percent: n as f64,
                ram_percent: 0.0,
                disk_percent: 0.0,
                net_rx_kbps: None,
                net_tx_kbps: None,
                battery_percent: None,
            },
            alerts: Vec::new(),
            status: None,
        })
    }

    async fn history(&self) -> Result<HistoryWindow, FetchError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        let ts = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Ok(vec![HistoryPoint {
            timestamp: ts,
            cpu_percent: 1.0,
            ram_percent: 2.0,
            disk_percent: 3.0,
            net_rx_kbps: 4.0,
            net_tx_kbps: 5.0,
        }])
    }

    async fn stats(&self) -> Result<StatsReport, FetchError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        let block = StatBlock {
            current: 1.0,
            avg: 1.0,
            max: 1.0,
            min: 1.0,
        };
        Ok(StatsReport::from([("cpu".to_string(), block)]))
    }
}

fn cadence() -> Cadence {
    Cadence {
        snapshot: Duration::from_secs(3),
        history: Duration::from_secs(5),
        stats: Duration::from_secs(5),
    }
}

/// Everything that arrives before `until`, with arrival time in whole seconds.
async fn collect(rx: &mut UnboundedReceiver<Update>, until: Duration) -> Vec<(Update, u64)> {
    let start = Instant::now();
    let mut out = Vec::new();
    while let Ok(Some(u)) = timeout_at(start + until, rx.recv()).await {
        out.push((u, start.elapsed().as_secs()));
    }
    out
}

fn arrivals(updates: &[(Update, u64)], kind: FetchKind) -> Vec<(u64, u64)> {
    updates
        .iter()
        .filter(|(u, _)| u.outcome.kind() == kind)
        .map(|(u, t)| (u.seq, *t))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn fires_immediately_then_on_each_cadence() {
    let src = Arc::new(Scripted::default());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _sched = Scheduler::spawn(src.clone(), &cadence(), tx);

    let seen = collect(&mut rx, Duration::from_millis(10_500)).await;

    assert_eq!(
        arrivals(&seen, FetchKind::Snapshot),
        vec![(1, 0), (2, 3), (3, 6), (4, 9)]
    );
    assert_eq!(
        arrivals(&seen, FetchKind::History),
        vec![(1, 0), (2, 5), (3, 10)]
    );
    assert_eq!(
        arrivals(&seen, FetchKind::Stats),
        vec![(1, 0), (2, 5), (3, 10)]
    );
    assert_eq!(src.snapshot_calls.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn failing_fetcher_does_not_delay_the_others() {
    let src = Arc::new(Scripted {
        fail_snapshot: true,
        ..Scripted::default()
    });
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _sched = Scheduler::spawn(src, &cadence(), tx);

    let seen = collect(&mut rx, Duration::from_millis(5_500)).await;

    assert!(seen
        .iter()
        .filter(|(u, _)| u.outcome.kind() == FetchKind::Snapshot)
        .all(|(u, _)| u.outcome.error().is_some()));
    // snapshot keeps ticking even though every cycle fails
    assert_eq!(arrivals(&seen, FetchKind::Snapshot).len(), 2);
    assert_eq!(arrivals(&seen, FetchKind::History), vec![(1, 0), (2, 5)]);
    assert!(seen
        .iter()
        .filter(|(u, _)| u.outcome.kind() == FetchKind::History)
        .all(|(u, _)| matches!(u.outcome, Outcome::History(Ok(_)))));

    let mut state = DashboardState::default();
    for (u, _) in seen {
        state.apply(u);
    }
    assert!(state.snapshot.get().is_none());
    assert_eq!(state.snapshot.failures(), 2);
    assert!(state.history.get().is_some());
    assert!(state.stats.get().is_some());
}

#[tokio::test(start_paused = true)]
async fn slow_responses_overlap_and_complete_out_of_order() {
    // first request takes 5s, second (issued at 3s) takes 1s
    let src = Arc::new(Scripted::with_delays(&[5, 1]));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let _sched = Scheduler::spawn(src.clone(), &cadence(), tx);

    let seen = collect(&mut rx, Duration::from_millis(5_500)).await;
    // the tick at 3s did not wait for the outstanding request
    assert_eq!(src.snapshot_calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        arrivals(&seen, FetchKind::Snapshot),
        vec![(2, 4), (1, 5)]
    );

    let snapshots: Vec<&Update> = seen
        .iter()
        .map(|(u, _)| u)
        .filter(|u| u.outcome.kind() == FetchKind::Snapshot)
        .collect();

    let mut lww = DashboardState::new(OrderingPolicy::LastWriterWins);
    let mut strict = DashboardState::new(OrderingPolicy::DropStale);
    for u in snapshots {
        let Outcome::Snapshot(Ok(r)) = &u.outcome else {
            panic!("unexpected failure");
        };
        for state in [&mut lww, &mut strict] {
            state.apply(Update {
                seq: u.seq,
                outcome: Outcome::Snapshot(Ok(r.clone())),
            });
        }
    }
    // most recently arrived response wins: that is the first one issued
    assert_eq!(lww.snapshot.get().unwrap().snapshot.cpu_percent, 1.0);
    // sequence ordering keeps the newest issued instead
    assert_eq!(strict.snapshot.get().unwrap().snapshot.cpu_percent, 2.0);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_scheduler_stops_ticking() {
    let src = Arc::new(Scripted::default());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let sched = Scheduler::spawn(src.clone(), &cadence(), tx);

    let first = collect(&mut rx, Duration::from_millis(500)).await;
    assert_eq!(first.len(), 3);
    drop(sched);

    // all senders go away once the timers are aborted
    let drained = timeout(Duration::from_secs(60), async {
        while rx.recv().await.is_some() {}
    })
    .await;
    assert!(drained.is_ok(), "channel never closed");
    assert_eq!(src.snapshot_calls.load(Ordering::SeqCst), 1);
}

//! App state and main loop: input handling, applying fetch results, and drawing.

use std::{io, sync::Arc, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::sleep;
use tracing::info;

use crate::fetch::MetricsSource;
use crate::scheduler::{Cadence, FetchKind, Scheduler, Update};
use crate::state::{DashboardState, OrderingPolicy};
use crate::ui::{
    alerts::{draw_alerts, AlertPanel},
    cards::{draw_cards, CardPanel},
    charts::{draw_charts, render_history, ChartBoard},
    header::{draw_header, header_title},
    stats::{draw_stats, StatsGrid},
};

// How long the loop waits for a fetch result before checking input again
const INPUT_POLL: Duration = Duration::from_millis(100);

pub struct App {
    url: String,

    // Latest generation of each data kind
    state: DashboardState,

    // Retained widget contents, rebuilt by the renderers
    cards: CardPanel,
    alerts: AlertPanel,
    charts: ChartBoard,
    stats: StatsGrid,

    // Quit flag
    should_quit: bool,
}

impl App {
    pub fn new(url: impl Into<String>, policy: OrderingPolicy) -> Self {
        Self {
            url: url.into(),
            state: DashboardState::new(policy),
            cards: CardPanel::default(),
            alerts: AlertPanel::default(),
            charts: ChartBoard::default(),
            stats: StatsGrid::default(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn cards(&self) -> &CardPanel {
        &self.cards
    }

    pub fn alerts(&self) -> &AlertPanel {
        &self.alerts
    }

    pub fn charts(&self) -> &ChartBoard {
        &self.charts
    }

    pub fn stats(&self) -> &StatsGrid {
        &self.stats
    }

    pub async fn run<S: MetricsSource>(
        &mut self,
        source: Arc<S>,
        cadence: &Cadence,
    ) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = Scheduler::spawn(source, cadence, tx);
        info!(url = %self.url, ?cadence, "polling started");

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal, &mut rx).await;
        drop(scheduler);

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        info!("polling stopped");
        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        rx: &mut UnboundedReceiver<Update>,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::ZERO)? {
                if let Event::Key(k) = event::read()? {
                    let ctrl_c = k.code == KeyCode::Char('c')
                        && k.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl_c
                        || matches!(
                            k.code,
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
                        )
                    {
                        self.should_quit = true;
                    }
                }
            }
            if self.should_quit {
                break;
            }

            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                Some(update) = rx.recv() => {
                    self.apply(update);
                    while let Ok(more) = rx.try_recv() {
                        self.apply(more);
                    }
                }
                _ = sleep(INPUT_POLL) => {}
            }
        }

        Ok(())
    }

    /// State first, then the widget that projects the changed slice.
    pub fn apply(&mut self, update: Update) {
        if let Some(kind) = self.state.apply(update) {
            self.render(kind);
        }
    }

    fn render(&mut self, kind: FetchKind) {
        match kind {
            FetchKind::Snapshot => {
                if let Some(r) = self.state.snapshot.get() {
                    self.cards.render(&r.snapshot);
                    self.alerts.render(&r.alerts);
                }
            }
            FetchKind::History => {
                if let Some(w) = self.state.history.get() {
                    render_history(w, &mut self.charts);
                }
            }
            FetchKind::Stats => {
                if let Some(s) = self.state.stats.get() {
                    self.stats.render(s);
                }
            }
        }
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();

        // Root rows: header, cards + alerts, charts, stats
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // header
                Constraint::Length(3),  // cards
                Constraint::Length(5),  // alerts
                Constraint::Min(12),    // charts
                Constraint::Length(8),  // stats
            ])
            .split(area);

        draw_header(
            f,
            rows[0],
            header_title(
                &self.url,
                self.state.snapshot.get(),
                self.state.last_updated(),
            ),
        );
        draw_cards(f, rows[1], &self.cards);
        draw_alerts(f, rows[2], &self.alerts);
        draw_charts(f, rows[3], &self.charts);
        draw_stats(f, rows[4], &self.stats);
    }
}

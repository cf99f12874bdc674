//! History charts: cpu, ram, disk and network throughput over the window.
//!
//! `render_history` derives the series and hands each chart to a
//! [`PlotSurface`]; [`ChartBoard`] is the surface the TUI draws from.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

use crate::types::HistoryPoint;
use crate::ui::theme;
use crate::ui::util::time_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Cpu,
    Ram,
    Disk,
    Network,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Cpu,
        ChartKind::Ram,
        ChartKind::Disk,
        ChartKind::Network,
    ];

    /// Percentage charts pin the value axis to 0..=100.
    pub fn is_percentage(self) -> bool {
        !matches!(self, ChartKind::Network)
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Cpu => "CPU history",
            ChartKind::Ram => "RAM history",
            ChartKind::Disk => "Disk history",
            ChartKind::Network => "Network",
        }
    }

    pub fn axis_title(self) -> &'static str {
        if self.is_percentage() {
            "Percentage (%)"
        } else {
            "Speed (Kbps)"
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub color: Color,
    pub values: Vec<f64>,
}

/// A fully rebuilt chart: shared time labels plus index-aligned series.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub x_labels: Vec<String>,
    pub series: Vec<Series>,
}

impl Plot {
    /// Value-axis bounds for the given chart kind.
    pub fn y_bounds(&self, kind: ChartKind) -> [f64; 2] {
        if kind.is_percentage() {
            return [0.0, 100.0];
        }
        let peak = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        [0.0, (peak * 1.1).max(1.0)]
    }
}

/// Receives whole charts; each call replaces whatever the target showed.
pub trait PlotSurface {
    fn plot(&mut self, kind: ChartKind, plot: Plot);
}

/// Projects the window onto the four charts. An empty window plots nothing,
/// so previously drawn charts stay up.
pub fn render_history<P: PlotSurface + ?Sized>(window: &[HistoryPoint], surface: &mut P) {
    if window.is_empty() {
        return;
    }
    let labels: Vec<String> = window.iter().map(|p| time_label(&p.timestamp)).collect();
    let pick = |get: fn(&HistoryPoint) -> f64| window.iter().map(get).collect::<Vec<f64>>();
    let series = |name, color, values| Series {
        name,
        color,
        values,
    };

    surface.plot(
        ChartKind::Cpu,
        Plot {
            x_labels: labels.clone(),
            series: vec![series("CPU %", theme::CPU, pick(|p| p.cpu_percent))],
        },
    );
    surface.plot(
        ChartKind::Ram,
        Plot {
            x_labels: labels.clone(),
            series: vec![series("RAM %", theme::RAM, pick(|p| p.ram_percent))],
        },
    );
    surface.plot(
        ChartKind::Disk,
        Plot {
            x_labels: labels.clone(),
            series: vec![series("Disk %", theme::DISK, pick(|p| p.disk_percent))],
        },
    );
    surface.plot(
        ChartKind::Network,
        Plot {
            x_labels: labels,
            series: vec![
                series("RX (Kbps)", theme::NET_RX, pick(|p| p.net_rx_kbps)),
                series("TX (Kbps)", theme::NET_TX, pick(|p| p.net_tx_kbps)),
            ],
        },
    );
}

/// Retained chart images, one slot per [`ChartKind`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartBoard {
    plots: [Option<Plot>; 4],
}

impl ChartBoard {
    pub fn get(&self, kind: ChartKind) -> Option<&Plot> {
        self.plots[kind.index()].as_ref()
    }
}

impl PlotSurface for ChartBoard {
    fn plot(&mut self, kind: ChartKind, plot: Plot) {
        self.plots[kind.index()] = Some(plot);
    }
}

pub fn draw_charts(f: &mut ratatui::Frame<'_>, area: Rect, board: &ChartBoard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);
    for (r, kinds) in rows.iter().zip(ChartKind::ALL.chunks(2)) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(*r);
        for (slot, kind) in cols.iter().zip(kinds) {
            draw_chart(f, *slot, *kind, board.get(*kind));
        }
    }
}

fn draw_chart(f: &mut ratatui::Frame<'_>, area: Rect, kind: ChartKind, plot: Option<&Plot>) {
    let block = Block::default().borders(Borders::ALL).title(kind.title());
    let Some(plot) = plot else {
        f.render_widget(block, area);
        return;
    };

    let points: Vec<Vec<(f64, f64)>> = plot
        .series
        .iter()
        .map(|s| {
            s.values
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, *v))
                .collect()
        })
        .collect();
    let datasets: Vec<Dataset> = plot
        .series
        .iter()
        .zip(&points)
        .map(|(s, data)| {
            Dataset::default()
                .name(s.name)
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(s.color))
                .data(data)
        })
        .collect();

    let last = plot.x_labels.len().saturating_sub(1);
    let x_labels: Vec<Span> = match (plot.x_labels.first(), plot.x_labels.last()) {
        (Some(a), Some(b)) if last > 0 => vec![Span::raw(a.as_str()), Span::raw(b.as_str())],
        (Some(a), _) => vec![Span::raw(a.as_str())],
        _ => Vec::new(),
    };
    let [lo, hi] = plot.y_bounds(kind);
    let y_labels = if kind.is_percentage() {
        vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]
    } else {
        vec![
            Span::raw("0"),
            Span::raw(format!("{:.0}", hi / 2.0)),
            Span::raw(format!("{hi:.0}")),
        ]
    };

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(theme::MUTED))
                .bounds([0.0, last.max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(kind.axis_title())
                .style(Style::default().fg(theme::MUTED))
                .bounds([lo, hi])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

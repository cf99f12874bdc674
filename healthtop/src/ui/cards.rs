//! Metric cards: percentage readout plus a proportional gauge per resource.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Gauge},
};

use crate::types::Snapshot;
use crate::ui::theme;
use crate::ui::util::{bar_percent, pct_label};

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub title: &'static str,
    pub label: String,
    /// Bar width in percent, already clamped.
    pub bar: f64,
    pub color: Color,
}

impl CardView {
    fn empty(title: &'static str, color: Color) -> Self {
        Self {
            title,
            label: "--".into(),
            bar: 0.0,
            color,
        }
    }

    fn set(&mut self, v: f64) {
        self.label = pct_label(v);
        self.bar = bar_percent(v);
    }

    fn set_unavailable(&mut self) {
        self.label = "N/A".into();
        self.bar = 0.0;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardPanel {
    pub cpu: CardView,
    pub ram: CardView,
    pub disk: CardView,
    pub battery: CardView,
}

impl Default for CardPanel {
    fn default() -> Self {
        Self {
            cpu: CardView::empty("CPU", theme::CPU),
            ram: CardView::empty("Memory", theme::RAM),
            disk: CardView::empty("Disk", theme::DISK),
            battery: CardView::empty("Battery", theme::BATTERY),
        }
    }
}

impl CardPanel {
    pub fn render(&mut self, s: &Snapshot) {
        self.cpu.set(s.cpu_percent);
        self.ram.set(s.ram_percent);
        self.disk.set(s.disk_percent);
        match s.battery_percent {
            Some(b) => self.battery.set(b),
            None => self.battery.set_unavailable(),
        }
    }

    pub fn cards(&self) -> [&CardView; 4] {
        [&self.cpu, &self.ram, &self.disk, &self.battery]
    }
}

pub fn draw_cards(f: &mut ratatui::Frame<'_>, area: Rect, panel: &CardPanel) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (card, slot) in panel.cards().into_iter().zip(cols.iter()) {
        let g = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(card.title))
            .gauge_style(Style::default().fg(card.color))
            .ratio(card.bar / 100.0)
            .label(Span::styled(
                card.label.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        f.render_widget(g, *slot);
    }
}

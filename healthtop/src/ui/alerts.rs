//! Alert panel, rebuilt from the backend's alert list on every snapshot.

use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::types::Alert;
use crate::ui::theme;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertPanel {
    entries: Vec<String>,
}

impl AlertPanel {
    pub fn render(&mut self, alerts: &[Alert]) {
        self.entries.clear();
        self.entries
            .extend(alerts.iter().map(|a| format!("⚠ {}", a.message)));
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

pub fn draw_alerts(f: &mut ratatui::Frame<'_>, area: Rect, panel: &AlertPanel) {
    let title = format!("Alerts ({})", panel.entries.len());
    let lines: Vec<Line> = panel
        .entries
        .iter()
        .map(|e| Line::styled(e.as_str(), Style::default().fg(theme::ALERT)))
        .collect();
    let p = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

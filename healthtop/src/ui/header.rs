//! Top header with backend url, status word and last refresh time.

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

use crate::types::CurrentReading;

pub fn header_title(
    url: &str,
    reading: Option<&CurrentReading>,
    last_updated: Option<DateTime<Local>>,
) -> String {
    let Some(r) = reading else {
        return format!("healthtop — {url} | connecting... (press 'q' to quit)");
    };
    let status = match r.status.as_deref() {
        Some("alert") => "⚠️ alert".to_string(),
        Some(s) => s.to_string(),
        None if r.alerts.is_empty() => "ok".to_string(),
        None => "⚠️ alert".to_string(),
    };
    let updated = last_updated
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--".into());
    format!("healthtop — {url} | status: {status} | updated: {updated}  (press 'q' to quit)")
}

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, title: String) {
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}

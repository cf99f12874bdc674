//! Small UI helpers: percentage labels, bar widths, time labels.

use chrono::NaiveDateTime;
use ratatui::layout::Rect;

/// One decimal place and a trailing percent sign.
pub fn pct_label(v: f64) -> String {
    format!("{v:.1}%")
}

/// Bar width in percent, clamped to 0..=100. Non-finite input draws nothing.
pub fn bar_percent(v: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub fn time_label(ts: &NaiveDateTime) -> String {
    ts.format("%H:%M:%S").to_string()
}

pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

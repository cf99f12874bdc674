//! Shared UI theme constants.

use ratatui::style::Color;

// Metric colors, one per chart/card
pub const CPU: Color = Color::Rgb(255, 152, 0);
pub const RAM: Color = Color::Rgb(33, 150, 243);
pub const DISK: Color = Color::Rgb(156, 39, 176);
pub const BATTERY: Color = Color::Rgb(76, 175, 80);
pub const NET_RX: Color = Color::Rgb(76, 175, 80);
pub const NET_TX: Color = Color::Rgb(255, 87, 34);

pub const ALERT: Color = Color::Yellow;
pub const MUTED: Color = Color::Rgb(170, 170, 180);

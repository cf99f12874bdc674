//! Statistics grid: current/average/max/min tiles per metric category.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::types::StatsReport;
use crate::ui::theme;
use crate::ui::util::pct_label;

pub struct StatCategory {
    pub key: &'static str,
    pub label: &'static str,
    pub color: Color,
}

/// Fixed lookup table; a new category needs a row here.
pub const CATEGORIES: [StatCategory; 3] = [
    StatCategory {
        key: "cpu",
        label: "CPU",
        color: theme::CPU,
    },
    StatCategory {
        key: "ram",
        label: "Memory (RAM)",
        color: theme::RAM,
    },
    StatCategory {
        key: "disk",
        label: "Disk",
        color: theme::DISK,
    },
];

const TILES_PER_CATEGORY: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct StatTile {
    pub category: &'static str,
    pub label: String,
    pub value: String,
    pub color: Color,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsGrid {
    tiles: Vec<StatTile>,
}

impl StatsGrid {
    pub fn render(&mut self, report: &StatsReport) {
        self.tiles.clear();
        for cat in &CATEGORIES {
            let Some(block) = report.get(cat.key) else {
                continue;
            };
            let values = [
                ("Current", block.current),
                ("Average", block.avg),
                ("Max", block.max),
                ("Min", block.min),
            ];
            self.tiles.extend(values.into_iter().map(|(name, v)| StatTile {
                category: cat.key,
                label: format!("{} - {}", cat.label, name),
                value: pct_label(v),
                color: cat.color,
            }));
        }
    }

    pub fn tiles(&self) -> &[StatTile] {
        &self.tiles
    }
}

pub fn draw_stats(f: &mut ratatui::Frame<'_>, area: Rect, grid: &StatsGrid) {
    f.render_widget(
        Block::default().borders(Borders::ALL).title("Statistics (last hour)"),
        area,
    );
    let inner = crate::ui::util::inner(area);
    let rows_n = grid.tiles.len().div_ceil(TILES_PER_CATEGORY);
    if inner.height == 0 || rows_n == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows_n as u32); rows_n])
        .split(inner);
    for (row, chunk) in rows.iter().zip(grid.tiles.chunks(TILES_PER_CATEGORY)) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, TILES_PER_CATEGORY as u32); TILES_PER_CATEGORY])
            .split(*row);
        for (slot, tile) in cols.iter().zip(chunk) {
            let text = vec![
                Line::from(Span::styled(
                    tile.label.as_str(),
                    Style::default().fg(theme::MUTED),
                )),
                Line::from(Span::styled(
                    tile.value.as_str(),
                    Style::default().fg(tile.color).add_modifier(Modifier::BOLD),
                )),
            ];
            f.render_widget(Paragraph::new(text).centered(), *slot);
        }
    }
}

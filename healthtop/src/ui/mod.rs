//! UI module root: exposes renderers and drawing functions for individual panels.

pub mod alerts;
pub mod cards;
pub mod charts;
pub mod header;
pub mod stats;
pub mod theme;
pub mod util;

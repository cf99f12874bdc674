//! healthtop: terminal dashboard for a host health monitoring backend.
//!
//! Three fetchers poll the backend on independent cadences; each completed
//! cycle updates [`state::DashboardState`] and the widget that projects it.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod profiles;
pub mod scheduler;
pub mod state;
pub mod types;
pub mod ui;

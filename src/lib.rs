//! bikedash: exploratory dashboard over the bike-sharing rental dataset

pub mod cli;
pub mod config;
pub mod format;
pub mod services;
pub mod telemetry;
pub mod tui;
pub mod types;

//! TUI widgets

pub mod explanation;
pub mod help;
pub mod hourly;
pub mod page;
pub mod seasons;
pub mod selector;
pub mod slider;
pub mod spinner;
pub mod tabs;
pub mod users;

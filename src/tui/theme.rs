//! Terminal theme detection and color definitions

use ratatui::style::Color;

use crate::config::ThemeChoice;
use crate::types::Weather;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Resolve the configured preference, probing the terminal only for `auto`
    pub fn from_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::detect(),
            ThemeChoice::Dark => Self::Dark,
            ThemeChoice::Light => Self::Light,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (selected tabs, keybinding keys, active slider handle)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, inactive tabs, hints, axes)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Working-day series and weekday bars
    pub fn working_day(self) -> Color {
        match self {
            Self::Dark => Color::Blue,
            Self::Light => Color::Indexed(25),
        }
    }

    /// Weekend series and weekend bars
    pub fn weekend(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(208), // orange (ANSI 256)
            Self::Light => Color::Indexed(166),
        }
    }

    /// Casual riders
    pub fn casual(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130),
        }
    }

    /// Registered riders
    pub fn registered(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22), // dark green (ANSI 256)
        }
    }

    /// Bar color for a weather condition
    pub fn weather(self, weather: Weather) -> Color {
        match (self, weather) {
            (Self::Dark, Weather::Clear) => Color::LightBlue,
            (Self::Dark, Weather::Cloudy) => Color::Gray,
            (Self::Dark, Weather::LightRain) => Color::Blue,
            (Self::Light, Weather::Clear) => Color::Indexed(32),
            (Self::Light, Weather::Cloudy) => Color::Indexed(244),
            (Self::Light, Weather::LightRain) => Color::Indexed(18),
        }
    }

    /// Error/negative indicator color
    pub fn error(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }
}

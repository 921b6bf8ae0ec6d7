//! Inline option pickers: the season dropdown and the user-type radio group

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::services::UserTypeFilter;
use crate::tui::theme::Theme;
use crate::types::{Language, Season};

/// Season picker cycled with ↑/↓; the current season is bracketed
pub struct SeasonSelector {
    selected: Season,
    language: Language,
    theme: Theme,
}

impl SeasonSelector {
    pub fn new(selected: Season, language: Language, theme: Theme) -> Self {
        Self {
            selected,
            language,
            theme,
        }
    }
}

impl Widget for SeasonSelector {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            "Season  ",
            Style::default().fg(self.theme.muted()),
        )];
        for season in Season::all() {
            let label = season.label(self.language);
            if *season == self.selected {
                spans.push(Span::styled(
                    format!("▾ {} ", label),
                    Style::default()
                        .fg(self.theme.accent())
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(
                    format!("  {} ", label),
                    Style::default().fg(self.theme.muted()),
                ));
            }
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Radio buttons for the rider group filter
pub struct UserTypeRadio {
    selected: UserTypeFilter,
    theme: Theme,
}

impl UserTypeRadio {
    pub fn new(selected: UserTypeFilter, theme: Theme) -> Self {
        Self { selected, theme }
    }

    /// Shortcut key shown next to each option
    pub fn key(filter: UserTypeFilter) -> char {
        match filter {
            UserTypeFilter::Both => 'b',
            UserTypeFilter::Casual => 'c',
            UserTypeFilter::Registered => 'r',
        }
    }
}

impl Widget for UserTypeRadio {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            "Riders  ",
            Style::default().fg(self.theme.muted()),
        )];
        for filter in UserTypeFilter::all() {
            let on = *filter == self.selected;
            let mark = if on { "(•)" } else { "( )" };
            let style = if on {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.text())
            };
            spans.push(Span::styled(format!("{} {}", mark, filter.label()), style));
            spans.push(Span::styled(
                format!(" [{}]   ", Self::key(*filter)),
                Style::default().fg(self.theme.muted()),
            ));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

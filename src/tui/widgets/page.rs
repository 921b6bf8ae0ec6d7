//! Shared chrome around each question page: tabs, heading, controls, footer

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::tabs::TabBar;
use crate::services::Question;
use crate::tui::theme::Theme;

/// Maximum content width (wider terminals get centered content)
pub const MAX_CONTENT_WIDTH: u16 = 170;

/// Bindings every page shows after its own
const COMMON_BINDINGS: &[(&str, &str)] = &[
    ("Tab", "Switch"),
    ("e", "Explain"),
    ("?", "Help"),
    ("q", "Quit"),
];

/// Regions left for the page body after the chrome is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageAreas {
    pub controls: Rect,
    pub body: Rect,
}

pub struct PageChrome<'a> {
    question: Question,
    controls_height: u16,
    bindings: &'a [(&'a str, &'a str)],
    theme: Theme,
}

impl<'a> PageChrome<'a> {
    pub fn new(question: Question, theme: Theme) -> Self {
        Self {
            question,
            controls_height: 1,
            bindings: &[],
            theme,
        }
    }

    pub fn controls_height(mut self, height: u16) -> Self {
        self.controls_height = height;
        self
    }

    pub fn bindings(mut self, bindings: &'a [(&'a str, &'a str)]) -> Self {
        self.bindings = bindings;
        self
    }

    /// Draw the chrome and hand back the controls and body regions
    pub fn render(self, area: Rect, buf: &mut Buffer) -> PageAreas {
        let area = centered_content(area, MAX_CONTENT_WIDTH);
        let chunks = Layout::vertical([
            Constraint::Length(1),                    // Top padding
            Constraint::Length(1),                    // Tabs
            Constraint::Length(1),                    // Separator
            Constraint::Length(1),                    // Heading
            Constraint::Length(1),                    // Blank
            Constraint::Length(self.controls_height), // Controls
            Constraint::Length(1),                    // Blank
            Constraint::Min(0),                       // Body
            Constraint::Length(1),                    // Separator
            Constraint::Length(1),                    // Keybindings
        ])
        .split(area);

        TabBar::new(self.question, self.theme).render(chunks[1], buf);
        render_separator(chunks[2], buf, self.theme);

        Paragraph::new(Line::from(Span::styled(
            self.question.heading(),
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        render_separator(chunks[8], buf, self.theme);
        self.render_keybindings(chunks[9], buf);

        PageAreas {
            controls: chunks[5],
            body: chunks[7],
        }
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (key, desc) in self.bindings.iter().chain(COMMON_BINDINGS) {
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(self.theme.accent())));
            spans.push(Span::styled(
                format!(": {}", desc),
                Style::default().fg(self.theme.muted()),
            ));
        }
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// Full-width horizontal rule
pub fn render_separator(area: Rect, buf: &mut Buffer, theme: Theme) {
    let line = "─".repeat(area.width as usize);
    buf.set_string(area.x, area.y, &line, Style::default().fg(theme.muted()));
}

/// Center `area` horizontally, capped at `max_width` columns
pub fn centered_content(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

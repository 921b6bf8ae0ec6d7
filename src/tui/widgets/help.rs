//! Help popup widget - keyboard shortcuts and dataset size

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::format::format_number;
use crate::tui::theme::Theme;
use crate::types::DatasetSummary;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

const POPUP_WIDTH: u16 = 46;
const POPUP_HEIGHT: u16 = 21;

const NAVIGATION: &[(&str, &str)] = &[
    ("Tab / Shift+Tab", "Switch question"),
    ("1-3", "Jump to question"),
    ("Left / Right", "Move slider handle"),
    ("[ / ]", "Select low/high handle"),
    ("Up / Down", "Change season"),
    ("b / c / r", "Both/Casual/Registered"),
];

const GENERAL: &[(&str, &str)] = &[
    ("e", "Toggle explanation"),
    ("?", "Toggle help"),
    ("q / Esc", "Quit"),
];

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup<'a> {
    summary: Option<&'a DatasetSummary>,
    theme: Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: Theme) -> Self {
        Self {
            summary: None,
            theme,
        }
    }

    pub fn with_summary(mut self, summary: &'a DatasetSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }

    fn render_section(
        &self,
        header: &str,
        bindings: &[(&str, &str)],
        rows: &[Rect],
        buf: &mut Buffer,
    ) {
        let Some((header_row, rest)) = rows.split_first() else {
            return;
        };
        Paragraph::new(Line::from(Span::styled(
            header.to_string(),
            Style::default()
                .fg(self.theme.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .render(*header_row, buf);

        for ((key, desc), row) in bindings.iter().zip(rest) {
            render_keybinding(*row, buf, key, desc, self.theme);
        }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" bikedash v{} ", VERSION))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        // padding, nav header + 6, padding, general header + 3, padding, summary, padding, hint
        let rows = Layout::vertical([Constraint::Length(1); 17]).split(inner);

        self.render_section("Navigation", NAVIGATION, &rows[1..8], buf);
        self.render_section("General", GENERAL, &rows[9..13], buf);

        if let Some(summary) = self.summary {
            let text = format!(
                "{} hourly · {} daily records",
                format_number(summary.hourly_rows as u64),
                format_number(summary.daily_rows as u64)
            );
            Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(self.theme.muted()),
            )))
            .alignment(Alignment::Center)
            .render(rows[14], buf);
        }

        Paragraph::new(Line::from(Span::styled(
            "Press ? to close",
            Style::default().fg(self.theme.muted()),
        )))
        .alignment(Alignment::Center)
        .render(rows[16], buf);
    }
}

/// Render a single keybinding line
fn render_keybinding(area: Rect, buf: &mut Buffer, key: &str, desc: &str, theme: Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!("  {:<18}", key),
            Style::default().fg(theme.accent()),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.text())),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Left)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_popup_centered_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup_area = HelpPopup::centered_area(area);

        assert_eq!(popup_area.width, POPUP_WIDTH);
        assert_eq!(popup_area.height, POPUP_HEIGHT);
        assert_eq!(popup_area.x, (100 - POPUP_WIDTH) / 2);
        assert_eq!(popup_area.y, (50 - POPUP_HEIGHT) / 2);
    }

    #[test]
    fn test_help_popup_small_terminal() {
        let area = Rect::new(0, 0, 30, 10);
        let popup_area = HelpPopup::centered_area(area);

        assert_eq!(popup_area.width, 30);
        assert_eq!(popup_area.height, 10);
    }

    #[test]
    fn test_help_lists_bindings_and_summary() {
        let area = Rect::new(0, 0, 100, 40);
        let popup_area = HelpPopup::centered_area(area);
        let mut buf = Buffer::empty(area);
        let summary = DatasetSummary {
            hourly_rows: 17379,
            daily_rows: 731,
            ..DatasetSummary::default()
        };
        HelpPopup::new(Theme::Dark)
            .with_summary(&summary)
            .render(popup_area, &mut buf);

        let content: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Navigation"));
        assert!(content.contains("Change season"));
        assert!(content.contains("Toggle explanation"));
        assert!(content.contains("17,379 hourly"));
        assert!(content.contains("Press ? to close"));
    }
}

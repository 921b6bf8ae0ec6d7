//! Explanation panel: the written conclusions for the active question

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::services::Question;
use crate::tui::theme::Theme;

const POPUP_WIDTH: u16 = 72;
const POPUP_HEIGHT: u16 = 20;

pub struct ExplanationPopup {
    question: Question,
    theme: Theme,
}

impl ExplanationPopup {
    pub fn new(question: Question, theme: Theme) -> Self {
        Self { question, theme }
    }

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
}

impl Widget for ExplanationPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" {} ", self.question.label()))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let mut lines = vec![
            Line::from(Span::styled(
                self.question.heading(),
                Style::default()
                    .fg(self.theme.text())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];
        for point in self.question.explanation() {
            lines.push(Line::from(vec![
                Span::styled("• ", Style::default().fg(self.theme.accent())),
                Span::styled(*point, Style::default().fg(self.theme.text())),
            ]));
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(
            "Press e to close",
            Style::default().fg(self.theme.muted()),
        )));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

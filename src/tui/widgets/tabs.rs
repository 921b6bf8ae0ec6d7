//! Tab bar widget for switching between dashboard questions

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::services::Question;
use crate::tui::theme::Theme;

/// Tab bar widget showing the three questions
pub struct TabBar {
    selected: Question,
    theme: Theme,
}

impl TabBar {
    pub fn new(selected: Question, theme: Theme) -> Self {
        Self { selected, theme }
    }

    fn display(question: Question, selected: bool) -> String {
        let n = Question::all()
            .iter()
            .position(|q| *q == question)
            .map_or(0, |i| i + 1);
        if selected {
            format!("[{} {}]", n, question.label())
        } else {
            format!("{} {}", n, question.label())
        }
    }
}

impl Widget for TabBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let total_width: u16 = Question::all()
            .iter()
            .map(|q| Self::display(*q, *q == self.selected).chars().count() as u16 + 2)
            .sum::<u16>()
            .saturating_sub(2);

        let mut x = area.x + (area.width.saturating_sub(total_width)) / 2;

        for question in Question::all() {
            let is_selected = *question == self.selected;
            let display = Self::display(*question, is_selected);
            let display_len = display.chars().count() as u16;
            if x + display_len > area.x + area.width {
                break;
            }

            let style = if is_selected {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted())
            };

            buf.set_string(x, area.y, &display, style);
            x += display_len + 2;
        }
    }
}

//! Two-handle range slider for hour and month windows

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::services::{month_abbrev, RangeSelection};
use crate::tui::theme::Theme;

/// Which end of the range the arrow keys move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliderHandle {
    #[default]
    Lo,
    Hi,
}

/// How slider values are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderScale {
    /// "08:00"
    Hour,
    /// "Jan"
    Month,
}

impl SliderScale {
    pub fn format(self, value: u8) -> String {
        match self {
            Self::Hour => format!("{:02}:00", value),
            Self::Month => month_abbrev(value).to_string(),
        }
    }
}

/// Label column width before the track
const LABEL_WIDTH: u16 = 8;

/// One-line range slider: `Hours   08:00 ──●━━━━━━●── 17:00`
pub struct RangeSlider<'a> {
    title: &'a str,
    range: RangeSelection,
    scale: SliderScale,
    active: SliderHandle,
    theme: Theme,
}

impl<'a> RangeSlider<'a> {
    pub fn new(title: &'a str, range: RangeSelection, scale: SliderScale, theme: Theme) -> Self {
        Self {
            title,
            range,
            scale,
            active: SliderHandle::default(),
            theme,
        }
    }

    pub fn active(mut self, handle: SliderHandle) -> Self {
        self.active = handle;
        self
    }

    /// Column offset of `value` on a track `width` cells wide
    fn position(&self, value: u8, width: u16) -> u16 {
        let (min, max) = self.range.bounds();
        if max <= min || width <= 1 {
            return 0;
        }
        let span = u32::from(max - min);
        let offset = u32::from(value.saturating_sub(min));
        ((offset * u32::from(width - 1) + span / 2) / span) as u16
    }
}

impl Widget for RangeSlider<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lo_text = self.scale.format(self.range.lo());
        let hi_text = self.scale.format(self.range.hi());
        let value_width = lo_text.len().max(hi_text.len()) as u16;

        // title, lo value, two spaces of padding, track, hi value
        let fixed = LABEL_WIDTH + value_width * 2 + 2;
        if area.height == 0 || area.width <= fixed + 2 {
            return;
        }
        let track_width = area.width - fixed;

        let text_style = Style::default().fg(self.theme.text());
        let handle_style = |handle: SliderHandle| {
            if handle == self.active {
                Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                text_style
            }
        };

        buf.set_string(
            area.x,
            area.y,
            format!("{:<w$}", self.title, w = LABEL_WIDTH as usize),
            Style::default().fg(self.theme.muted()),
        );

        let lo_x = area.x + LABEL_WIDTH;
        buf.set_string(
            lo_x,
            area.y,
            format!("{:>w$}", lo_text, w = value_width as usize),
            handle_style(SliderHandle::Lo),
        );

        let track_x = lo_x + value_width + 1;
        let lo_pos = self.position(self.range.lo(), track_width);
        let hi_pos = self.position(self.range.hi(), track_width);
        for i in 0..track_width {
            let (symbol, style) = if i == lo_pos {
                ("●", handle_style(SliderHandle::Lo))
            } else if i == hi_pos {
                ("●", handle_style(SliderHandle::Hi))
            } else if i > lo_pos && i < hi_pos {
                ("━", Style::default().fg(self.theme.accent()))
            } else {
                ("─", Style::default().fg(self.theme.muted()))
            };
            buf.set_string(track_x + i, area.y, symbol, style);
        }

        buf.set_string(
            track_x + track_width + 1,
            area.y,
            &hi_text,
            handle_style(SliderHandle::Hi),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::aggregator::{HOUR_BOUNDS, MONTH_BOUNDS};

    fn row(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_scale_format() {
        assert_eq!(SliderScale::Hour.format(8), "08:00");
        assert_eq!(SliderScale::Hour.format(23), "23:00");
        assert_eq!(SliderScale::Month.format(1), "Jan");
        assert_eq!(SliderScale::Month.format(12), "Dec");
    }

    #[test]
    fn test_position_spans_track() {
        let slider = RangeSlider::new(
            "Hours",
            RangeSelection::hours(),
            SliderScale::Hour,
            Theme::Dark,
        );
        assert_eq!(slider.position(0, 24), 0);
        assert_eq!(slider.position(23, 24), 23);
        assert_eq!(slider.position(23, 47), 46);
    }

    #[test]
    fn test_renders_values_and_handles() {
        let range = RangeSelection::new(8, 17, HOUR_BOUNDS).unwrap();
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        RangeSlider::new("Hours", range, SliderScale::Hour, Theme::Dark)
            .active(SliderHandle::Hi)
            .render(area, &mut buf);

        let text = row(&buf);
        assert!(text.starts_with("Hours"));
        assert!(text.contains("08:00"));
        assert!(text.contains("17:00"));
        assert_eq!(text.matches('●').count(), 2);
    }

    #[test]
    fn test_single_value_range_draws_one_handle() {
        let range = RangeSelection::new(6, 6, MONTH_BOUNDS).unwrap();
        let area = Rect::new(0, 0, 50, 1);
        let mut buf = Buffer::empty(area);
        RangeSlider::new("Months", range, SliderScale::Month, Theme::Light).render(area, &mut buf);

        let text = row(&buf);
        assert_eq!(text.matches('●').count(), 1);
        assert_eq!(text.matches("Jun").count(), 2);
    }

    #[test]
    fn test_narrow_area_is_noop() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        let hours = RangeSelection::hours();
        RangeSlider::new("Hours", hours, SliderScale::Hour, Theme::Dark).render(area, &mut buf);
        assert!(row(&buf).trim().is_empty());
    }
}

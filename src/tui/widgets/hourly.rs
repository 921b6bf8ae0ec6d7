//! Peak-hours page: hourly mean rentals, working days vs weekends

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition, Widget},
};

use super::page::PageChrome;
use super::slider::{RangeSlider, SliderHandle, SliderScale};
use crate::format::format_mean;
use crate::services::query::HourlyView;
use crate::services::Question;
use crate::tui::theme::Theme;
use crate::types::HourlyProfile;

const BINDINGS: &[(&str, &str)] = &[("←→", "Move"), ("[ ]", "Handle")];

pub struct HourlyPage<'a> {
    view: &'a HourlyView,
    handle: SliderHandle,
    theme: Theme,
}

impl<'a> HourlyPage<'a> {
    pub fn new(view: &'a HourlyView, handle: SliderHandle, theme: Theme) -> Self {
        Self {
            view,
            handle,
            theme,
        }
    }

    fn points(profile: &HourlyProfile) -> Vec<(f64, f64)> {
        profile
            .iter()
            .map(|(hour, mean)| (f64::from(*hour), *mean))
            .collect()
    }

    fn render_chart(&self, area: Rect, buf: &mut Buffer) {
        if area.height < 4 {
            return;
        }
        let working = Self::points(&self.view.working_day);
        let weekend = Self::points(&self.view.weekend);

        if working.is_empty() && weekend.is_empty() {
            buf.set_string(
                area.x,
                area.y,
                "No hourly records in this window",
                Style::default().fg(self.theme.muted()),
            );
            return;
        }

        let y_max = working
            .iter()
            .chain(&weekend)
            .fold(0.0_f64, |acc, (_, y)| acc.max(*y));
        let y_top = (y_max * 1.1).max(1.0);

        let (lo, hi) = (self.view.hours.lo(), self.view.hours.hi());
        // A single-hour window still needs a non-degenerate axis
        let x_bounds = if lo == hi {
            [f64::from(lo) - 0.5, f64::from(hi) + 0.5]
        } else {
            [f64::from(lo), f64::from(hi)]
        };
        let mid = (lo + hi) / 2;

        let datasets = vec![
            Dataset::default()
                .name("Working day")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.working_day()))
                .data(&working),
            Dataset::default()
                .name("Weekend")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.weekend()))
                .data(&weekend),
        ];

        let axis_style = Style::default().fg(self.theme.muted());
        let chart = Chart::new(datasets)
            .block(Block::default())
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Percentage(50), Constraint::Percentage(50)))
            .x_axis(
                Axis::default()
                    .title(Span::styled("Hour", axis_style))
                    .style(axis_style)
                    .bounds(x_bounds)
                    .labels(vec![
                        format!("{:02}:00", lo),
                        format!("{:02}:00", mid),
                        format!("{:02}:00", hi),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("Mean rentals", axis_style))
                    .style(axis_style)
                    .bounds([0.0, y_top])
                    .labels(vec![
                        "0".to_string(),
                        format_mean(y_top / 2.0),
                        format_mean(y_top),
                    ]),
            );
        chart.render(area, buf);
    }

    /// "Peak: 17:00 (200.0)" for each series
    fn render_peaks(&self, area: Rect, buf: &mut Buffer) {
        let mut x = area.x;
        for (name, profile, color) in [
            ("Working-day peak", &self.view.working_day, self.theme.working_day()),
            ("Weekend peak", &self.view.weekend, self.theme.weekend()),
        ] {
            let Some((hour, mean)) = peak(profile) else {
                continue;
            };
            let text = format!("{}: {:02}:00 ({})   ", name, hour, format_mean(mean));
            if x + text.len() as u16 > area.x + area.width {
                break;
            }
            buf.set_string(
                x,
                area.y,
                &text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
            x += text.len() as u16;
        }
    }
}

/// Busiest hour of a profile; ties go to the earlier hour
pub fn peak(profile: &HourlyProfile) -> Option<(u8, f64)> {
    profile
        .iter()
        .fold(None, |best: Option<(u8, f64)>, (hour, mean)| match best {
            Some((_, m)) if m >= *mean => best,
            _ => Some((*hour, *mean)),
        })
}

impl Widget for HourlyPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let areas = PageChrome::new(Question::HourlyPattern, self.theme)
            .controls_height(2)
            .bindings(BINDINGS)
            .render(area, buf);

        let controls = areas.controls;
        RangeSlider::new("Hours", self.view.hours, SliderScale::Hour, self.theme)
            .active(self.handle)
            .render(Rect { height: 1, ..controls }, buf);
        if controls.height > 1 {
            self.render_peaks(
                Rect {
                    y: controls.y + 1,
                    height: 1,
                    ..controls
                },
                buf,
            );
        }

        self.render_chart(areas.body, buf);
    }
}

//! Casual vs registered page: totals per day type and the monthly trend

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType, LegendPosition, Widget},
};

use super::page::PageChrome;
use super::selector::UserTypeRadio;
use super::slider::{RangeSlider, SliderHandle, SliderScale};
use crate::format::{format_bar, format_mean, format_number};
use crate::services::month_abbrev;
use crate::services::query::UserTypeView;
use crate::services::Question;
use crate::tui::theme::Theme;
use crate::types::Language;

const BINDINGS: &[(&str, &str)] = &[("b/c/r", "Riders"), ("←→", "Months"), ("[ ]", "Handle")];

const LABEL_WIDTH: usize = 24;
const VALUE_WIDTH: usize = 12;

pub struct UsersPage<'a> {
    view: &'a UserTypeView,
    handle: SliderHandle,
    language: Language,
    theme: Theme,
}

impl<'a> UsersPage<'a> {
    pub fn new(
        view: &'a UserTypeView,
        handle: SliderHandle,
        language: Language,
        theme: Theme,
    ) -> Self {
        Self {
            view,
            handle,
            language,
            theme,
        }
    }

    /// Grouped bars: one group per day type, one bar per visible rider group
    fn render_totals(&self, area: Rect, buf: &mut Buffer) {
        let filter = self.view.filter;
        let max = self.view.totals.iter().fold(0_u64, |acc, t| {
            let casual = if filter.shows_casual() { t.casual_total } else { 0 };
            let registered = if filter.shows_registered() {
                t.registered_total
            } else {
                0
            };
            acc.max(casual).max(registered)
        }) as f64;
        let bar_width = (area.width as usize).saturating_sub(LABEL_WIDTH + VALUE_WIDTH + 2);

        let mut y = area.y;
        let bottom = area.y + area.height;
        for total in &self.view.totals {
            let series = [
                (filter.shows_casual(), "Casual", total.casual_total, self.theme.casual()),
                (
                    filter.shows_registered(),
                    "Registered",
                    total.registered_total,
                    self.theme.registered(),
                ),
            ];
            for (shown, name, value, color) in series {
                if !shown || y >= bottom {
                    continue;
                }
                let label = format!("{} · {}", total.day_type.label(self.language), name);
                buf.set_string(
                    area.x,
                    y,
                    format!("{:<w$}", label, w = LABEL_WIDTH),
                    Style::default().fg(self.theme.text()),
                );
                buf.set_string(
                    area.x + LABEL_WIDTH as u16,
                    y,
                    format_bar(value as f64, max, bar_width),
                    Style::default().fg(color),
                );
                buf.set_string(
                    area.x + (LABEL_WIDTH + bar_width + 1) as u16,
                    y,
                    format!("{:>w$}", format_number(value), w = VALUE_WIDTH),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                );
                y += 1;
            }
            y += 1;
        }
    }

    fn render_trend(&self, area: Rect, buf: &mut Buffer) {
        if area.height < 4 {
            return;
        }
        let means = &self.view.monthly_means;
        if means.is_empty() {
            buf.set_string(
                area.x,
                area.y,
                "No daily records in this month window",
                Style::default().fg(self.theme.muted()),
            );
            return;
        }

        let casual: Vec<(f64, f64)> = means
            .iter()
            .map(|m| (f64::from(m.month), m.mean_casual))
            .collect();
        let registered: Vec<(f64, f64)> = means
            .iter()
            .map(|m| (f64::from(m.month), m.mean_registered))
            .collect();

        let filter = self.view.filter;
        let mut datasets = Vec::new();
        let mut y_max = 0.0_f64;
        if filter.shows_casual() {
            y_max = casual.iter().fold(y_max, |acc, (_, y)| acc.max(*y));
            datasets.push(
                Dataset::default()
                    .name("Casual")
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.theme.casual()))
                    .data(&casual),
            );
        }
        if filter.shows_registered() {
            y_max = registered.iter().fold(y_max, |acc, (_, y)| acc.max(*y));
            datasets.push(
                Dataset::default()
                    .name("Registered")
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.theme.registered()))
                    .data(&registered),
            );
        }
        let y_top = (y_max * 1.1).max(1.0);

        let (lo, hi) = (self.view.months.lo(), self.view.months.hi());
        let x_bounds = if lo == hi {
            [f64::from(lo) - 0.5, f64::from(hi) + 0.5]
        } else {
            [f64::from(lo), f64::from(hi)]
        };

        let axis_style = Style::default().fg(self.theme.muted());
        Chart::new(datasets)
            .legend_position(Some(LegendPosition::TopLeft))
            .hidden_legend_constraints((Constraint::Percentage(50), Constraint::Percentage(50)))
            .x_axis(
                Axis::default()
                    .title(Span::styled("Month", axis_style))
                    .style(axis_style)
                    .bounds(x_bounds)
                    .labels(vec![month_abbrev(lo), month_abbrev(hi)]),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled("Mean per day", axis_style))
                    .style(axis_style)
                    .bounds([0.0, y_top])
                    .labels(vec!["0".to_string(), format_mean(y_top)]),
            )
            .render(area, buf);
    }
}

impl Widget for UsersPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let areas = PageChrome::new(Question::UserTypeComparison, self.theme)
            .controls_height(2)
            .bindings(BINDINGS)
            .render(area, buf);

        let controls = areas.controls;
        let radio_row = Rect {
            height: 1,
            ..controls
        };
        UserTypeRadio::new(self.view.filter, self.theme).render(radio_row, buf);
        if controls.height > 1 {
            RangeSlider::new("Months", self.view.months, SliderScale::Month, self.theme)
                .active(self.handle)
                .render(
                    Rect {
                        y: controls.y + 1,
                        height: 1,
                        ..controls
                    },
                    buf,
                );
        }

        let shown = u16::from(self.view.filter.shows_casual())
            + u16::from(self.view.filter.shows_registered());
        let totals_height = (shown + 1) * self.view.totals.len() as u16 + 1;
        let [title, totals, trend_title, trend] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(totals_height),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(areas.body);

        buf.set_string(
            title.x,
            title.y,
            "Total rentals by day type",
            Style::default().fg(self.theme.muted()),
        );
        self.render_totals(
            Rect {
                y: totals.y + 1,
                height: totals.height.saturating_sub(1),
                ..totals
            },
            buf,
        );
        buf.set_string(
            trend_title.x,
            trend_title.y,
            format!(
                "Mean daily rentals per month, {}-{} ({} days)",
                month_abbrev(self.view.months.lo()),
                month_abbrev(self.view.months.hi()),
                self.view.trend.len()
            ),
            Style::default().fg(self.theme.muted()),
        );
        self.render_trend(trend, buf);
    }
}

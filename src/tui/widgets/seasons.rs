//! Season & weather page: mean daily rentals per weather condition

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::page::PageChrome;
use super::selector::SeasonSelector;
use crate::format::{format_bar, format_mean};
use crate::services::query::SeasonWeatherView;
use crate::services::Question;
use crate::tui::theme::Theme;
use crate::types::Language;

const BINDINGS: &[(&str, &str)] = &[("↑↓", "Season")];

/// Weather label column
const LABEL_WIDTH: usize = 14;
/// Mean value column
const VALUE_WIDTH: usize = 10;

pub struct SeasonsPage<'a> {
    view: &'a SeasonWeatherView,
    language: Language,
    theme: Theme,
}

impl<'a> SeasonsPage<'a> {
    pub fn new(view: &'a SeasonWeatherView, language: Language, theme: Theme) -> Self {
        Self {
            view,
            language,
            theme,
        }
    }

    /// One horizontal bar per weather condition, two rows apart
    fn render_bars(&self, area: Rect, buf: &mut Buffer) {
        if self.view.rows.is_empty() {
            buf.set_string(
                area.x,
                area.y,
                "No records for this season",
                Style::default().fg(self.theme.muted()),
            );
            return;
        }

        let max = self
            .view
            .rows
            .iter()
            .fold(0.0_f64, |acc, r| acc.max(r.mean_rental_count));
        let bar_width = (area.width as usize).saturating_sub(LABEL_WIDTH + VALUE_WIDTH + 2);

        for (i, row) in self.view.rows.iter().enumerate() {
            let y = area.y + (i as u16) * 2;
            if y >= area.y + area.height {
                break;
            }
            let color = self.theme.weather(row.weather);

            buf.set_string(
                area.x,
                y,
                format!("{:<w$}", row.weather.label(self.language), w = LABEL_WIDTH),
                Style::default().fg(self.theme.text()),
            );
            buf.set_string(
                area.x + LABEL_WIDTH as u16,
                y,
                format_bar(row.mean_rental_count, max, bar_width),
                Style::default().fg(color),
            );
            buf.set_string(
                area.x + (LABEL_WIDTH + bar_width + 1) as u16,
                y,
                format!(
                    "{:>w$}",
                    format_mean(row.mean_rental_count),
                    w = VALUE_WIDTH
                ),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }
    }
}

impl Widget for SeasonsPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let areas = PageChrome::new(Question::SeasonWeatherPattern, self.theme)
            .bindings(BINDINGS)
            .render(area, buf);

        SeasonSelector::new(self.view.season, self.language, self.theme)
            .render(areas.controls, buf);

        if areas.body.height > 0 {
            buf.set_string(
                areas.body.x,
                areas.body.y,
                "Mean daily rentals by weather",
                Style::default().fg(self.theme.muted()),
            );
            let bars = Rect {
                y: areas.body.y + 2,
                height: areas.body.height.saturating_sub(2),
                ..areas.body
            };
            self.render_bars(bars, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Season, SeasonWeatherAggregate, Weather};

    fn content(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    fn view() -> SeasonWeatherView {
        SeasonWeatherView {
            season: Season::Spring,
            rows: vec![
                SeasonWeatherAggregate {
                    season: Season::Spring,
                    weather: Weather::Clear,
                    mean_rental_count: 1349.0,
                },
                SeasonWeatherAggregate {
                    season: Season::Spring,
                    weather: Weather::Cloudy,
                    mean_rental_count: 893.0,
                },
            ],
        }
    }

    #[test]
    fn test_renders_bars_with_values() {
        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        SeasonsPage::new(&view(), Language::En, Theme::Dark).render(area, &mut buf);

        let text = content(&buf);
        assert!(text.contains("[2 Season & Weather]"));
        assert!(text.contains("▾ Spring"));
        assert!(text.contains("Mist/Cloudy"));
        assert!(text.contains("1,349.0"));
        assert!(text.contains("893.0"));
        assert!(!text.contains("Light rain"));
    }

    #[test]
    fn test_largest_mean_fills_bar() {
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        SeasonsPage::new(&view(), Language::En, Theme::Dark).render_bars(area, &mut buf);

        let first_row: String = (0..60).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(!first_row.contains('░'));
        let second_row: String = (0..60).map(|x| buf[(x, 2)].symbol().to_string()).collect();
        assert!(second_row.contains('░'));
    }

    #[test]
    fn test_empty_season() {
        let empty = SeasonWeatherView {
            season: Season::Winter,
            rows: Vec::new(),
        };
        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        SeasonsPage::new(&empty, Language::Id, Theme::Light).render(area, &mut buf);

        let text = content(&buf);
        assert!(text.contains("▾ Dingin"));
        assert!(text.contains("No records for this season"));
    }
}

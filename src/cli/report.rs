//! Plain-text tables for the report subcommands

use std::fmt::Write;

use crate::format::{format_bar, format_mean, format_number};
use crate::services::month_abbrev;
use crate::services::query::{DashboardView, HourlyView, SeasonWeatherView, UserTypeView};
use crate::types::{DatasetSummary, Language};

/// Width of the proportional bar column
const BAR_WIDTH: usize = 20;

pub fn render_view(view: &DashboardView, language: Language) -> String {
    let question = view.question();
    let mut out = format!("{}\n{}\n\n", question.label(), question.heading());
    match view {
        DashboardView::HourlyPattern(v) => render_hourly(&mut out, v),
        DashboardView::SeasonWeatherPattern(v) => render_season_weather(&mut out, v, language),
        DashboardView::UserTypeComparison(v) => render_user_type(&mut out, v, language),
    }
    out
}

fn render_hourly(out: &mut String, view: &HourlyView) {
    let max = view
        .working_day
        .values()
        .chain(view.weekend.values())
        .fold(0.0_f64, |acc, v| acc.max(*v));

    let _ = writeln!(
        out,
        "Hours {:02}:00-{:02}:00",
        view.hours.lo(),
        view.hours.hi()
    );
    let _ = writeln!(
        out,
        "{:<6}{:>14}  {:<w$}  {:>14}  {:<w$}",
        "Hour",
        "Working day",
        "",
        "Weekend",
        "",
        w = BAR_WIDTH
    );

    for hour in view.hours.lo()..=view.hours.hi() {
        let working = view.working_day.get(&hour).copied();
        let weekend = view.weekend.get(&hour).copied();
        if working.is_none() && weekend.is_none() {
            continue;
        }
        let _ = writeln!(
            out,
            "{:<6}{:>14}  {}  {:>14}  {}",
            format!("{:02}", hour),
            working.map(format_mean).unwrap_or_else(|| "-".into()),
            format_bar(working.unwrap_or(0.0), max, BAR_WIDTH),
            weekend.map(format_mean).unwrap_or_else(|| "-".into()),
            format_bar(weekend.unwrap_or(0.0), max, BAR_WIDTH),
        );
    }
}

fn render_season_weather(out: &mut String, view: &SeasonWeatherView, language: Language) {
    let _ = writeln!(out, "Season: {}", view.season.label(language));
    if view.rows.is_empty() {
        out.push_str("No records for this season.\n");
        return;
    }

    let max = view
        .rows
        .iter()
        .fold(0.0_f64, |acc, r| acc.max(r.mean_rental_count));
    let _ = writeln!(out, "{:<16}{:>14}", "Weather", "Mean rentals");
    for row in &view.rows {
        let _ = writeln!(
            out,
            "{:<16}{:>14}  {}",
            row.weather.label(language),
            format_mean(row.mean_rental_count),
            format_bar(row.mean_rental_count, max, BAR_WIDTH)
        );
    }
}

fn render_user_type(out: &mut String, view: &UserTypeView, language: Language) {
    let filter = view.filter;

    let _ = write!(out, "{:<14}", "Day type");
    if filter.shows_casual() {
        let _ = write!(out, "{:>14}", "Casual");
    }
    if filter.shows_registered() {
        let _ = write!(out, "{:>14}", "Registered");
    }
    out.push('\n');

    for row in &view.totals {
        let _ = write!(out, "{:<14}", row.day_type.label(language));
        if filter.shows_casual() {
            let _ = write!(out, "{:>14}", format_number(row.casual_total));
        }
        if filter.shows_registered() {
            let _ = write!(out, "{:>14}", format_number(row.registered_total));
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "\nMonthly trend {}-{} ({} days)",
        month_abbrev(view.months.lo()),
        month_abbrev(view.months.hi()),
        view.trend.len()
    );
    let _ = write!(out, "{:<8}{:>6}", "Month", "Days");
    if filter.shows_casual() {
        let _ = write!(out, "{:>14}", "Mean casual");
    }
    if filter.shows_registered() {
        let _ = write!(out, "{:>18}", "Mean registered");
    }
    out.push('\n');

    for mean in &view.monthly_means {
        let _ = write!(out, "{:<8}{:>6}", month_abbrev(mean.month), mean.days);
        if filter.shows_casual() {
            let _ = write!(out, "{:>14}", format_mean(mean.mean_casual));
        }
        if filter.shows_registered() {
            let _ = write!(out, "{:>18}", format_mean(mean.mean_registered));
        }
        out.push('\n');
    }
}

pub fn render_summary(summary: &DatasetSummary) -> String {
    format!(
        "Hourly records:   {}\n\
         Daily records:    {}\n\
         Casual rentals:   {}\n\
         Registered:       {}\n\
         Total rentals:    {}\n",
        format_number(summary.hourly_rows as u64),
        format_number(summary.daily_rows as u64),
        format_number(summary.casual_total),
        format_number(summary.registered_total),
        format_number(summary.rental_total),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::query::{RangeSelection, UserTypeFilter};
    use crate::types::{
        DayType, MonthlyUserMean, Season, SeasonWeatherAggregate, UserTypeAggregate, Weather,
    };
    use std::collections::BTreeMap;

    fn user_view(filter: UserTypeFilter) -> DashboardView {
        DashboardView::UserTypeComparison(UserTypeView {
            filter,
            totals: vec![UserTypeAggregate {
                day_type: DayType::Weekday,
                casual_total: 970,
                registered_total: 9879,
            }],
            months: RangeSelection::months(),
            trend: Vec::new(),
            monthly_means: vec![MonthlyUserMean {
                month: 4,
                mean_casual: 225.0,
                mean_registered: 2025.0,
                days: 2,
            }],
        })
    }

    #[test]
    fn test_hourly_skips_unobserved_hours() {
        let view = DashboardView::HourlyPattern(HourlyView {
            hours: RangeSelection::hours(),
            working_day: BTreeMap::from([(8, 100.0)]),
            weekend: BTreeMap::from([(8, 10.0), (13, 50.0)]),
        });

        let text = render_view(&view, Language::En);

        assert!(text.contains("Peak Hours"));
        assert!(text.contains("Hours 00:00-23:00"));
        let rows: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("08") || l.starts_with("13") || l.starts_with("09"))
            .collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("100.0"));
        assert!(rows[1].contains('-'));
    }

    #[test]
    fn test_season_weather_labels() {
        let view = DashboardView::SeasonWeatherPattern(SeasonWeatherView {
            season: Season::Summer,
            rows: vec![SeasonWeatherAggregate {
                season: Season::Summer,
                weather: Weather::Clear,
                mean_rental_count: 3000.0,
            }],
        });

        let en = render_view(&view, Language::En);
        assert!(en.contains("Season: Summer"));
        assert!(en.contains("3,000.0"));

        let id = render_view(&view, Language::Id);
        assert!(id.contains("Season: Panas"));
        assert!(id.contains("Cerah"));
    }

    #[test]
    fn test_season_weather_empty() {
        let view = DashboardView::SeasonWeatherPattern(SeasonWeatherView {
            season: Season::Winter,
            rows: Vec::new(),
        });
        assert!(render_view(&view, Language::En).contains("No records"));
    }

    #[test]
    fn test_user_type_filter_columns() {
        let both = render_view(&user_view(UserTypeFilter::Both), Language::En);
        assert!(both.contains("Casual"));
        assert!(both.contains("9,879"));
        assert!(both.contains("Monthly trend Jan-Dec"));
        assert!(both.contains("2,025.0"));

        let casual = render_view(&user_view(UserTypeFilter::Casual), Language::En);
        assert!(casual.contains("970"));
        assert!(casual.contains("Mean casual"));
        assert!(!casual.contains("    Registered"));
        assert!(!casual.contains("Mean registered"));
        assert!(!casual.contains("9,879"));

        let registered = render_view(&user_view(UserTypeFilter::Registered), Language::En);
        assert!(!registered.contains("Mean casual"));
        assert!(registered.contains("9,879"));
    }

    #[test]
    fn test_render_summary() {
        let text = render_summary(&DatasetSummary {
            hourly_rows: 17379,
            daily_rows: 731,
            casual_total: 620017,
            registered_total: 2672662,
            rental_total: 3292679,
        });
        assert!(text.contains("17,379"));
        assert!(text.contains("3,292,679"));
    }
}

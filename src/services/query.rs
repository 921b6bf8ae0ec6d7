//! Dashboard questions, user selections and view evaluation
//!
//! A [`DashboardQuery`] bundles everything a user can select. Evaluating it
//! against the shared [`Dataset`] produces a self-contained
//! [`DashboardView`]; nothing is remembered between evaluations.

use serde::Serialize;
use tracing::warn;

use super::aggregator::{validate_range, Aggregator, HOUR_BOUNDS, MONTH_BOUNDS};
use crate::types::{
    Dataset, HourlyProfile, MonthlyUserMean, MonthlyUserRow, Result, Season,
    SeasonWeatherAggregate, UserTypeAggregate,
};

/// The three questions the dashboard answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Question {
    #[default]
    HourlyPattern,
    SeasonWeatherPattern,
    UserTypeComparison,
}

impl Question {
    /// Short label for the tab bar
    pub fn label(self) -> &'static str {
        match self {
            Self::HourlyPattern => "Peak Hours",
            Self::SeasonWeatherPattern => "Season & Weather",
            Self::UserTypeComparison => "Casual vs Registered",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::HourlyPattern => "Is there a usage pattern showing busy and quiet hours?",
            Self::SeasonWeatherPattern => "Do rentals follow weather conditions and seasons?",
            Self::UserTypeComparison => "How do casual and registered riders differ?",
        }
    }

    /// Narrative shown in the explanation panel
    pub fn explanation(self) -> &'static [&'static str] {
        match self {
            Self::HourlyPattern => &[
                "Working days show a commuter profile: a sharp morning peak around 08:00 \
                 (07:00-09:00) and an evening peak around 17:00-18:00.",
                "Weekends have no sharp spikes. Rentals climb from late morning and stay \
                 high from 10:00 to 17:00, which points to leisure trips.",
                "Quiet hours are 00:00-05:00 for both day types, plus the working-day lull \
                 between 09:00 and 16:00 while riders are at work or school.",
            ],
            Self::SeasonWeatherPattern => &[
                "Clear weather always has the highest mean rentals, whatever the season.",
                "Summer and fall are the peak seasons, especially on clear days.",
                "Winter stays relatively high on clear and misty days, suggesting a \
                 commuter-heavy rider base.",
                "Light rain cuts rentals sharply in every season; the drop is smallest \
                 in fall.",
                "Spring trails summer by a wide margin on clear and misty days.",
            ],
            Self::UserTypeComparison => &[
                "On working days almost all rentals come from registered riders; casual \
                 riders are a small share.",
                "On weekends the casual share rises clearly, although registered riders \
                 still dominate.",
                "Registered rentals are high and steady all year with a mid-year peak \
                 (May-August). Casual rentals peak in the same months but swing harder \
                 with the season.",
                "Casual riders ride for leisure on weekends and warm months; registered \
                 riders use bikes as part of a daily routine.",
            ],
        }
    }

    pub fn all() -> &'static [Question] {
        &[
            Self::HourlyPattern,
            Self::SeasonWeatherPattern,
            Self::UserTypeComparison,
        ]
    }

    /// Next question (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::HourlyPattern => Self::SeasonWeatherPattern,
            Self::SeasonWeatherPattern => Self::UserTypeComparison,
            Self::UserTypeComparison => Self::HourlyPattern,
        }
    }

    /// Previous question (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Self::HourlyPattern => Self::UserTypeComparison,
            Self::SeasonWeatherPattern => Self::HourlyPattern,
            Self::UserTypeComparison => Self::SeasonWeatherPattern,
        }
    }

    /// Question from number key (1-3)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::HourlyPattern),
            2 => Some(Self::SeasonWeatherPattern),
            3 => Some(Self::UserTypeComparison),
            _ => None,
        }
    }
}

/// Validated inclusive range within fixed bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeSelection {
    lo: u8,
    hi: u8,
    #[serde(skip)]
    bounds: (u8, u8),
}

impl RangeSelection {
    pub fn new(lo: u8, hi: u8, bounds: (u8, u8)) -> Result<Self> {
        validate_range(lo, hi, bounds)?;
        Ok(Self { lo, hi, bounds })
    }

    /// Recover an invalid selection: clamp both ends into bounds, swap if reversed
    pub fn clamped(lo: i32, hi: i32, bounds: (u8, u8)) -> Self {
        let (min, max) = (i32::from(bounds.0), i32::from(bounds.1));
        let a = lo.clamp(min, max) as u8;
        let b = hi.clamp(min, max) as u8;
        let range = Self {
            lo: a.min(b),
            hi: a.max(b),
            bounds,
        };
        if (i32::from(range.lo), i32::from(range.hi)) != (lo, hi) {
            warn!(
                requested_lo = lo,
                requested_hi = hi,
                lo = range.lo,
                hi = range.hi,
                "range clamped"
            );
        }
        range
    }

    pub fn full(bounds: (u8, u8)) -> Self {
        Self {
            lo: bounds.0,
            hi: bounds.1,
            bounds,
        }
    }

    pub fn hours() -> Self {
        Self::full(HOUR_BOUNDS)
    }

    pub fn months() -> Self {
        Self::full(MONTH_BOUNDS)
    }

    pub fn lo(&self) -> u8 {
        self.lo
    }

    pub fn hi(&self) -> u8 {
        self.hi
    }

    pub fn bounds(&self) -> (u8, u8) {
        self.bounds
    }

    /// Move the lower end by `delta`, never past `hi` or the lower bound
    pub fn shift_lo(self, delta: i16) -> Self {
        let lo = (i16::from(self.lo) + delta).clamp(i16::from(self.bounds.0), i16::from(self.hi));
        Self {
            lo: lo as u8,
            ..self
        }
    }

    /// Move the upper end by `delta`, never below `lo` or past the upper bound
    pub fn shift_hi(self, delta: i16) -> Self {
        let hi = (i16::from(self.hi) + delta).clamp(i16::from(self.lo), i16::from(self.bounds.1));
        Self {
            hi: hi as u8,
            ..self
        }
    }
}

/// Which rider groups the user-type charts show (radio button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UserTypeFilter {
    #[default]
    Both,
    Casual,
    Registered,
}

impl UserTypeFilter {
    pub fn label(self) -> &'static str {
        match self {
            Self::Both => "Both",
            Self::Casual => "Casual",
            Self::Registered => "Registered",
        }
    }

    pub fn all() -> &'static [UserTypeFilter] {
        &[Self::Both, Self::Casual, Self::Registered]
    }

    pub fn shows_casual(self) -> bool {
        matches!(self, Self::Both | Self::Casual)
    }

    pub fn shows_registered(self) -> bool {
        matches!(self, Self::Both | Self::Registered)
    }
}

/// Everything a user can select in one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardQuery {
    pub question: Question,
    pub hours: RangeSelection,
    pub season: Season,
    pub user_type: UserTypeFilter,
    pub months: RangeSelection,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            question: Question::default(),
            hours: RangeSelection::hours(),
            season: Season::default(),
            user_type: UserTypeFilter::default(),
            months: RangeSelection::months(),
        }
    }
}

impl DashboardQuery {
    pub fn for_question(question: Question) -> Self {
        Self {
            question,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyView {
    pub hours: RangeSelection,
    pub working_day: HourlyProfile,
    pub weekend: HourlyProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonWeatherView {
    pub season: Season,
    pub rows: Vec<SeasonWeatherAggregate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTypeView {
    pub filter: UserTypeFilter,
    pub totals: Vec<UserTypeAggregate>,
    pub months: RangeSelection,
    pub trend: Vec<MonthlyUserRow>,
    pub monthly_means: Vec<MonthlyUserMean>,
}

/// Result of evaluating a query, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "question", rename_all = "snake_case")]
pub enum DashboardView {
    HourlyPattern(HourlyView),
    SeasonWeatherPattern(SeasonWeatherView),
    UserTypeComparison(UserTypeView),
}

impl DashboardView {
    pub fn question(&self) -> Question {
        match self {
            Self::HourlyPattern(_) => Question::HourlyPattern,
            Self::SeasonWeatherPattern(_) => Question::SeasonWeatherPattern,
            Self::UserTypeComparison(_) => Question::UserTypeComparison,
        }
    }
}

/// Answer the selected question from scratch
pub fn evaluate(dataset: &Dataset, query: &DashboardQuery) -> Result<DashboardView> {
    let view = match query.question {
        Question::HourlyPattern => {
            let (lo, hi) = (query.hours.lo(), query.hours.hi());
            let working_day = Aggregator::hourly_profile(dataset.hourly(), true);
            let weekend = Aggregator::hourly_profile(dataset.hourly(), false);
            DashboardView::HourlyPattern(HourlyView {
                hours: query.hours,
                working_day: Aggregator::filter_hour_range(&working_day, lo, hi)?,
                weekend: Aggregator::filter_hour_range(&weekend, lo, hi)?,
            })
        }
        Question::SeasonWeatherPattern => {
            let aggregates = Aggregator::by_season_weather(dataset.daily());
            DashboardView::SeasonWeatherPattern(SeasonWeatherView {
                season: query.season,
                rows: Aggregator::season_weather_for(&aggregates, query.season),
            })
        }
        Question::UserTypeComparison => {
            let trend = Aggregator::monthly_user_trend(
                dataset.daily(),
                query.months.lo(),
                query.months.hi(),
            )?;
            DashboardView::UserTypeComparison(UserTypeView {
                filter: query.user_type,
                totals: Aggregator::user_type_by_day_type(dataset.daily()),
                months: query.months,
                monthly_means: Aggregator::monthly_user_means(&trend),
                trend,
            })
        }
    };
    Ok(view)
}

//! Record and aggregate types for the bike-sharing dataset

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display language for categorical labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    /// Indonesian, the labels the dataset was first published with
    Id,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Map a dataset code (1..=4)
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Spring),
            2 => Some(Self::Summer),
            3 => Some(Self::Fall),
            4 => Some(Self::Winter),
            _ => None,
        }
    }

    pub fn all() -> &'static [Season] {
        &[Self::Spring, Self::Summer, Self::Fall, Self::Winter]
    }

    pub fn label(self, language: Language) -> &'static str {
        match (language, self) {
            (Language::En, Self::Spring) => "Spring",
            (Language::En, Self::Summer) => "Summer",
            (Language::En, Self::Fall) => "Fall",
            (Language::En, Self::Winter) => "Winter",
            (Language::Id, Self::Spring) => "Semi",
            (Language::Id, Self::Summer) => "Panas",
            (Language::Id, Self::Fall) => "Gugur",
            (Language::Id, Self::Winter) => "Dingin",
        }
    }

    /// Next season in dropdown order (wrapping)
    pub fn next(self) -> Self {
        match self {
            Self::Spring => Self::Summer,
            Self::Summer => Self::Fall,
            Self::Fall => Self::Winter,
            Self::Winter => Self::Spring,
        }
    }

    /// Previous season in dropdown order (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Self::Spring => Self::Winter,
            Self::Summer => Self::Spring,
            Self::Fall => Self::Summer,
            Self::Winter => Self::Fall,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Clear,
    Cloudy,
    LightRain,
}

impl Weather {
    /// Map a `weathersit` code (1..=3)
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Clear),
            2 => Some(Self::Cloudy),
            3 => Some(Self::LightRain),
            _ => None,
        }
    }

    pub fn all() -> &'static [Weather] {
        &[Self::Clear, Self::Cloudy, Self::LightRain]
    }

    pub fn label(self, language: Language) -> &'static str {
        match (language, self) {
            (Language::En, Self::Clear) => "Clear",
            (Language::En, Self::Cloudy) => "Mist/Cloudy",
            (Language::En, Self::LightRain) => "Light rain",
            (Language::Id, Self::Clear) => "Cerah",
            (Language::Id, Self::Cloudy) => "Kabut Berawan",
            (Language::Id, Self::LightRain) => "Hujan Ringan",
        }
    }
}

/// Partition of days by the `workingday` flag
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn from_working_day(is_working_day: bool) -> Self {
        if is_working_day {
            Self::Weekday
        } else {
            Self::Weekend
        }
    }

    pub fn label(self, language: Language) -> &'static str {
        match (language, self) {
            (Language::En, Self::Weekday) => "Weekday",
            (Language::En, Self::Weekend) => "Weekend",
            (Language::Id, Self::Weekday) => "Hari Kerja",
            (Language::Id, Self::Weekend) => "Akhir Pekan",
        }
    }
}

/// One row of `hour.csv`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyRecord {
    pub hour: u8,
    pub is_working_day: bool,
    pub rental_count: u32,
}

/// One row of `day.csv` with the raw numeric codes, before label mapping
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyRow {
    pub season: u32,
    pub weathersit: u32,
    pub workingday: u32,
    pub mnth: u32,
    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,
}

/// A daily row with categorical codes mapped to labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyRecord {
    pub season: Season,
    pub weather: Weather,
    pub month: u8,
    pub is_working_day: bool,
    pub casual_count: u32,
    pub registered_count: u32,
    pub total_count: u32,
}

/// Immutable handle over both loaded tables.
///
/// Built once at startup and shared by reference with every aggregation.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    hourly: Vec<HourlyRecord>,
    daily: Vec<DailyRecord>,
}

impl Dataset {
    pub fn new(hourly: Vec<HourlyRecord>, daily: Vec<DailyRecord>) -> Self {
        Self { hourly, daily }
    }

    pub fn hourly(&self) -> &[HourlyRecord] {
        &self.hourly
    }

    pub fn daily(&self) -> &[DailyRecord] {
        &self.daily
    }
}

/// Mean rentals per hour of day; hours without observations are absent
pub type HourlyProfile = BTreeMap<u8, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonWeatherAggregate {
    pub season: Season,
    pub weather: Weather,
    pub mean_rental_count: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserTypeAggregate {
    pub day_type: DayType,
    pub casual_total: u64,
    pub registered_total: u64,
}

impl UserTypeAggregate {
    pub fn total(&self) -> u64 {
        self.casual_total.saturating_add(self.registered_total)
    }
}

/// A single day's user counts within a month-range trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyUserRow {
    pub month: u8,
    pub casual_count: u32,
    pub registered_count: u32,
}

/// Per-month means of a trend (the series drawn by the trend chart)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyUserMean {
    pub month: u8,
    pub mean_casual: f64,
    pub mean_registered: f64,
    pub days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DatasetSummary {
    pub hourly_rows: usize,
    pub daily_rows: usize,
    pub casual_total: u64,
    pub registered_total: u64,
    pub rental_total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_codes() {
        assert_eq!(Season::from_code(1), Some(Season::Spring));
        assert_eq!(Season::from_code(4), Some(Season::Winter));
        assert_eq!(Season::from_code(0), None);
        assert_eq!(Season::from_code(5), None);
    }

    #[test]
    fn test_weather_codes() {
        assert_eq!(Weather::from_code(1), Some(Weather::Clear));
        assert_eq!(Weather::from_code(3), Some(Weather::LightRain));
        // Heavy rain (4) exists in the raw data dictionary but has no label
        assert_eq!(Weather::from_code(4), None);
    }

    #[test]
    fn test_season_cycle() {
        assert_eq!(Season::Spring.next(), Season::Summer);
        assert_eq!(Season::Winter.next(), Season::Spring);
        assert_eq!(Season::Spring.prev(), Season::Winter);
        assert_eq!(Season::Fall.prev(), Season::Summer);
    }

    #[test]
    fn test_labels_by_language() {
        assert_eq!(Season::Summer.label(Language::En), "Summer");
        assert_eq!(Season::Summer.label(Language::Id), "Panas");
        assert_eq!(Weather::Cloudy.label(Language::Id), "Kabut Berawan");
        assert_eq!(DayType::Weekend.label(Language::Id), "Akhir Pekan");
    }

    #[test]
    fn test_day_type_from_flag() {
        assert_eq!(DayType::from_working_day(true), DayType::Weekday);
        assert_eq!(DayType::from_working_day(false), DayType::Weekend);
    }

    #[test]
    fn test_dataset_accessors() {
        let dataset = Dataset::new(
            vec![HourlyRecord {
                hour: 8,
                is_working_day: true,
                rental_count: 50,
            }],
            Vec::new(),
        );
        assert_eq!(dataset.hourly().len(), 1);
        assert!(dataset.daily().is_empty());
        assert!(Dataset::default().hourly().is_empty());
    }

    #[test]
    fn test_user_type_total() {
        let row = UserTypeAggregate {
            day_type: DayType::Weekday,
            casual_total: 10,
            registered_total: 32,
        };
        assert_eq!(row.total(), 42);
    }

    #[test]
    fn test_enum_json_names() {
        assert_eq!(
            serde_json::to_string(&Weather::LightRain).unwrap(),
            "\"light_rain\""
        );
        assert_eq!(serde_json::to_string(&Language::Id).unwrap(), "\"id\"");
    }
}

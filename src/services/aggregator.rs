//! Aggregator service for computing rental statistics
//!
//! Every function is pure: the inputs are borrowed, never mutated, and the
//! same inputs always produce the same output.

use std::collections::BTreeMap;

use crate::types::{
    DailyRecord, DashError, Dataset, DatasetSummary, DayType, HourlyProfile, HourlyRecord,
    MonthlyUserMean, MonthlyUserRow, Result, Season, SeasonWeatherAggregate, UserTypeAggregate,
    Weather,
};

/// Inclusive domain of an hour-of-day range
pub const HOUR_BOUNDS: (u8, u8) = (0, 23);

/// Inclusive domain of a month range
pub const MONTH_BOUNDS: (u8, u8) = (1, 12);

/// Check `min <= lo <= hi <= max`
pub fn validate_range(lo: u8, hi: u8, (min, max): (u8, u8)) -> Result<()> {
    if lo > hi || lo < min || hi > max {
        return Err(DashError::InvalidRange { lo, hi, min, max });
    }
    Ok(())
}

/// Running sum/count pair for means
#[derive(Debug, Clone, Copy, Default)]
struct MeanAcc {
    sum: u64,
    count: u64,
}

impl MeanAcc {
    fn add(&mut self, value: u32) {
        self.sum = self.sum.saturating_add(u64::from(value));
        self.count = self.count.saturating_add(1);
    }

    fn mean(self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

/// Aggregator for computing rental statistics
pub struct Aggregator;

impl Aggregator {
    /// Mean `total_count` per observed (season, weather) pair, in enum order
    pub fn by_season_weather(records: &[DailyRecord]) -> Vec<SeasonWeatherAggregate> {
        let mut groups: BTreeMap<(Season, Weather), MeanAcc> = BTreeMap::new();

        for record in records {
            groups
                .entry((record.season, record.weather))
                .or_default()
                .add(record.total_count);
        }

        groups
            .into_iter()
            .map(|((season, weather), acc)| SeasonWeatherAggregate {
                season,
                weather,
                mean_rental_count: acc.mean(),
            })
            .collect()
    }

    /// Rows of one season (the dropdown selection)
    pub fn season_weather_for(
        aggregates: &[SeasonWeatherAggregate],
        season: Season,
    ) -> Vec<SeasonWeatherAggregate> {
        aggregates
            .iter()
            .filter(|a| a.season == season)
            .copied()
            .collect()
    }

    /// Mean rentals per hour for one day-type partition.
    /// Hours with no observations are left out.
    pub fn hourly_profile(records: &[HourlyRecord], is_working_day: bool) -> HourlyProfile {
        let mut hours: BTreeMap<u8, MeanAcc> = BTreeMap::new();

        for record in records
            .iter()
            .filter(|r| r.is_working_day == is_working_day)
        {
            hours.entry(record.hour).or_default().add(record.rental_count);
        }

        hours
            .into_iter()
            .map(|(hour, acc)| (hour, acc.mean()))
            .collect()
    }

    /// Keep hours in `[lo, hi]` (inclusive)
    pub fn filter_hour_range(profile: &HourlyProfile, lo: u8, hi: u8) -> Result<HourlyProfile> {
        validate_range(lo, hi, HOUR_BOUNDS)?;
        Ok(profile
            .range(lo..=hi)
            .map(|(hour, mean)| (*hour, *mean))
            .collect())
    }

    /// Casual/registered totals per day-type: Weekday first, then Weekend.
    /// A day-type absent from the input gets no row.
    pub fn user_type_by_day_type(records: &[DailyRecord]) -> Vec<UserTypeAggregate> {
        let mut groups: BTreeMap<DayType, UserTypeAggregate> = BTreeMap::new();

        for record in records {
            let day_type = DayType::from_working_day(record.is_working_day);
            let row = groups.entry(day_type).or_insert(UserTypeAggregate {
                day_type,
                casual_total: 0,
                registered_total: 0,
            });
            row.casual_total = row
                .casual_total
                .saturating_add(u64::from(record.casual_count));
            row.registered_total = row
                .registered_total
                .saturating_add(u64::from(record.registered_count));
        }

        groups.into_values().collect()
    }

    /// One row per day with month in `[lo, hi]`, sorted by month.
    /// Days within a month keep their source order.
    pub fn monthly_user_trend(
        records: &[DailyRecord],
        lo: u8,
        hi: u8,
    ) -> Result<Vec<MonthlyUserRow>> {
        validate_range(lo, hi, MONTH_BOUNDS)?;

        let mut rows: Vec<MonthlyUserRow> = records
            .iter()
            .filter(|r| (lo..=hi).contains(&r.month))
            .map(|r| MonthlyUserRow {
                month: r.month,
                casual_count: r.casual_count,
                registered_count: r.registered_count,
            })
            .collect();

        // sort_by_key is stable
        rows.sort_by_key(|r| r.month);
        Ok(rows)
    }

    /// Per-month means of a trend, sorted by month
    pub fn monthly_user_means(rows: &[MonthlyUserRow]) -> Vec<MonthlyUserMean> {
        let mut months: BTreeMap<u8, (MeanAcc, MeanAcc)> = BTreeMap::new();

        for row in rows {
            let (casual, registered) = months.entry(row.month).or_default();
            casual.add(row.casual_count);
            registered.add(row.registered_count);
        }

        months
            .into_iter()
            .map(|(month, (casual, registered))| MonthlyUserMean {
                month,
                mean_casual: casual.mean(),
                mean_registered: registered.mean(),
                days: casual.count as u32,
            })
            .collect()
    }

    /// Row counts and rental totals for the about panel
    pub fn summary(dataset: &Dataset) -> DatasetSummary {
        let mut summary = DatasetSummary {
            hourly_rows: dataset.hourly().len(),
            daily_rows: dataset.daily().len(),
            ..DatasetSummary::default()
        };

        for record in dataset.daily() {
            summary.casual_total = summary
                .casual_total
                .saturating_add(u64::from(record.casual_count));
            summary.registered_total = summary
                .registered_total
                .saturating_add(u64::from(record.registered_count));
            summary.rental_total = summary
                .rental_total
                .saturating_add(u64::from(record.total_count));
        }

        summary
    }
}

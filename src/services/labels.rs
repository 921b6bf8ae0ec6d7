//! Categorical label mapping
//!
//! Turns the raw numeric codes of `day.csv` into typed labels. Codes outside
//! the known sets are rejected instead of passed through.

use crate::types::{DailyRecord, DailyRow, DashError, Result, Season, Weather};

/// Map every daily row to a labelled record.
///
/// Fails on the first unmapped code, reporting the 1-based data row.
///
/// # Examples
/// ```
/// use bikedash::services::labels::map_categorical_labels;
/// use bikedash::types::{DailyRow, Season, Weather};
///
/// let rows = vec![DailyRow {
///     season: 2,
///     weathersit: 1,
///     workingday: 1,
///     mnth: 6,
///     casual: 40,
///     registered: 60,
///     cnt: 100,
/// }];
/// let records = map_categorical_labels(&rows).unwrap();
/// assert_eq!(records[0].season, Season::Summer);
/// assert_eq!(records[0].weather, Weather::Clear);
/// ```
pub fn map_categorical_labels(rows: &[DailyRow]) -> Result<Vec<DailyRecord>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| map_row(row, i + 1))
        .collect()
}

fn map_row(row: &DailyRow, row_number: usize) -> Result<DailyRecord> {
    let unmapped = |column: &'static str, code: u32| DashError::UnmappedValue {
        column,
        code,
        row: row_number,
    };

    let season = Season::from_code(row.season).ok_or_else(|| unmapped("season", row.season))?;
    let weather =
        Weather::from_code(row.weathersit).ok_or_else(|| unmapped("weathersit", row.weathersit))?;
    let is_working_day =
        working_day_flag(row.workingday).ok_or_else(|| unmapped("workingday", row.workingday))?;
    let month = month_code(row.mnth).ok_or_else(|| unmapped("mnth", row.mnth))?;

    Ok(DailyRecord {
        season,
        weather,
        month,
        is_working_day,
        casual_count: row.casual,
        registered_count: row.registered,
        total_count: row.cnt,
    })
}

/// `workingday` is a 0/1 flag in both files
pub fn working_day_flag(code: u32) -> Option<bool> {
    match code {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

fn month_code(code: u32) -> Option<u8> {
    u8::try_from(code).ok().filter(|m| (1..=12).contains(m))
}

/// Three-letter month name for chart axes ("Jan" .. "Dec"); "?" when out of range
pub fn month_abbrev(month: u8) -> &'static str {
    chrono::Month::try_from(month)
        .map(|m| &m.name()[..3])
        .unwrap_or("?")
}

//! Dataset loading service for CLI and TUI
//!
//! Reads `hour.csv` and `day.csv`, checks the required columns, validates the
//! hourly domain, and maps the daily categorical codes. Loading is
//! all-or-nothing: any failure discards both tables.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::services::labels::{map_categorical_labels, working_day_flag};
use crate::types::{DailyRow, DashError, Dataset, HourlyRecord, Result};

/// Columns `hour.csv` must carry (others are ignored)
pub const HOURLY_COLUMNS: &[&str] = &["hr", "workingday", "cnt"];

/// Columns `day.csv` must carry (others are ignored)
pub const DAILY_COLUMNS: &[&str] = &[
    "season",
    "weathersit",
    "workingday",
    "mnth",
    "casual",
    "registered",
    "cnt",
];

#[derive(Debug, Deserialize)]
struct HourlyRow {
    hr: u32,
    workingday: u32,
    cnt: u32,
}

/// Loading stage, reported to the TUI spinner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Reading,
    Mapping,
}

impl LoadStage {
    pub fn message(self) -> &'static str {
        match self {
            Self::Reading => "Reading CSV files...",
            Self::Mapping => "Mapping labels...",
        }
    }
}

/// Read both tables in parallel. Returns hourly records and raw daily rows.
pub fn load_datasets(
    hourly_path: &Path,
    daily_path: &Path,
) -> Result<(Vec<HourlyRecord>, Vec<DailyRow>)> {
    let (hourly, daily) = rayon::join(|| read_hourly(hourly_path), || read_daily(daily_path));
    Ok((hourly?, daily?))
}

/// Read and validate `hour.csv`
pub fn read_hourly(path: &Path) -> Result<Vec<HourlyRecord>> {
    let rows: Vec<HourlyRow> = read_csv(path, HOURLY_COLUMNS)?;
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| hourly_record(path, row, i + 1))
        .collect()
}

/// Read `day.csv` without mapping its codes
pub fn read_daily(path: &Path) -> Result<Vec<DailyRow>> {
    read_csv(path, DAILY_COLUMNS)
}

fn hourly_record(path: &Path, row: HourlyRow, row_number: usize) -> Result<HourlyRecord> {
    let hour = u8::try_from(row.hr)
        .ok()
        .filter(|h| *h <= 23)
        .ok_or_else(|| {
            DashError::load(
                path,
                format!("row {}: hour {} outside 0..=23", row_number, row.hr),
            )
        })?;
    let is_working_day =
        working_day_flag(row.workingday).ok_or(DashError::UnmappedValue {
            column: "workingday",
            code: row.workingday,
            row: row_number,
        })?;

    Ok(HourlyRecord {
        hour,
        is_working_day,
        rental_count: row.cnt,
    })
}

fn read_csv<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| DashError::load(path, e.to_string()))?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| DashError::load(path, e.to_string()))?
        .clone();
    if let Some(missing) = required
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(DashError::load(
            path,
            format!("missing required column `{}`", missing),
        ));
    }

    reader
        .deserialize()
        .map(|row| row.map_err(|e| DashError::load(path, e.to_string())))
        .collect()
}

/// Loads the immutable [`Dataset`] handle from configured paths
#[derive(Debug, Clone)]
pub struct DataLoaderService {
    hourly_path: PathBuf,
    daily_path: PathBuf,
}

impl DataLoaderService {
    pub fn new(hourly_path: impl Into<PathBuf>, daily_path: impl Into<PathBuf>) -> Self {
        Self {
            hourly_path: hourly_path.into(),
            daily_path: daily_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.hourly_path, &config.daily_path)
    }

    pub fn load(&self) -> Result<Dataset> {
        self.load_with_progress(|_| {})
    }

    /// Load both tables, reporting each stage before it starts
    pub fn load_with_progress(&self, mut on_stage: impl FnMut(LoadStage)) -> Result<Dataset> {
        let started = Instant::now();

        on_stage(LoadStage::Reading);
        let (hourly, rows) = load_datasets(&self.hourly_path, &self.daily_path)?;
        debug!(
            hourly_rows = hourly.len(),
            daily_rows = rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "read dataset files"
        );

        on_stage(LoadStage::Mapping);
        let daily = map_categorical_labels(&rows)?;

        Ok(Dataset::new(hourly, daily))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Season, Weather};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    fn temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_hourly_fixture() {
        let records = read_hourly(&fixture("hour.csv")).unwrap();
        assert_eq!(records.len(), 7);
        assert_eq!(
            records[0],
            HourlyRecord {
                hour: 0,
                is_working_day: false,
                rental_count: 16
            }
        );
        assert_eq!(records[6].hour, 17);
        assert!(records[6].is_working_day);
    }

    #[test]
    fn test_read_daily_fixture() {
        let rows = read_daily(&fixture("day.csv")).unwrap();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].season, 1);
        assert_eq!(rows[0].weathersit, 2);
        assert_eq!(rows[0].cnt, 985);
    }

    #[test]
    fn test_load_service_maps_labels() {
        let service = DataLoaderService::new(fixture("hour.csv"), fixture("day.csv"));
        let dataset = service.load().unwrap();
        assert_eq!(dataset.hourly().len(), 7);
        assert_eq!(dataset.daily().len(), 8);
        assert_eq!(dataset.daily()[3].season, Season::Summer);
        assert_eq!(dataset.daily()[5].weather, Weather::LightRain);
    }

    #[test]
    fn test_load_reports_stages_in_order() {
        let service = DataLoaderService::new(fixture("hour.csv"), fixture("day.csv"));
        let mut stages = Vec::new();
        service.load_with_progress(|s| stages.push(s)).unwrap();
        assert_eq!(stages, vec![LoadStage::Reading, LoadStage::Mapping]);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = read_hourly(Path::new("tests/fixtures/nonexistent.csv")).unwrap_err();
        assert!(matches!(err, DashError::Load { .. }));
    }

    #[test]
    fn test_missing_required_column() {
        let file = temp_csv("hr,workingday\n8,1\n");
        let err = read_hourly(file.path()).unwrap_err();
        assert!(err.to_string().contains("missing required column `cnt`"));
    }

    #[test]
    fn test_empty_file_has_no_header() {
        let file = temp_csv("");
        let err = read_daily(file.path()).unwrap_err();
        assert!(matches!(err, DashError::Load { .. }));
    }

    #[test]
    fn test_unparsable_value() {
        let file = temp_csv("hr,workingday,cnt\n8,1,many\n");
        let err = read_hourly(file.path()).unwrap_err();
        assert!(matches!(err, DashError::Load { .. }));
    }

    #[test]
    fn test_negative_count_rejected() {
        let file = temp_csv("hr,workingday,cnt\n8,1,-3\n");
        assert!(read_hourly(file.path()).is_err());
    }

    #[test]
    fn test_hour_out_of_range() {
        let file = temp_csv("hr,workingday,cnt\n24,1,3\n");
        let err = read_hourly(file.path()).unwrap_err();
        assert!(err.to_string().contains("hour 24 outside 0..=23"));
    }

    #[test]
    fn test_hourly_working_day_flag_unmapped() {
        let file = temp_csv("hr,workingday,cnt\n3,1,3\n4,2,3\n");
        let err = read_hourly(file.path()).unwrap_err();
        assert!(matches!(
            err,
            DashError::UnmappedValue {
                column: "workingday",
                code: 2,
                row: 2
            }
        ));
    }

    #[test]
    fn test_extra_columns_and_order_ignored() {
        let file = temp_csv("cnt,note,workingday,hr\n12,x,0,23\n");
        let records = read_hourly(file.path()).unwrap();
        assert_eq!(
            records,
            vec![HourlyRecord {
                hour: 23,
                is_working_day: false,
                rental_count: 12
            }]
        );
    }

    #[test]
    fn test_all_or_nothing_when_daily_missing() {
        let service = DataLoaderService::new(fixture("hour.csv"), fixture("missing-day.csv"));
        assert!(service.load().is_err());
    }

    #[test]
    fn test_unmapped_daily_code_fails_load() {
        let file = temp_csv(
            "season,weathersit,workingday,mnth,casual,registered,cnt\n\
             1,1,1,1,1,2,3\n\
             9,1,1,1,1,2,3\n",
        );
        let service = DataLoaderService::new(fixture("hour.csv"), file.path());
        let err = service.load().unwrap_err();
        assert!(matches!(
            err,
            DashError::UnmappedValue {
                column: "season",
                code: 9,
                row: 2
            }
        ));
    }

    #[test]
    fn test_load_stage_messages() {
        assert_eq!(LoadStage::Reading.message(), "Reading CSV files...");
        assert_eq!(LoadStage::Mapping.message(), "Mapping labels...");
    }
}

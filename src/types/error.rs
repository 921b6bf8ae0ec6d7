use std::path::PathBuf;

use thiserror::Error;

/// bikedash error types
#[derive(Error, Debug)]
pub enum DashError {
    /// Dataset file missing, unreadable, or not matching the expected schema
    #[error("failed to load {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// Categorical code outside the known label set
    #[error("unmapped {column} code {code} at row {row}")]
    UnmappedValue {
        column: &'static str,
        code: u32,
        row: usize,
    },

    /// Range bounds reversed or outside the allowed domain
    #[error("invalid range [{lo}, {hi}]: expected {min} <= lo <= hi <= {max}")]
    InvalidRange { lo: u8, hi: u8, min: u8, max: u8 },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

impl DashError {
    pub fn load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for bikedash
pub type Result<T> = std::result::Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_display() {
        let err = DashError::load("data/day.csv", "missing required column `cnt`");
        assert_eq!(
            err.to_string(),
            "failed to load data/day.csv: missing required column `cnt`"
        );
    }

    #[test]
    fn test_unmapped_value_display() {
        let err = DashError::UnmappedValue {
            column: "season",
            code: 7,
            row: 3,
        };
        assert_eq!(err.to_string(), "unmapped season code 7 at row 3");
    }

    #[test]
    fn test_invalid_range_display() {
        let err = DashError::InvalidRange {
            lo: 5,
            hi: 2,
            min: 0,
            max: 23,
        };
        assert_eq!(
            err.to_string(),
            "invalid range [5, 2]: expected 0 <= lo <= hi <= 23"
        );
    }
}

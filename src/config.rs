//! Layered configuration
//!
//! Precedence, lowest first: built-in defaults, `~/.bikedash/config.json`,
//! the `BIKEDASH_DATA_DIR` environment variable, command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::types::{DashError, Language, Result};

/// Environment variable naming a directory that holds `hour.csv` and `day.csv`
pub const DATA_DIR_ENV: &str = "BIKEDASH_DATA_DIR";

pub const HOURLY_FILE: &str = "hour.csv";
pub const DAILY_FILE: &str = "day.csv";

/// Terminal color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hourly_path: PathBuf,
    pub daily_path: PathBuf,
    pub theme: ThemeChoice,
    pub language: Language,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = Path::new("data");
        Self {
            hourly_path: data_dir.join(HOURLY_FILE),
            daily_path: data_dir.join(DAILY_FILE),
            theme: ThemeChoice::default(),
            language: Language::default(),
        }
    }
}

/// `~/.bikedash`, or None when the home directory cannot be determined
pub fn app_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".bikedash"))
}

impl Config {
    /// Path of the user config file
    pub fn default_path() -> Option<PathBuf> {
        app_dir().map(|dir| dir.join("config.json"))
    }

    /// Defaults overlaid with the user config file and environment
    pub fn load() -> Result<Self> {
        let config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        Ok(config.with_env(std::env::var(DATA_DIR_ENV).ok()))
    }

    /// Read a config file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| DashError::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| DashError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Apply a `BIKEDASH_DATA_DIR` value (ignored when empty)
    pub fn with_env(self, data_dir: Option<String>) -> Self {
        match data_dir {
            Some(dir) if !dir.trim().is_empty() => self.with_data_dir(Path::new(dir.trim())),
            _ => self,
        }
    }

    /// Point both files at `dir/hour.csv` and `dir/day.csv`
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.hourly_path = dir.join(HOURLY_FILE);
        self.daily_path = dir.join(DAILY_FILE);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.hourly_path, PathBuf::from("data/hour.csv"));
        assert_eq!(config.daily_path, PathBuf::from("data/day.csv"));
        assert_eq!(config.theme, ThemeChoice::Auto);
        assert_eq!(config.language, Language::En);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"theme": "light", "language": "id"}}"#).unwrap();

        let config = Config::load_from(file.path()).unwrap();

        assert_eq!(config.theme, ThemeChoice::Light);
        assert_eq!(config.language, Language::Id);
        assert_eq!(config.hourly_path, PathBuf::from("data/hour.csv"));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, DashError::Config(_)));
    }

    #[test]
    fn test_env_overrides_paths() {
        let config = Config::default().with_env(Some("/srv/bikes".into()));
        assert_eq!(config.hourly_path, PathBuf::from("/srv/bikes/hour.csv"));
        assert_eq!(config.daily_path, PathBuf::from("/srv/bikes/day.csv"));
    }

    #[test]
    fn test_empty_env_ignored() {
        let config = Config::default().with_env(Some("  ".into()));
        assert_eq!(config, Config::default());
        assert_eq!(Config::default().with_env(None), Config::default());
    }
}

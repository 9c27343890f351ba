// config.rs: Days Left configuration.
//
// Everything lives under one data directory:
//   <data_dir>/config.toml        optional settings (see AppConfig)
//   <data_dir>/store/<key>.json   persisted goal list
// Every setting has a default, so a missing or partial config.toml is fine.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use dl_countdown::{Countdown, DEFAULT_TARGET_DATE};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::ordering::OrderingPolicy;

/// Where Days Left keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub config_file: PathBuf,
    pub store_dir: PathBuf,
}

impl DataPaths {
    /// Standard layout under `data_dir`.
    pub fn for_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let root = data_dir.as_ref().to_path_buf();
        Self {
            config_file: root.join("config.toml"),
            store_dir: root.join("store"),
            data_dir: root,
        }
    }
}

/// Settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Countdown target, `YYYY-MM-DD`.
    #[serde(default = "default_target_date")]
    pub target_date: String,

    /// chrono format used to stamp `Goal.date` at creation.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Key the goal list is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default)]
    pub ordering: OrderingPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_date: default_target_date(),
            date_format: default_date_format(),
            storage_key: default_storage_key(),
            ordering: OrderingPolicy::default(),
        }
    }
}

// Serde default functions
fn default_target_date() -> String {
    DEFAULT_TARGET_DATE.to_string()
}

fn default_date_format() -> String {
    // Same shape as an en-GB locale date: 01/06/2025.
    "%d/%m/%Y".to_string()
}

fn default_storage_key() -> String {
    "goals".to_string()
}

impl AppConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, GoalError> {
        let content = std::fs::read_to_string(path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| GoalError::ConfigError {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config, falling back to defaults if the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Check the settings that can be wrong without failing to parse.
    pub fn validate(&self) -> Result<(), GoalError> {
        self.countdown()?;
        check_date_format(&self.date_format)?;
        Ok(())
    }

    /// The countdown towards `target_date`.
    pub fn countdown(&self) -> Result<Countdown, GoalError> {
        Ok(Countdown::parse(&self.target_date)?)
    }
}

/// Reject chrono format strings that cannot render a date.
///
/// Parsing the items is not enough: time and offset specifiers (`%H`, `%z`)
/// parse fine but fail when rendering a date without a time.
pub fn check_date_format(format: &str) -> Result<(), GoalError> {
    let has_error = StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
    if format.trim().is_empty() || has_error {
        return Err(GoalError::InvalidDateFormat(format.to_string()));
    }
    format_date(NaiveDate::MIN, format).map(|_| ())
}

/// Render `date` with a chrono format string.
pub fn format_date(date: NaiveDate, format: &str) -> Result<String, GoalError> {
    let mut out = String::new();
    write!(out, "{}", date.format(format))
        .map_err(|_| GoalError::InvalidDateFormat(format.to_string()))?;
    Ok(out)
}

//! User settings for the expense ledger
//!
//! Holds the product-level thresholds (description length, amount ceiling),
//! the statistics logging interval and display preferences. Every field has a
//! default, so a missing or partial `config.json` is fine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::Money;
use crate::services::validator::ValidationLimits;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Maximum description length in characters
    #[serde(default = "default_max_description_len")]
    pub max_description_len: usize,

    /// Largest accepted amount
    #[serde(default = "default_max_amount")]
    pub max_amount: Money,

    /// Seconds between periodic statistics log lines (0 disables)
    #[serde(default = "default_stats_interval_secs")]
    pub stats_interval_secs: u64,

    /// Log filter used when `EXPENSES_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// strftime pattern for dates that are neither today nor yesterday
    #[serde(default = "default_long_date_format")]
    pub long_date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_max_description_len() -> usize {
    100
}

fn default_max_amount() -> Money {
    Money::from_cents(99_999_999)
}

fn default_stats_interval_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_long_date_format() -> String {
    "%A, %B %-d, %Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            max_description_len: default_max_description_len(),
            max_amount: default_max_amount(),
            stats_interval_secs: default_stats_interval_secs(),
            log_level: default_log_level(),
            long_date_format: default_long_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Validation thresholds derived from these settings
    pub fn validation_limits(&self) -> ValidationLimits {
        ValidationLimits {
            max_description_len: self.max_description_len,
            max_amount: self.max_amount,
        }
    }

    /// Interval for periodic statistics logging, `None` when disabled
    pub fn stats_interval(&self) -> Option<Duration> {
        match self.stats_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.max_description_len, 100);
        assert_eq!(settings.max_amount.cents(), 99_999_999);
        assert_eq!(settings.stats_interval(), Some(Duration::from_secs(30)));
        assert_eq!(settings.currency_symbol, "$");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.max_description_len, 100);
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            max_description_len: 40,
            stats_interval_secs: 0,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.max_description_len, 40);
        assert_eq!(loaded.stats_interval(), None);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{ "currency_symbol": "€" }"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.max_amount.cents(), 99_999_999);
        assert_eq!(loaded.long_date_format, "%A, %B %-d, %Y");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn test_validation_limits() {
        let limits = Settings::default().validation_limits();
        assert_eq!(limits.max_description_len, 100);
        assert_eq!(limits.max_amount, Money::from_cents(99_999_999));
    }
}

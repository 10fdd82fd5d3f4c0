use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::{
    core::utils::{app_data_dir, config_file_in, ensure_dir, store_dir_in, write_atomic},
    domain::CurrencyOption,
    errors::LedgerError,
    reports::ALERT_THRESHOLD,
};

pub const DEFAULT_TREND_MONTHS: usize = 6;
pub const DEFAULT_LOG_FILTER: &str = "pocket_ledger=info";

/// Host-level settings. Ledger data itself lives in the key-value store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Overrides the directory holding the persisted slices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub trend_months: usize,
    pub budget_alert_threshold: f64,
    /// Currency code used when no currency slice has been stored yet.
    pub default_currency: String,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            trend_months: DEFAULT_TREND_MONTHS,
            budget_alert_threshold: ALERT_THRESHOLD,
            default_currency: CurrencyOption::default().code,
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl Config {
    /// Currency option for `default_currency`, or the built-in default when
    /// the code is unknown.
    pub fn currency(&self) -> CurrencyOption {
        CurrencyOption::by_code(&self.default_currency).unwrap_or_default()
    }

    /// Threshold clamped to `(0, 1]`; anything else falls back to the default.
    pub fn alert_threshold(&self) -> f64 {
        let threshold = self.budget_alert_threshold;
        if threshold.is_finite() && threshold > 0.0 && threshold <= 1.0 {
            threshold
        } else {
            ALERT_THRESHOLD
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    /// Loads the config file, falling back to defaults when it is missing.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&data) {
            Ok(config) => Ok(config),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "config unreadable, using defaults");
                Ok(Config::default())
            }
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, json.as_bytes())?;
        Ok(())
    }

    /// Directory the file store should use for `config`.
    pub fn store_dir(&self, config: &Config) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| store_dir_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}

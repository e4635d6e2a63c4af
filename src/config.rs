//! Screener configuration
//!
//! Built-in defaults, then an optional JSON file, then `RENTAL_CSV` / `SALES_CSV` from the
//! environment. Command-line flags are applied by the binary on top of the result.

use crate::error::{Result, ScreenerError};
use crate::screener::ScreenCriteria;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const RENTAL_CSV_VAR: &str = "RENTAL_CSV";
pub const SALES_CSV_VAR: &str = "SALES_CSV";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenerConfig {
    pub rental_csv: PathBuf,
    pub sales_csv: PathBuf,
    /// Defaults for the market screen.
    pub screen: ScreenCriteria,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            rental_csv: PathBuf::from("Data/HUD_Rental_Rate.csv"),
            sales_csv: PathBuf::from("Data/Zillow_SFH_Sales.csv"),
            screen: ScreenCriteria::default(),
        }
    }
}

impl ScreenerConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScreenerError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: ScreenerConfig = serde_json::from_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Defaults, or `path` when given, with environment overrides applied.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_from(|key| std::env::var(key).ok()))
    }

    /// Override the CSV paths from `lookup`; blank values are ignored.
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(RENTAL_CSV_VAR).filter(|v| !v.trim().is_empty()) {
            self.rental_csv = PathBuf::from(path);
        }
        if let Some(path) = lookup(SALES_CSV_VAR).filter(|v| !v.trim().is_empty()) {
            self.sales_csv = PathBuf::from(path);
        }
        self
    }
}

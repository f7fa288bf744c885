use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AdvisorError, Result};
use crate::utils::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_CROPS, DEFAULT_DATA_DIR, DEFAULT_FILE_PREFIX,
    DEFAULT_FORECAST_DRY_DAYS, DEFAULT_LOOKBACK_DAYS, DEFAULT_MODELS_DIR, ENV_PREFIX,
    LABEL_SEPARATOR, MIN_WINDOW_OBSERVATIONS,
};

/// Runtime settings, layered: defaults, then the config file, then
/// `PLANTING_ADVISOR_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory scanned for climate CSVs.
    pub data_dir: PathBuf,
    pub models_dir: PathBuf,
    pub file_prefix: String,
    pub has_headers: bool,
    pub crops: Vec<String>,
    pub lookback_days: u32,
    /// Stand-in for a real forecast.
    pub forecast_dry_days: u32,
    pub max_workers: usize,
}

impl AppConfig {
    /// Load settings. An explicit `path` must exist; otherwise
    /// `planting-advisor.toml` in the working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (file, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let config: AppConfig = Config::builder()
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .set_default("models_dir", DEFAULT_MODELS_DIR)?
            .set_default("file_prefix", DEFAULT_FILE_PREFIX)?
            .set_default("has_headers", true)?
            .set_default("crops", DEFAULT_CROPS.to_vec())?
            .set_default("lookback_days", i64::from(DEFAULT_LOOKBACK_DAYS))?
            .set_default("forecast_dry_days", i64::from(DEFAULT_FORECAST_DRY_DAYS))?
            .set_default("max_workers", num_cpus::get() as i64)?
            .add_source(File::from(file).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("crops"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Command-line flags take precedence over every other layer.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, models_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(dir) = models_dir {
            self.models_dir = dir;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        for crop in &self.crops {
            if crop.is_empty() || crop.contains(LABEL_SEPARATOR) {
                return Err(AdvisorError::Config(format!(
                    "invalid crop name '{}': must be non-empty and contain no '{}'",
                    crop, LABEL_SEPARATOR
                )));
            }
        }

        if self.lookback_days as usize + 1 < MIN_WINDOW_OBSERVATIONS {
            return Err(AdvisorError::Config(format!(
                "lookback_days {} cannot cover {} daily observations",
                self.lookback_days, MIN_WINDOW_OBSERVATIONS
            )));
        }

        if self.file_prefix.is_empty() {
            return Err(AdvisorError::Config("file_prefix must not be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            has_headers: true,
            crops: DEFAULT_CROPS.iter().map(|c| c.to_string()).collect(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            forecast_dry_days: DEFAULT_FORECAST_DRY_DAYS,
            max_workers: num_cpus::get(),
        }
    }
}

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Startup and ingestion failures. These abort initialization.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Model artifact error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No weather sources matching '{pattern}' found in {}", .dir.display())]
    NoWeatherSources { dir: PathBuf, pattern: String },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Invalid model artifact {}: {message}", .path.display())]
    InvalidModel { path: PathBuf, message: String },
}

impl From<config::ConfigError> for AdvisorError {
    fn from(err: config::ConfigError) -> Self {
        AdvisorError::Config(err.to_string())
    }
}

/// Per-request failures of the advisory pipeline. Recoverable at the caller.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("No model loaded for crop '{crop}'")]
    ModelUnavailable { crop: String },

    #[error("Not enough historical data for {district} on {date}")]
    InsufficientHistory { district: String, date: NaiveDate },

    #[error("Prediction failed: {0}")]
    PredictionFailed(#[from] PredictionError),
}

impl ServiceError {
    /// Message suitable for showing to the person who asked for advice.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::ModelUnavailable { crop } => {
                format!("❌ Model not loaded for {}.", crop)
            }
            ServiceError::InsufficientHistory { district, date } => format!(
                "⚠️ Not enough historical data for {} as of {}.",
                district, date
            ),
            ServiceError::PredictionFailed(cause) => {
                format!("❌ Could not produce advice: {}", cause)
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Insufficient data: {available} observations in window, at least {required} required")]
pub struct InsufficientData {
    pub available: usize,
    pub required: usize,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Feature '{feature}' is not finite ({value})")]
    NonFiniteFeature { feature: &'static str, value: f64 },

    #[error("Classifier returned an empty label")]
    EmptyLabel,

    #[error("{0}")]
    Other(String),
}

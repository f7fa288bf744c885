use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;
use validator::Validate;

use crate::error::{AdvisorError, Result};
use crate::models::WeatherObservation;
use crate::utils::constants::{
    COL_DATE, COL_DEWPOINT, COL_DISTRICT, COL_PRECIPITATION, COL_TEMPERATURE,
};
use crate::utils::dates::parse_date;

/// Raw CSV row. Empty or non-numeric cells (`NA`, `-`) read as missing.
#[derive(Debug, Deserialize)]
struct ClimateRow {
    #[serde(rename = "ADM2_NAME")]
    district: String,
    date: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    precipitation_mm: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    temperature_c: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    dewpoint_c: Option<f64>,
}

/// Observations read from one climate file.
#[derive(Debug, Clone, Default)]
pub struct ClimateFile {
    pub observations: Vec<WeatherObservation>,
    pub skipped: usize,
}

/// Reads daily district climate CSVs
/// (`ADM2_NAME, date, precipitation_mm, temperature_c, dewpoint_c`).
pub struct ClimateReader {
    has_headers: bool,
}

impl ClimateReader {
    pub fn new() -> Self {
        Self { has_headers: true }
    }

    /// Headerless files are read positionally in the standard column order.
    pub fn with_headers(has_headers: bool) -> Self {
        Self { has_headers }
    }

    pub fn read_file(&self, path: &Path) -> Result<ClimateFile> {
        let file = File::open(path)?;
        let climate = self.read_from(BufReader::new(file)).map_err(|e| match e {
            AdvisorError::InvalidFormat(message) => {
                AdvisorError::InvalidFormat(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;

        debug!(
            path = %path.display(),
            rows = climate.observations.len(),
            skipped = climate.skipped,
            "read climate file"
        );

        Ok(climate)
    }

    pub fn read_from<R: std::io::Read>(&self, input: R) -> Result<ClimateFile> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(input);

        if self.has_headers {
            self.check_headers(reader.headers()?)?;
        }

        let first_data_line = if self.has_headers { 2 } else { 1 };
        let mut climate = ClimateFile::default();

        for (index, row) in reader.deserialize::<ClimateRow>().enumerate() {
            let row = row?;
            let line = index + first_data_line;

            if row.district.is_empty() && row.date.is_empty() {
                continue;
            }

            let date = parse_date(&row.date).map_err(|_| {
                AdvisorError::InvalidFormat(format!(
                    "line {}: invalid date '{}'",
                    line, row.date
                ))
            })?;

            match Self::to_observation(row, date) {
                Some(observation) => climate.observations.push(observation),
                None => climate.skipped += 1,
            }
        }

        Ok(climate)
    }

    fn check_headers(&self, headers: &csv::StringRecord) -> Result<()> {
        for column in [
            COL_DISTRICT,
            COL_DATE,
            COL_PRECIPITATION,
            COL_TEMPERATURE,
            COL_DEWPOINT,
        ] {
            if !headers.iter().any(|h| h == column) {
                return Err(AdvisorError::InvalidFormat(format!(
                    "missing column '{}'",
                    column
                )));
            }
        }
        Ok(())
    }

    /// Rows with gaps, non-finite values or out-of-range readings are dropped.
    fn to_observation(row: ClimateRow, date: chrono::NaiveDate) -> Option<WeatherObservation> {
        let precipitation = row.precipitation_mm.filter(|v| v.is_finite())?;
        let temperature = row.temperature_c.filter(|v| v.is_finite())?;
        let dewpoint = row.dewpoint_c.filter(|v| v.is_finite())?;

        let observation =
            WeatherObservation::new(row.district, date, precipitation, temperature, dewpoint);

        observation.validate().ok().map(|_| observation)
    }
}

impl Default for ClimateReader {
    fn default() -> Self {
        Self::new()
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One day of observed weather for one district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeatherObservation {
    #[validate(length(min = 1))]
    pub district: String,

    pub date: NaiveDate,

    #[validate(range(min = 0.0, max = 1000.0))]
    pub precipitation_mm: f64,

    #[validate(range(min = -60.0, max = 60.0))]
    pub temperature_c: f64,

    #[validate(range(min = -60.0, max = 60.0))]
    pub dewpoint_c: f64,
}

impl WeatherObservation {
    pub fn new(
        district: impl Into<String>,
        date: NaiveDate,
        precipitation_mm: f64,
        temperature_c: f64,
        dewpoint_c: f64,
    ) -> Self {
        Self {
            district: district.into(),
            date,
            precipitation_mm,
            temperature_c,
            dewpoint_c,
        }
    }
}

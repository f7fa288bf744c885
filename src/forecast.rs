use chrono::NaiveDate;

use crate::utils::constants::DEFAULT_FORECAST_DRY_DAYS;

/// Source of the expected number of dry days ahead of a planting date.
pub trait ForecastProvider: Send + Sync {
    fn dry_days(&self, district: &str, date: NaiveDate) -> u32;
}

/// Returns the same dry-day count for every district and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantForecast {
    dry_days: u32,
}

impl ConstantForecast {
    pub fn new(dry_days: u32) -> Self {
        Self { dry_days }
    }
}

impl Default for ConstantForecast {
    fn default() -> Self {
        Self::new(DEFAULT_FORECAST_DRY_DAYS)
    }
}

impl ForecastProvider for ConstantForecast {
    fn dry_days(&self, _district: &str, _date: NaiveDate) -> u32 {
        self.dry_days
    }
}

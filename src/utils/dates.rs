use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{AdvisorError, Result};
use crate::utils::constants::{DATETIME_FORMAT, DATE_FORMATS};

/// Parse a calendar date as written in the climate CSVs or on the command line.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }

    // Exports that went through a dataframe carry a midnight timestamp
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, DATETIME_FORMAT) {
        return Ok(datetime.date());
    }

    Err(AdvisorError::InvalidFormat(format!(
        "Invalid date format: '{}'",
        value
    )))
}

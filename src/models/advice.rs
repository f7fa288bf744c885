use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome of a successful advisory request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResult {
    pub message: String,
    pub district: String,
    pub date: NaiveDate,
    pub crop: String,
    pub rain_3d: f64,
}

impl AdviceResult {
    /// One-line context shown under the advice message.
    pub fn info_line(&self) -> String {
        format!(
            "📍 {} | 📅 {} | 🌾 {} | Rain: {:.1}mm",
            self.district, self.date, self.crop, self.rain_3d
        )
    }
}

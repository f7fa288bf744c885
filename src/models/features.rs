use serde::{Deserialize, Serialize};

/// Classifier input. Field order is the order the models were trained on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub rain_3d: f64,
    pub min_temp_3d: f64,
    pub avg_dew_30d: f64,
    pub dry_days_forecast: u32,
}

/// Names a single feature so serialized models can refer to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureName {
    #[serde(rename = "rain_3d")]
    Rain3d,
    #[serde(rename = "min_temp_3d")]
    MinTemp3d,
    #[serde(rename = "avg_dew_30d")]
    AvgDew30d,
    #[serde(rename = "dry_days_forecast")]
    DryDaysForecast,
}

impl FeatureName {
    pub const ALL: [FeatureName; 4] = [
        FeatureName::Rain3d,
        FeatureName::MinTemp3d,
        FeatureName::AvgDew30d,
        FeatureName::DryDaysForecast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureName::Rain3d => "rain_3d",
            FeatureName::MinTemp3d => "min_temp_3d",
            FeatureName::AvgDew30d => "avg_dew_30d",
            FeatureName::DryDaysForecast => "dry_days_forecast",
        }
    }
}

impl std::fmt::Display for FeatureName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FeatureVector {
    pub fn get(&self, name: FeatureName) -> f64 {
        match name {
            FeatureName::Rain3d => self.rain_3d,
            FeatureName::MinTemp3d => self.min_temp_3d,
            FeatureName::AvgDew30d => self.avg_dew_30d,
            FeatureName::DryDaysForecast => self.dry_days_forecast as f64,
        }
    }

    /// Features as a row in training order.
    pub fn as_array(&self) -> [f64; 4] {
        FeatureName::ALL.map(|name| self.get(name))
    }

    pub fn summary(&self) -> String {
        format!(
            "rain_3d={:.1}mm, min_temp_3d={:.1}°C, avg_dew_30d={:.1}°C, dry_days_forecast={}",
            self.rain_3d, self.min_temp_3d, self.avg_dew_30d, self.dry_days_forecast
        )
    }
}

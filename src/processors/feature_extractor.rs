use crate::error::InsufficientData;
use crate::models::{FeatureVector, WeatherObservation};
use crate::utils::constants::{MIN_WINDOW_OBSERVATIONS, RECENT_DAYS};

/// Turns a date-ordered weather window into classifier features.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Rain and minimum temperature come from the three latest days; dewpoint
    /// is averaged over the whole window. `window` must be ascending by date.
    pub fn compute(
        window: &[WeatherObservation],
        forecast_dry_days: u32,
    ) -> Result<FeatureVector, InsufficientData> {
        if window.len() < MIN_WINDOW_OBSERVATIONS {
            return Err(InsufficientData {
                available: window.len(),
                required: MIN_WINDOW_OBSERVATIONS,
            });
        }

        let recent = &window[window.len() - RECENT_DAYS..];

        let rain_3d = recent.iter().map(|o| o.precipitation_mm).sum();
        let min_temp_3d = recent
            .iter()
            .map(|o| o.temperature_c)
            .fold(f64::INFINITY, f64::min);
        let avg_dew_30d =
            window.iter().map(|o| o.dewpoint_c).sum::<f64>() / window.len() as f64;

        Ok(FeatureVector {
            rain_3d,
            min_temp_3d,
            avg_dew_30d,
            dry_days_forecast: forecast_dry_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window(values: &[(f64, f64, f64)]) -> Vec<WeatherObservation> {
        let start = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &(rain, temp, dew))| {
                WeatherObservation::new(
                    "Kampala",
                    start + chrono::Duration::days(i as i64),
                    rain,
                    temp,
                    dew,
                )
            })
            .collect()
    }

    #[test]
    fn test_insufficient_window() {
        for len in 0..3 {
            let w = window(&vec![(1.0, 20.0, 15.0); len]);
            let err = FeatureExtractor::compute(&w, 2).unwrap_err();
            assert_eq!(err.available, len);
            assert_eq!(err.required, 3);
        }
    }

    #[test]
    fn test_exactly_three_observations() {
        let w = window(&[(1.0, 22.0, 14.0), (2.5, 19.5, 16.0), (0.5, 21.0, 15.0)]);
        let features = FeatureExtractor::compute(&w, 2).unwrap();

        assert!((features.rain_3d - 4.0).abs() < 1e-9);
        assert_eq!(features.min_temp_3d, 19.5);
        assert!((features.avg_dew_30d - 15.0).abs() < 1e-9);
        assert_eq!(features.dry_days_forecast, 2);
    }

    #[test]
    fn test_rain_uses_latest_three_only() {
        let w = window(&[
            (50.0, 10.0, 10.0),
            (40.0, 11.0, 10.0),
            (1.0, 25.0, 20.0),
            (2.0, 23.0, 20.0),
            (3.0, 24.0, 20.0),
        ]);
        let features = FeatureExtractor::compute(&w, 0).unwrap();

        assert!((features.rain_3d - 6.0).abs() < 1e-9);
        assert_eq!(features.min_temp_3d, 23.0);
    }

    #[test]
    fn test_dewpoint_averaged_over_full_window() {
        let w = window(&[
            (0.0, 20.0, 10.0),
            (0.0, 20.0, 10.0),
            (0.0, 20.0, 20.0),
            (0.0, 20.0, 20.0),
            (0.0, 20.0, 20.0),
        ]);
        let features = FeatureExtractor::compute(&w, 2).unwrap();

        let last_three_mean = 20.0;
        assert!((features.avg_dew_30d - 16.0).abs() < 1e-9);
        assert!((features.avg_dew_30d - last_three_mean).abs() > 1.0);
    }

    #[test]
    fn test_forecast_passthrough() {
        let w = window(&[(0.0, 20.0, 10.0); 4]);
        let features = FeatureExtractor::compute(&w, 7).unwrap();
        assert_eq!(features.dry_days_forecast, 7);
    }
}

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::classifier::ClassifierRegistry;
use crate::error::ServiceError;
use crate::forecast::{ConstantForecast, ForecastProvider};
use crate::models::{AdviceResult, FeatureVector};
use crate::processors::{AdviceResolver, FeatureExtractor};
use crate::store::WeatherStore;
use crate::utils::constants::DEFAULT_LOOKBACK_DAYS;

/// Computed features together with the number of observations behind them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowFeatures {
    pub features: FeatureVector,
    pub window_len: usize,
}

/// Stateless request handler over an immutable store and model registry.
pub struct AdvisoryService<'a> {
    registry: &'a ClassifierRegistry,
    store: &'a WeatherStore,
    forecast: Box<dyn ForecastProvider>,
    resolver: AdviceResolver,
    lookback_days: u32,
}

impl<'a> AdvisoryService<'a> {
    pub fn new(registry: &'a ClassifierRegistry, store: &'a WeatherStore) -> Self {
        Self {
            registry,
            store,
            forecast: Box::new(ConstantForecast::default()),
            resolver: AdviceResolver::new(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    pub fn with_forecast<F>(mut self, forecast: F) -> Self
    where
        F: ForecastProvider + 'static,
    {
        self.forecast = Box::new(forecast);
        self
    }

    pub fn with_lookback_days(mut self, lookback_days: u32) -> Self {
        self.lookback_days = lookback_days;
        self
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// Features for `district` on `date`, without consulting any model.
    pub fn features(&self, district: &str, date: NaiveDate) -> Result<WindowFeatures, ServiceError> {
        let window = self.store.window_query(district, date, self.lookback_days);
        debug!(district, %date, observations = window.len(), "weather window");

        let dry_days = self.forecast.dry_days(district, date);
        let features = FeatureExtractor::compute(window, dry_days).map_err(|_| {
            ServiceError::InsufficientHistory {
                district: district.to_string(),
                date,
            }
        })?;

        Ok(WindowFeatures {
            features,
            window_len: window.len(),
        })
    }

    pub fn get_advice(
        &self,
        district: &str,
        date: NaiveDate,
        crop: &str,
    ) -> Result<AdviceResult, ServiceError> {
        let classifier = self
            .registry
            .get(crop)
            .ok_or_else(|| ServiceError::ModelUnavailable {
                crop: crop.to_string(),
            })?;

        let WindowFeatures { features, .. } = self.features(district, date)?;
        debug!(crop, features = %features.summary(), "predicting");

        let label = classifier.predict(&features)?;
        let message = self.resolver.resolve(&label, crop, features.rain_3d);

        info!(district, %date, crop, label = %label, "advice resolved");

        Ok(AdviceResult {
            message,
            district: district.to_string(),
            date,
            crop: crop.to_string(),
            rain_3d: features.rain_3d,
        })
    }
}

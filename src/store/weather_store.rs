use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::models::WeatherObservation;
use crate::store::IngestReport;

/// Read-only per-district daily weather, sorted by date with one entry per day.
#[derive(Debug, Clone, Default)]
pub struct WeatherStore {
    series: HashMap<String, Vec<WeatherObservation>>,
}

impl WeatherStore {
    pub fn builder() -> WeatherStoreBuilder {
        WeatherStoreBuilder::new()
    }

    /// Build from a single batch of observations. Later duplicates win.
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = WeatherObservation>,
    {
        let mut builder = WeatherStoreBuilder::new();
        builder.ingest("memory", observations);
        builder.build().0
    }

    /// Observations of `district` dated within
    /// `[reference_date - lookback_days, reference_date]`, ascending by date.
    pub fn window_query(
        &self,
        district: &str,
        reference_date: NaiveDate,
        lookback_days: u32,
    ) -> &[WeatherObservation] {
        let Some(series) = self.series.get(district) else {
            return &[];
        };

        let start = reference_date
            .checked_sub_signed(Duration::days(i64::from(lookback_days)))
            .unwrap_or(NaiveDate::MIN);

        let lo = series.partition_point(|o| o.date < start);
        let hi = series.partition_point(|o| o.date <= reference_date);

        if lo >= hi {
            return &[];
        }

        &series[lo..hi]
    }

    pub fn series(&self, district: &str) -> &[WeatherObservation] {
        self.series.get(district).map(Vec::as_slice).unwrap_or(&[])
    }

    /// District names in sorted order.
    pub fn districts(&self) -> Vec<&str> {
        let mut districts: Vec<&str> = self.series.keys().map(String::as_str).collect();
        districts.sort_unstable();
        districts
    }

    pub fn contains_district(&self, district: &str) -> bool {
        self.series.contains_key(district)
    }

    pub fn observation_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.series.values().filter_map(|s| s.first()).map(|o| o.date).min()?;
        let last = self.series.values().filter_map(|s| s.last()).map(|o| o.date).max()?;
        Some((first, last))
    }
}

/// Accumulates sources in ingestion order. A row for an already seen
/// (district, date) replaces the earlier one.
#[derive(Debug, Default)]
pub struct WeatherStoreBuilder {
    series: HashMap<String, BTreeMap<NaiveDate, WeatherObservation>>,
    report: IngestReport,
}

impl WeatherStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest<I>(&mut self, source: &str, observations: I) -> &mut Self
    where
        I: IntoIterator<Item = WeatherObservation>,
    {
        let mut rows = 0;
        let mut replaced = 0;

        for observation in observations {
            rows += 1;
            let days = self.series.entry(observation.district.clone()).or_default();
            if days.insert(observation.date, observation).is_some() {
                replaced += 1;
            }
        }

        debug!(source, rows, replaced, "ingested weather source");

        self.report.sources.push(source.to_string());
        self.report.rows_ingested += rows;
        self.report.duplicates_replaced += replaced;
        self
    }

    /// Count rows a reader dropped before they reached the builder.
    pub fn record_skipped(&mut self, skipped: usize) -> &mut Self {
        self.report.rows_skipped += skipped;
        self
    }

    pub fn build(self) -> (WeatherStore, IngestReport) {
        let series: HashMap<String, Vec<WeatherObservation>> = self
            .series
            .into_iter()
            .map(|(district, days)| (district, days.into_values().collect()))
            .collect();

        let store = WeatherStore { series };

        let mut report = self.report;
        report.districts = store.series.len();
        report.observations = store.observation_count();
        report.date_range = store.date_range();

        (store, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn obs(district: &str, day: u32, rain: f64) -> WeatherObservation {
        WeatherObservation::new(district, date(day), rain, 20.0, 15.0)
    }

    #[test]
    fn test_window_query_bounds_inclusive() {
        let store = WeatherStore::from_observations(
            (1..=20).map(|d| obs("Kampala", d, d as f64)),
        );

        let window = store.window_query("Kampala", date(15), 5);
        let days: Vec<u32> = window.iter().map(|o| chrono::Datelike::day(&o.date)).collect();

        assert_eq!(days, vec![10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_window_query_sorted_from_unsorted_input() {
        let store = WeatherStore::from_observations(vec![
            obs("Gulu", 9, 1.0),
            obs("Gulu", 3, 2.0),
            obs("Gulu", 6, 3.0),
        ]);

        let window = store.window_query("Gulu", date(10), 30);
        assert_eq!(window.len(), 3);
        assert!(window.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_window_query_unknown_district_is_empty() {
        let store = WeatherStore::from_observations(vec![obs("Kampala", 1, 0.0)]);
        assert!(store.window_query("Mbarara", date(1), 30).is_empty());
    }

    #[test]
    fn test_window_query_out_of_range_is_empty() {
        let store = WeatherStore::from_observations(vec![obs("Kampala", 1, 0.0)]);

        assert!(store.window_query("Kampala", date(31), 10).is_empty());
        assert!(store
            .window_query("Kampala", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 30)
            .is_empty());
    }

    #[test]
    fn test_window_query_filters_by_district() {
        let store = WeatherStore::from_observations(vec![
            obs("Kampala", 1, 1.0),
            obs("Gulu", 1, 2.0),
            obs("Kampala", 2, 3.0),
        ]);

        let window = store.window_query("Kampala", date(2), 30);
        assert_eq!(window.len(), 2);
        assert!(window.iter().all(|o| o.district == "Kampala"));
    }

    #[test]
    fn test_later_source_wins_on_duplicate() {
        let mut builder = WeatherStore::builder();
        builder.ingest("a.csv", vec![obs("Kampala", 5, 1.0), obs("Kampala", 6, 1.0)]);
        builder.ingest("b.csv", vec![obs("Kampala", 5, 9.0)]);
        let (store, report) = builder.build();

        let series = store.series("Kampala");
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].precipitation_mm, 9.0);
        assert_eq!(report.rows_ingested, 3);
        assert_eq!(report.duplicates_replaced, 1);
        assert_eq!(report.sources, vec!["a.csv".to_string(), "b.csv".to_string()]);
    }

    #[test]
    fn test_repeat_within_one_source_counts_as_replaced() {
        let mut builder = WeatherStore::builder();
        builder.ingest("a.csv", vec![obs("Gulu", 5, 1.0), obs("Gulu", 5, 4.0)]);
        let (store, report) = builder.build();

        assert_eq!(store.series("Gulu").len(), 1);
        assert_eq!(store.series("Gulu")[0].precipitation_mm, 4.0);
        assert_eq!(report.duplicates_replaced, 1);
        assert!(report.summary().contains("Duplicates replaced: 1"));
    }

    #[test]
    fn test_districts_sorted_and_stats() {
        let store = WeatherStore::from_observations(vec![
            obs("Mbale", 4, 0.0),
            obs("Arua", 2, 0.0),
            obs("Kampala", 9, 0.0),
        ]);

        assert_eq!(store.districts(), vec!["Arua", "Kampala", "Mbale"]);
        assert_eq!(store.observation_count(), 3);
        assert_eq!(store.date_range(), Some((date(2), date(9))));
        assert!(store.contains_district("Arua"));
        assert!(!store.is_empty());
    }
}

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{AdvisorError, Result};
use crate::readers::{ClimateFile, ClimateReader};
use crate::store::{IngestReport, WeatherStore};
use crate::utils::constants::{DEFAULT_FILE_PREFIX, WEATHER_FILE_EXTENSION};
use crate::utils::progress::ProgressReporter;

/// Discovers climate CSVs in a directory and assembles the weather store.
///
/// Files are read in parallel but merged in file-name order, so a row in a
/// later file replaces the same (district, date) from an earlier one.
pub struct WeatherIngester {
    max_workers: usize,
    file_prefix: String,
    has_headers: bool,
}

impl WeatherIngester {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers,
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            has_headers: true,
        }
    }

    pub fn with_file_prefix(mut self, file_prefix: impl Into<String>) -> Self {
        self.file_prefix = file_prefix.into();
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Fails with [`AdvisorError::NoWeatherSources`] when nothing matches.
    pub fn ingest(
        &self,
        data_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<(WeatherStore, IngestReport)> {
        let files = self.find_weather_files(data_dir)?;

        if let Some(p) = progress {
            p.set_message(&format!("Reading {} weather files...", files.len()));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers.max(1))
            .build()
            .map_err(|e| AdvisorError::Config(e.to_string()))?;

        let reader = ClimateReader::with_headers(self.has_headers);
        let climate_files: Vec<ClimateFile> = pool.install(|| {
            files
                .par_iter()
                .map(|path| reader.read_file(path))
                .collect::<Result<Vec<_>>>()
        })?;

        let mut builder = WeatherStore::builder();
        for (path, climate) in files.iter().zip(climate_files) {
            let source = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            if climate.skipped > 0 {
                warn!(source = %source, skipped = climate.skipped, "skipped incomplete or invalid rows");
            }

            builder
                .record_skipped(climate.skipped)
                .ingest(&source, climate.observations);
        }

        let (store, report) = builder.build();

        info!(
            sources = report.sources.len(),
            districts = report.districts,
            observations = report.observations,
            duplicates_replaced = report.duplicates_replaced,
            "weather store ready"
        );

        if let Some(p) = progress {
            p.finish_with_message(&format!(
                "Loaded {} observations for {} districts",
                report.observations, report.districts
            ));
        }

        Ok((store, report))
    }

    /// Matching files sorted by name; that order defines ingestion order.
    pub fn find_weather_files(&self, data_dir: &Path) -> Result<Vec<PathBuf>> {
        let no_sources = || AdvisorError::NoWeatherSources {
            dir: data_dir.to_path_buf(),
            pattern: format!("{}*.{}", self.file_prefix, WEATHER_FILE_EXTENSION),
        };

        if !data_dir.is_dir() {
            return Err(no_sources());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(data_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let matches = path
                .file_name()
                .and_then(|f| f.to_str())
                .map(|name| name.starts_with(&self.file_prefix))
                .unwrap_or(false)
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case(WEATHER_FILE_EXTENSION))
                    .unwrap_or(false);

            if matches {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(no_sources());
        }

        files.sort();
        Ok(files)
    }
}

impl Default for WeatherIngester {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "ADM2_NAME,date,precipitation_mm,temperature_c,dewpoint_c";

    fn write_csv(dir: &Path, name: &str, rows: &[&str]) {
        let mut contents = format!("{}\n", HEADER);
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_find_weather_files_filters_and_sorts() -> Result<()> {
        let dir = TempDir::new()?;
        write_csv(dir.path(), "Uganda_Climate_2024.csv", &[]);
        write_csv(dir.path(), "Uganda_Climate_2023.csv", &[]);
        write_csv(dir.path(), "Kenya_Climate_2024.csv", &[]);
        fs::write(dir.path().join("Uganda_Climate_notes.txt"), "x")?;

        let files = WeatherIngester::new(2).find_weather_files(dir.path())?;
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["Uganda_Climate_2023.csv", "Uganda_Climate_2024.csv"]);
        Ok(())
    }

    #[test]
    fn test_no_sources_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "Kenya_Climate_2024.csv", &[]);

        let err = WeatherIngester::new(1).ingest(dir.path(), None).unwrap_err();
        assert!(matches!(err, AdvisorError::NoWeatherSources { .. }));

        let missing = dir.path().join("does-not-exist");
        let err = WeatherIngester::new(1).ingest(&missing, None).unwrap_err();
        assert!(matches!(err, AdvisorError::NoWeatherSources { .. }));
    }

    #[test]
    fn test_later_file_overrides_earlier() -> Result<()> {
        let dir = TempDir::new()?;
        write_csv(
            dir.path(),
            "Uganda_Climate_a.csv",
            &["Kampala,2025-03-08,1.0,20.0,15.0", "Kampala,2025-03-09,1.0,20.0,15.0"],
        );
        write_csv(
            dir.path(),
            "Uganda_Climate_b.csv",
            &["Kampala,2025-03-09,7.5,20.0,15.0", "Gulu,2025-03-09,,20.0,15.0"],
        );

        let (store, report) = WeatherIngester::new(2).ingest(dir.path(), None)?;

        let series = store.series("Kampala");
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].date, NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
        assert_eq!(series[1].precipitation_mm, 7.5);

        assert_eq!(report.sources.len(), 2);
        assert_eq!(report.rows_ingested, 3);
        assert_eq!(report.rows_skipped, 1);
        assert_eq!(report.duplicates_replaced, 1);
        assert_eq!(report.districts, 1);
        Ok(())
    }

    #[test]
    fn test_custom_prefix() -> Result<()> {
        let dir = TempDir::new()?;
        write_csv(dir.path(), "kenya_2024.csv", &["Nakuru,2025-03-08,1.0,20.0,15.0"]);

        let (store, _) = WeatherIngester::new(1)
            .with_file_prefix("kenya_")
            .ingest(dir.path(), None)?;

        assert_eq!(store.districts(), vec!["Nakuru"]);
        Ok(())
    }
}

use anyhow::Context;
use chrono::NaiveDate;
use std::process::ExitCode;

use crate::classifier::ClassifierRegistry;
use crate::cli::args::{Cli, Commands};
use crate::config::AppConfig;
use crate::error::ServiceError;
use crate::forecast::ConstantForecast;
use crate::readers::{ModelLoader, WeatherIngester};
use crate::services::AdvisoryService;
use crate::store::{IngestReport, WeatherStore};
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;

/// Exit status for a request the advisory pipeline could not answer.
pub const SERVICE_ERROR_EXIT: u8 = 2;

/// What a command wants written, and how the process should exit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    pub status: u8,
}

impl CommandOutput {
    fn lines(stdout: Vec<String>) -> Self {
        Self {
            stdout,
            ..Self::default()
        }
    }

    fn service_error(err: &ServiceError) -> Self {
        Self {
            stdout: Vec::new(),
            stderr: vec![err.user_message()],
            status: SERVICE_ERROR_EXIT,
        }
    }

    fn emit(self) -> ExitCode {
        for line in &self.stdout {
            println!("{}", line);
        }
        for line in &self.stderr {
            eprintln!("{}", line);
        }
        ExitCode::from(self.status)
    }
}

pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    init_logging(cli.verbose, cli.log_file.as_deref()).context("failed to initialise logging")?;

    let config = AppConfig::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .with_overrides(cli.data_dir, cli.models_dir);

    let output = match cli.command {
        Commands::Advise {
            district,
            date,
            crop,
            json,
        } => {
            let (store, _) = load_store(&config, cli.quiet)?;
            let registry = load_registry(&config)?;
            let service = build_service(&config, &registry, &store);
            advise(&service, &district, date, &crop, json)?
        }

        Commands::Districts => {
            let (store, _) = load_store(&config, cli.quiet)?;
            CommandOutput::lines(store.districts().into_iter().map(String::from).collect())
        }

        Commands::Crops => {
            let registry = load_registry(&config)?;
            list_crops(&config, &registry)
        }

        Commands::Features { district, date } => {
            let (store, _) = load_store(&config, cli.quiet)?;
            let registry = ClassifierRegistry::new();
            let service = build_service(&config, &registry, &store);
            features(&service, &district, date)
        }

        Commands::Summary => {
            let (_, report) = load_store(&config, cli.quiet)?;
            CommandOutput::lines(vec![report.summary()])
        }
    };

    Ok(output.emit())
}

/// Advice message and info line, or the result as pretty JSON.
pub fn advise(
    service: &AdvisoryService<'_>,
    district: &str,
    date: NaiveDate,
    crop: &str,
    json: bool,
) -> anyhow::Result<CommandOutput> {
    let result = match service.get_advice(district, date, crop) {
        Ok(result) => result,
        Err(err) => return Ok(CommandOutput::service_error(&err)),
    };

    let stdout = if json {
        vec![serde_json::to_string_pretty(&result)?]
    } else {
        vec![result.message.clone(), result.info_line()]
    };

    Ok(CommandOutput::lines(stdout))
}

/// Every configured crop, marked loaded or missing.
pub fn list_crops(config: &AppConfig, registry: &ClassifierRegistry) -> CommandOutput {
    let loader = ModelLoader::new(&config.models_dir);
    let lines = config
        .crops
        .iter()
        .map(|crop| {
            if registry.contains(crop) {
                format!("✅ {}", crop)
            } else {
                format!(
                    "⚠️  {} (model missing: {})",
                    crop,
                    loader.model_path(crop).display()
                )
            }
        })
        .collect();

    CommandOutput::lines(lines)
}

pub fn features(service: &AdvisoryService<'_>, district: &str, date: NaiveDate) -> CommandOutput {
    match service.features(district, date) {
        Ok(window) => CommandOutput::lines(vec![
            format!("{} on {}", district, date),
            format!(
                "Window: {} observations over the last {} days",
                window.window_len,
                service.lookback_days()
            ),
            window.features.summary(),
        ]),
        Err(err) => CommandOutput::service_error(&err),
    }
}

fn load_store(config: &AppConfig, quiet: bool) -> anyhow::Result<(WeatherStore, IngestReport)> {
    let progress = ProgressReporter::new_spinner("Loading weather data...", quiet);

    let ingester = WeatherIngester::new(config.max_workers)
        .with_file_prefix(config.file_prefix.clone())
        .with_headers(config.has_headers);

    let loaded = ingester.ingest(&config.data_dir, Some(&progress));
    if loaded.is_err() {
        progress.clear();
    }

    loaded.with_context(|| {
        format!(
            "failed to load weather data from {}",
            config.data_dir.display()
        )
    })
}

fn load_registry(config: &AppConfig) -> anyhow::Result<ClassifierRegistry> {
    ModelLoader::new(&config.models_dir)
        .load_registry(config.crops.as_slice())
        .with_context(|| format!("failed to load models from {}", config.models_dir.display()))
}

fn build_service<'a>(
    config: &AppConfig,
    registry: &'a ClassifierRegistry,
    store: &'a WeatherStore,
) -> AdvisoryService<'a> {
    AdvisoryService::new(registry, store)
        .with_lookback_days(config.lookback_days)
        .with_forecast(ConstantForecast::new(config.forecast_dry_days))
}

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::DEFAULT_ADVICE_DATE;
use crate::utils::dates::parse_date;

#[derive(Parser)]
#[command(name = "planting-advisor")]
#[command(about = "Planting advice from recent district weather and trained crop models")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Configuration file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory containing climate CSV files")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory containing <crop>_model.json files")]
    pub models_dir: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide progress output")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get planting advice for a district, date and crop
    Advise {
        #[arg(short, long)]
        district: String,

        #[arg(long, default_value = DEFAULT_ADVICE_DATE, value_parser = parse_date_arg)]
        date: NaiveDate,

        #[arg(short = 'C', long)]
        crop: String,

        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },

    /// List districts with weather observations
    Districts,

    /// List crops with a loaded model
    Crops,

    /// Show the feature vector computed for a district and date
    Features {
        #[arg(short, long)]
        district: String,

        #[arg(long, default_value = DEFAULT_ADVICE_DATE, value_parser = parse_date_arg)]
        date: NaiveDate,
    },

    /// Summarise the ingested weather data
    Summary,
}

fn parse_date_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

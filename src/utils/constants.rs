/// Weather source discovery
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_FILE_PREFIX: &str = "Uganda_Climate_";
pub const WEATHER_FILE_EXTENSION: &str = "csv";

/// Model artifacts
pub const DEFAULT_MODELS_DIR: &str = "models/saved";
pub const MODEL_FILE_SUFFIX: &str = "_model.json";
pub const DEFAULT_CROPS: [&str; 2] = ["maize", "beans"];

/// CSV column names
pub const COL_DISTRICT: &str = "ADM2_NAME";
pub const COL_DATE: &str = "date";
pub const COL_PRECIPITATION: &str = "precipitation_mm";
pub const COL_TEMPERATURE: &str = "temperature_c";
pub const COL_DEWPOINT: &str = "dewpoint_c";

/// Accepted date layouts, tried in order
pub const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Feature windowing
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;
pub const MIN_WINDOW_OBSERVATIONS: usize = 3;
pub const RECENT_DAYS: usize = 3;

/// Placeholder until a real forecast source exists
pub const DEFAULT_FORECAST_DRY_DAYS: u32 = 2;

/// Label convention: <action_key>_<crop>
pub const LABEL_SEPARATOR: char = '_';

/// Default request date used by the CLI
pub const DEFAULT_ADVICE_DATE: &str = "2025-03-10";

/// Configuration
pub const DEFAULT_CONFIG_FILE: &str = "planting-advisor.toml";
pub const ENV_PREFIX: &str = "PLANTING_ADVISOR";

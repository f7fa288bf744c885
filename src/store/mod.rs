pub mod ingest_report;
pub mod weather_store;

pub use ingest_report::IngestReport;
pub use weather_store::{WeatherStore, WeatherStoreBuilder};

pub mod climate_reader;
pub mod model_loader;
pub mod weather_ingester;

pub use climate_reader::{ClimateFile, ClimateReader};
pub use model_loader::ModelLoader;
pub use weather_ingester::WeatherIngester;

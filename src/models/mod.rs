pub mod advice;
pub mod features;
pub mod observation;

pub use advice::AdviceResult;
pub use features::{FeatureName, FeatureVector};
pub use observation::WeatherObservation;

pub mod advisory_service;

pub use advisory_service::{AdvisoryService, WindowFeatures};

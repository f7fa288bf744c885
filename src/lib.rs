pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod forecast;
pub mod models;
pub mod processors;
pub mod readers;
pub mod services;
pub mod store;
pub mod utils;

pub use error::{AdvisorError, Result, ServiceError};

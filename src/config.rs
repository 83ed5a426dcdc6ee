//! # Config
//!
//! Runtime options, read from `DISPATCH_*` environment variables (and a
//! `.env` file if present) on top of built-in defaults.

use config::{ConfigError, Environment};
use dotenv::dotenv;
use serde::Deserialize;
use std::time::Duration;

use crate::routing::OsrmParams;

/// struct holding configuration options
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// base URL of the OSRM routing service
    pub osrm_url: String,

    /// HTTP timeout for routing requests, in seconds
    pub http_timeout_secs: u64,

    /// per-destination distance lookup timeout, in seconds
    pub lookup_timeout_secs: u64,

    /// destinations sampled per load query
    pub destination_count: usize,

    /// tracing filter used when RUST_LOG is not set
    pub log_filter: String,

    /// where generated loads are written as JSON
    pub output_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Default values for Config
    pub fn new() -> Self {
        Config {
            osrm_url: String::from("https://router.project-osrm.org"),
            http_timeout_secs: 30,
            lookup_timeout_secs: 8,
            destination_count: 6,
            log_filter: String::from("info"),
            output_path: String::from("loads.json"),
        }
    }

    /// Create a new `Config` object using environment variables
    pub fn try_from_env() -> Result<Self, ConfigError> {
        // read .env file if present
        dotenv().ok();
        let default_config = Config::default();

        config::Config::builder()
            .set_default("osrm_url", default_config.osrm_url)?
            .set_default("http_timeout_secs", default_config.http_timeout_secs)?
            .set_default("lookup_timeout_secs", default_config.lookup_timeout_secs)?
            .set_default("destination_count", default_config.destination_count as u64)?
            .set_default("log_filter", default_config.log_filter)?
            .set_default("output_path", default_config.output_path)?
            .add_source(
                Environment::with_prefix("DISPATCH")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn osrm_params(&self) -> OsrmParams {
        OsrmParams {
            base_url: self.osrm_url.clone(),
            timeout_secs: self.http_timeout_secs,
            ..OsrmParams::default()
        }
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }
}

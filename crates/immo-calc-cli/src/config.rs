use std::env;
use std::path::PathBuf;

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

const DEFAULT_STORE_PATH: &str = "immo-calculations.json";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// JSON file holding saved calculations
    pub store_path: PathBuf,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IMMO_STORE_PATH must not be empty")]
    EmptyStorePath,

    #[error("IMMO_LOG_LEVEL must not be empty")]
    EmptyLogLevel,

    #[error("IMMO_LOG_LEVEL '{value}' is not a valid log filter")]
    InvalidLogLevel {
        value: String,
        #[source]
        source: ParseError,
    },
}

impl CliConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let store_path =
            env::var("IMMO_STORE_PATH").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
        if store_path.trim().is_empty() {
            return Err(ConfigError::EmptyStorePath);
        }

        let log_level =
            env::var("IMMO_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
        let log_level = log_level.trim();
        if log_level.is_empty() {
            return Err(ConfigError::EmptyLogLevel);
        }
        EnvFilter::try_new(log_level).map_err(|source| ConfigError::InvalidLogLevel {
            value: log_level.to_string(),
            source,
        })?;

        Ok(Self {
            store_path: PathBuf::from(store_path.trim()),
            telemetry: TelemetryConfig {
                log_level: log_level.to_string(),
            },
        })
    }
}

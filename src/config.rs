use crate::error::{EngineError, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_COMPANY: &str = "Unknown Company";

/// Runtime settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Rule table to load instead of the built-in one.
    pub rules_path: Option<PathBuf>,
    /// Company name used to title reports.
    pub company_name: String,
    pub telemetry: TelemetryConfig,
}

/// Tracing controls.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `load` uses the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let rules_path = value("PAYOUT_RULES_PATH").map(PathBuf::from);
        let company_name = value("PAYOUT_COMPANY").unwrap_or_else(|| DEFAULT_COMPANY.to_string());
        let log_level = value("PAYOUT_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        if log_level.contains(char::is_whitespace) {
            return Err(EngineError::ConfigError(format!(
                "PAYOUT_LOG_LEVEL must be a single filter directive, got '{log_level}'"
            )));
        }

        Ok(Self {
            rules_path,
            company_name,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

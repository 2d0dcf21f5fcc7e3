use crate::config::TelemetryConfig;
use crate::error::{EngineError, Result};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr so that
/// reports written to stdout stay machine-readable.
pub fn init(config: &TelemetryConfig) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| {
            EngineError::TelemetryError(format!(
                "invalid log level/filter '{}': {source}",
                config.log_level
            ))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|err| EngineError::TelemetryError(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_is_reported() {
        // Only reached when RUST_LOG is unset or itself invalid.
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = TelemetryConfig {
            log_level: "payout_engine=notalevel".to_string(),
        };
        assert!(matches!(init(&config), Err(EngineError::TelemetryError(_))));
    }
}

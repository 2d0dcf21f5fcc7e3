use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid rule at row {row}: {reason}")]
    InvalidRule { row: usize, reason: String },
    #[error("Extraction error: {0}")]
    ExtractionError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Telemetry error: {0}")]
    TelemetryError(String),
    #[error("No line items to process")]
    EmptyBatch,
}

pub type Result<T> = std::result::Result<T, EngineError>;

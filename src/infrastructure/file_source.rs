use crate::domain::line_item::RawRecord;
use crate::domain::ports::RecordSource;
use crate::error::{EngineError, Result};
use crate::interfaces::csv::line_item_reader::LineItemReader;
use crate::interfaces::json::extractor_output::parse_extractor_output;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads line items an extractor left on disk.
///
/// Files ending in `.csv` are read as a CSV export; anything else is treated
/// as the extractor's JSON answer.
#[derive(Debug, Clone)]
pub struct FileRecordSource {
    path: PathBuf,
}

impl FileRecordSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn is_csv(&self) -> bool {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    }
}

#[async_trait]
impl RecordSource for FileRecordSource {
    async fn extract(&self, _company_name: &str) -> Result<Vec<RawRecord>> {
        let bytes = tokio::fs::read(&self.path).await?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "read extractor output");

        if self.is_csv() {
            return Ok(LineItemReader::new(bytes.as_slice()).line_items().collect());
        }

        let text = String::from_utf8(bytes).map_err(|err| {
            EngineError::ExtractionError(format!("{} is not valid UTF-8: {err}", self.path.display()))
        })?;
        parse_extractor_output(&text)
    }
}

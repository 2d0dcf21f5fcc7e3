use super::line_item::RawRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Supplies the raw line items for one batch.
///
/// Stands in for the document extractor; the company name is passed through
/// for sources that need it to pick a layout.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn extract(&self, company_name: &str) -> Result<Vec<RawRecord>>;
}

pub type RecordSourceBox = Box<dyn RecordSource>;

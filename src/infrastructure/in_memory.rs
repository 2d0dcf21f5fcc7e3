use crate::domain::line_item::RawRecord;
use crate::domain::ports::RecordSource;
use crate::error::Result;
use async_trait::async_trait;

/// A record source over line items that were already extracted.
///
/// Every call to `extract` hands out a copy of the same batch. Useful in tests
/// and when the extractor runs in-process.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecordSource {
    records: Vec<RawRecord>,
}

impl InMemoryRecordSource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    async fn extract(&self, _company_name: &str) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_item::RawLineItem;

    #[tokio::test]
    async fn test_in_memory_source_returns_batch() {
        let source = InMemoryRecordSource::new(vec![Ok(RawLineItem::new("TAXI", "12"))]);

        let first = source.extract("Digit").await.unwrap();
        let second = source.extract("Digit").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn test_default_source_is_empty() {
        let source = InMemoryRecordSource::default();
        assert!(source.extract("Digit").await.unwrap().is_empty());
    }
}

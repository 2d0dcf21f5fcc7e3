use crate::domain::line_item::{MalformedLineItem, RawLineItem, RawRecord, Remark};
use crate::domain::payin::RawPayin;
use serde::Deserialize;
use std::io::Read;

/// Column layout of a CSV export of extracted line items.
#[derive(Debug, Deserialize)]
struct CsvLineItem {
    segment: Option<String>,
    policy_type: Option<String>,
    location: Option<String>,
    payin: Option<String>,
    remark: Option<String>,
}

impl From<CsvLineItem> for RawLineItem {
    fn from(row: CsvLineItem) -> Self {
        Self {
            segment: row.segment.unwrap_or_default(),
            policy_type: row.policy_type.unwrap_or_else(|| "Comp".to_string()),
            location: row.location.unwrap_or_else(|| "N/A".to_string()),
            payin: row.payin.map(RawPayin::Text),
            remark: Remark::Text(row.remark.unwrap_or_default()),
        }
    }
}

/// Reads extracted line items from a CSV source.
///
/// Columns are matched by header name (`segment, policy_type, location, payin,
/// remark`); missing columns fall back to the usual defaults. A row that cannot
/// be read is yielded as a malformed record instead of ending the stream.
pub struct LineItemReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> LineItemReader<R> {
    /// Creates a new `LineItemReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads line items, one record per row.
    pub fn line_items(self) -> impl Iterator<Item = RawRecord> {
        self.reader.into_deserialize::<CsvLineItem>().map(|result| {
            result
                .map(RawLineItem::from)
                .map_err(|err| MalformedLineItem::unreadable(err.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_stream() {
        let data = "segment, policy_type, location, payin, remark\n\
                    TW SAOD + COMP, Comp, Pune, 63%, Tata\n\
                    PVT CAR TP, TP, Mumbai, 40, ";
        let reader = LineItemReader::new(data.as_bytes());
        let results: Vec<RawRecord> = reader.line_items().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.segment, "TW SAOD + COMP");
        assert_eq!(first.payin, Some(RawPayin::from("63%")));
        assert_eq!(first.remark, Remark::Text("Tata".to_string()));

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.policy_type, "TP");
        assert_eq!(second.remark.joined(), "");
    }

    #[test]
    fn test_reader_defaults_for_missing_columns() {
        let data = "segment,payin\nTAXI,12";
        let reader = LineItemReader::new(data.as_bytes());
        let results: Vec<RawRecord> = reader.line_items().collect();

        let item = results[0].as_ref().unwrap();
        assert_eq!(item.policy_type, "Comp");
        assert_eq!(item.location, "N/A");
    }

    #[test]
    fn test_reader_invalid_utf8_row_is_isolated() {
        let mut data = b"segment,payin\nTAXI,12\n".to_vec();
        data.extend_from_slice(&[0xff, 0xfe, b',', b'1', b'\n']);
        data.extend_from_slice(b"BUS,40\n");
        let reader = LineItemReader::new(data.as_slice());
        let results: Vec<RawRecord> = reader.line_items().collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}

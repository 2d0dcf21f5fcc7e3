use crate::domain::rule::{RuleDefinition, RuleTable};
use crate::error::Result;
use std::io::Read;

/// Reads a rule table from CSV with the columns `LOB, SEGMENT, PO, REMARKS`.
///
/// Row order is kept: it decides which rule wins when several match.
pub struct RuleReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RuleReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    pub fn read_table(self) -> Result<RuleTable> {
        let definitions = self
            .reader
            .into_deserialize::<RuleDefinition>()
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;
        RuleTable::from_definitions(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_of_business::LineOfBusiness;
    use crate::error::EngineError;

    #[test]
    fn test_read_table_keeps_order() {
        let data = "LOB,SEGMENT,PO,REMARKS\n\
                    TAXI,TAXI,-2%,Payin Below 20%\n\
                    MISD,\"Misd, Tractor\",88% of Payin,NIL";
        let table = RuleReader::new(data.as_bytes()).read_table().unwrap();

        assert_eq!(table.len(), 2);
        let lobs: Vec<LineOfBusiness> = table.iter().map(|rule| rule.line_of_business).collect();
        assert_eq!(
            lobs,
            vec![LineOfBusiness::Taxi, LineOfBusiness::Miscellaneous]
        );
    }

    #[test]
    fn test_read_table_rejects_unknown_formula() {
        let data = "LOB,SEGMENT,PO,REMARKS\nTAXI,TAXI,double,NIL";
        let err = RuleReader::new(data.as_bytes()).read_table().unwrap_err();
        assert!(matches!(err, EngineError::InvalidRule { row: 1, .. }));
    }

    #[test]
    fn test_read_table_missing_column() {
        let data = "LOB,SEGMENT,PO\nTAXI,TAXI,-2%";
        let err = RuleReader::new(data.as_bytes()).read_table().unwrap_err();
        assert!(matches!(err, EngineError::CsvError(_)));
    }
}

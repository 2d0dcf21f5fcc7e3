use crate::domain::rule::{RuleDefinition, RuleTable};
use crate::error::Result;
use crate::interfaces::csv::rule_reader::RuleReader;
use std::path::Path;
use tracing::info;

/// Loads a rule table from a `.csv` or `.json` file.
///
/// JSON files hold an array of `{"LOB", "SEGMENT", "PO", "REMARKS"}` objects,
/// the same shape the JSON report publishes as `formula_data`.
pub async fn load_rule_table<P: AsRef<Path>>(path: P) -> Result<RuleTable> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let table = if is_csv {
        RuleReader::new(bytes.as_slice()).read_table()?
    } else {
        let definitions: Vec<RuleDefinition> = serde_json::from_slice(&bytes)?;
        RuleTable::from_definitions(definitions)?
    };

    info!(path = %path.display(), rules = table.len(), "loaded rule table");
    Ok(table)
}

use crate::domain::line_item::{MalformedLineItem, RawLineItem, RawRecord};
use crate::error::{EngineError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Parses the JSON an extractor returned into raw records.
///
/// Extractors tend to wrap their answer in markdown fences or prose, so fences
/// are dropped and the outermost `[...]` is cut out before parsing. A lone
/// object counts as a one-record batch. Elements that do not decode as a line
/// item are kept as malformed records.
pub fn parse_extractor_output(text: &str) -> Result<Vec<RawRecord>> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let mut cleaned = cleaned.trim();

    if let (Some(start), Some(end)) = (cleaned.find('['), cleaned.rfind(']'))
        && start < end
    {
        cleaned = &cleaned[start..=end];
    }

    let values = match serde_json::from_str::<Value>(cleaned)? {
        Value::Array(values) => values,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(EngineError::ExtractionError(format!(
                "expected a JSON array of line items, found {other}"
            )));
        }
    };

    Ok(values.iter().map(decode_record).collect())
}

fn decode_record(value: &Value) -> RawRecord {
    RawLineItem::deserialize(value).map_err(|err| MalformedLineItem::from_json(value, err.to_string()))
}

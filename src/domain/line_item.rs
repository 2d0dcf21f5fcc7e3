use crate::domain::line_of_business::LineOfBusiness;
use crate::domain::payin::{PayinBand, RawPayin, classify_optional};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Free-text remark, either a single string or a list of notes.
///
/// Remarks are display-only, so anything else the extractor emits (`null`,
/// numbers, mixed lists) is kept as-is instead of failing the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Remark {
    Text(String),
    Lines(Vec<String>),
    Other(Value),
}

impl Remark {
    pub fn joined(&self) -> String {
        match self {
            Remark::Text(text) => text.clone(),
            Remark::Lines(lines) => lines.join("; "),
            Remark::Other(value) => display_value(value),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(values) => values
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

impl Default for Remark {
    fn default() -> Self {
        Remark::Text(String::new())
    }
}

fn default_policy_type() -> String {
    "Comp".to_string()
}

fn default_location() -> String {
    "N/A".to_string()
}

// Extractors emit `null` for values they could not find.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_policy_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_policy_type))
}

fn null_as_location<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_location))
}

/// A policy line item as handed over by the extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLineItem {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub segment: String,
    #[serde(default = "default_policy_type", deserialize_with = "null_as_policy_type")]
    pub policy_type: String,
    #[serde(default = "default_location", deserialize_with = "null_as_location")]
    pub location: String,
    #[serde(default)]
    pub payin: Option<RawPayin>,
    #[serde(default)]
    pub remark: Remark,
}

impl RawLineItem {
    pub fn new(segment: &str, payin: impl Into<RawPayin>) -> Self {
        Self {
            segment: segment.to_string(),
            policy_type: default_policy_type(),
            location: default_location(),
            payin: Some(payin.into()),
            remark: Remark::default(),
        }
    }
}

/// A line item with its payin parsed and banded.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLineItem {
    pub raw: RawLineItem,
    pub payin_value: Decimal,
    pub payin_band: PayinBand,
}

impl From<RawLineItem> for ClassifiedLineItem {
    fn from(raw: RawLineItem) -> Self {
        let classification = classify_optional(raw.payin.as_ref());
        Self {
            raw,
            payin_value: classification.value,
            payin_band: classification.band,
        }
    }
}

/// Result of running a classified line item through the rule table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatedLineItem {
    pub segment: String,
    pub policy_type: String,
    pub location: String,
    pub remark: String,
    pub payin_value: Decimal,
    pub payin_band: PayinBand,
    pub line_of_business: LineOfBusiness,
    pub calculated_payout: Decimal,
    pub formula_used: String,
    pub rule_explanation: String,
}

/// A record the extractor produced that could not be read as a line item.
///
/// Display fields are recovered where the record still has them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalformedLineItem {
    pub segment: String,
    pub policy_type: String,
    pub location: String,
    pub payin: String,
    pub remark: String,
    pub reason: String,
}

impl MalformedLineItem {
    pub fn from_json(value: &Value, reason: impl Into<String>) -> Self {
        let field = |key: &str, default: &str| match value.get(key) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => default.to_string(),
            Some(other) => other.to_string(),
        };

        Self {
            segment: field("segment", "Unknown"),
            policy_type: field("policy_type", "Comp"),
            location: field("location", "N/A"),
            payin: field("payin", "0%"),
            remark: field("remark", "Error"),
            reason: reason.into(),
        }
    }

    /// For rows the source could not read at all.
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self::from_json(&Value::Null, reason)
    }
}

/// What an extractor yields per record.
pub type RawRecord = Result<RawLineItem, MalformedLineItem>;

/// What the engine yields per record.
pub type LineOutcome = Result<CalculatedLineItem, MalformedLineItem>;

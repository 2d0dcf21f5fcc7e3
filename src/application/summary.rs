use crate::domain::line_item::LineOutcome;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// `formula_used` value reported for records that could not be processed.
pub const ERROR_SENTINEL: &str = "Error";

/// Aggregate figures published alongside a processed batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_records: usize,
    /// Mean payin over classified records, to one decimal place.
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_payin: Decimal,
    pub unique_segments: usize,
    pub formula_summary: BTreeMap<String, usize>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[LineOutcome]) -> Self {
        let mut payin_total = Decimal::ZERO;
        let mut classified = 0usize;
        let mut segments = HashSet::new();
        let mut formula_summary = BTreeMap::new();

        for outcome in outcomes {
            match outcome {
                Ok(item) => {
                    payin_total = match payin_total.checked_add(item.payin_value) {
                        Some(total) => total,
                        None => {
                            warn!(segment = %item.segment, "payin total overflowed, saturating");
                            payin_total.saturating_add(item.payin_value)
                        }
                    };
                    classified += 1;
                    segments.insert(item.segment.as_str());
                    *formula_summary.entry(item.formula_used.clone()).or_insert(0) += 1;
                }
                Err(malformed) => {
                    segments.insert(malformed.segment.as_str());
                    *formula_summary
                        .entry(ERROR_SENTINEL.to_string())
                        .or_insert(0) += 1;
                }
            }
        }

        let avg_payin = if classified == 0 {
            Decimal::ZERO
        } else {
            (payin_total / Decimal::from(classified)).round_dp(1)
        };

        Self {
            total_records: outcomes.len(),
            avg_payin,
            unique_segments: segments.len(),
            formula_summary,
        }
    }
}

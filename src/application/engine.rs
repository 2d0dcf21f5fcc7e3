use crate::application::summary::BatchSummary;
use crate::domain::line_item::{CalculatedLineItem, ClassifiedLineItem, LineOutcome, RawRecord};
use crate::domain::line_of_business::lob_of;
use crate::domain::ports::RecordSource;
use crate::domain::rule::RuleTable;
use crate::error::{EngineError, Result};
use std::sync::Arc;
use tracing::{debug, error, info};

/// `formula_used` value for line items no rule applies to.
pub const NO_MATCHING_RULE: &str = "no matching rule";

/// Turns classified line items into payouts using an injected rule table.
///
/// The table is shared read-only, so cloning the engine is cheap and clones can
/// process independent batches on separate tasks without coordination.
#[derive(Debug, Clone)]
pub struct PayoutEngine {
    rules: Arc<RuleTable>,
}

/// A processed batch: one outcome per input record, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutBatch {
    pub outcomes: Vec<LineOutcome>,
    pub summary: BatchSummary,
}

impl PayoutEngine {
    /// Creates a new `PayoutEngine` over the given rule table.
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Resolves the first matching rule for a line item and applies it.
    ///
    /// Items no rule covers keep their payin as the payout.
    pub fn resolve_and_calculate(&self, item: &ClassifiedLineItem) -> CalculatedLineItem {
        let lob = lob_of(&item.raw.segment);
        let segment_upper = item.raw.segment.to_uppercase();

        let (calculated_payout, formula_used, rule_explanation) =
            match self.rules.first_match(lob, &segment_upper, item.payin_band) {
                Some(rule) => {
                    debug!(
                        lob = %lob,
                        segment = %segment_upper,
                        band = %item.payin_band,
                        po = rule.po(),
                        "rule matched"
                    );
                    (
                        rule.formula.apply(item.payin_value),
                        rule.po().to_string(),
                        format!(
                            "Match: LOB={}, Segment={}, {}",
                            lob,
                            rule.segment_match,
                            rule.band.label()
                        ),
                    )
                }
                None => {
                    debug!(lob = %lob, segment = %segment_upper, "no rule matched");
                    (
                        item.payin_value,
                        NO_MATCHING_RULE.to_string(),
                        format!("No rule for LOB={lob}, Segment={segment_upper}"),
                    )
                }
            };

        CalculatedLineItem {
            segment: item.raw.segment.clone(),
            policy_type: item.raw.policy_type.clone(),
            location: item.raw.location.clone(),
            remark: item.raw.remark.joined(),
            payin_value: item.payin_value,
            payin_band: item.payin_band,
            line_of_business: lob,
            calculated_payout,
            formula_used,
            rule_explanation,
        }
    }

    /// Calculates every item; the output lines up index for index with the input.
    pub fn apply_formula(&self, items: &[ClassifiedLineItem]) -> Vec<CalculatedLineItem> {
        items
            .iter()
            .map(|item| self.resolve_and_calculate(item))
            .collect()
    }

    /// Classifies and calculates a batch of extracted records.
    ///
    /// Malformed records become error outcomes in place; only an empty batch
    /// fails as a whole.
    pub fn process(&self, records: Vec<RawRecord>) -> Result<PayoutBatch> {
        if records.is_empty() {
            return Err(EngineError::EmptyBatch);
        }

        let outcomes: Vec<LineOutcome> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| match record {
                Ok(raw) => Ok(self.resolve_and_calculate(&ClassifiedLineItem::from(raw))),
                Err(malformed) => {
                    error!(
                        record = index,
                        reason = %malformed.reason,
                        "skipping malformed line item"
                    );
                    Err(malformed)
                }
            })
            .collect();

        let summary = BatchSummary::from_outcomes(&outcomes);
        info!(
            total_records = summary.total_records,
            unique_segments = summary.unique_segments,
            "calculated payouts"
        );

        Ok(PayoutBatch { outcomes, summary })
    }

    /// Pulls one batch from `source` and processes it.
    pub async fn run(&self, source: &dyn RecordSource, company_name: &str) -> Result<PayoutBatch> {
        info!(company = company_name, "processing line items");
        let records = source.extract(company_name).await?;
        info!(records = records.len(), "parsed records");
        self.process(records)
    }
}

impl Default for PayoutEngine {
    fn default() -> Self {
        Self::new(Arc::new(RuleTable::builtin()))
    }
}

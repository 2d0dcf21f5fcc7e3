use crate::application::summary::ERROR_SENTINEL;
use crate::domain::line_item::LineOutcome;
use serde::Serialize;

/// One rendered line of a payout report, shared by the CSV and JSON renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub segment: String,
    #[serde(rename = "policy type")]
    pub policy_type: String,
    pub location: String,
    pub payin: String,
    pub remark: String,
    #[serde(rename = "Calculated Payout")]
    pub calculated_payout: String,
    #[serde(rename = "Formula Used")]
    pub formula_used: String,
    #[serde(rename = "Rule Explanation")]
    pub rule_explanation: String,
}

impl From<&LineOutcome> for ReportRow {
    fn from(outcome: &LineOutcome) -> Self {
        match outcome {
            Ok(item) => Self {
                segment: item.segment.clone(),
                policy_type: item.policy_type.clone(),
                location: item.location.clone(),
                payin: format!("{:.2}%", item.payin_value),
                remark: item.remark.clone(),
                calculated_payout: format!("{:.2}%", item.calculated_payout),
                formula_used: item.formula_used.clone(),
                rule_explanation: item.rule_explanation.clone(),
            },
            Err(malformed) => Self {
                segment: malformed.segment.clone(),
                policy_type: malformed.policy_type.clone(),
                location: malformed.location.clone(),
                payin: malformed.payin.clone(),
                remark: malformed.remark.clone(),
                calculated_payout: ERROR_SENTINEL.to_string(),
                formula_used: ERROR_SENTINEL.to_string(),
                rule_explanation: format!("Error: {}", malformed.reason),
            },
        }
    }
}

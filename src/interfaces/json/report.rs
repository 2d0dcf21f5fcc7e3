use crate::application::engine::PayoutBatch;
use crate::application::summary::BatchSummary;
use crate::domain::rule::{RuleDefinition, RuleTable};
use crate::error::Result;
use crate::interfaces::row::ReportRow;
use serde::Serialize;

/// Summary block of the JSON report.
#[derive(Debug, Serialize)]
pub struct ReportMetrics<'a> {
    #[serde(flatten)]
    pub summary: &'a BatchSummary,
    pub company_name: &'a str,
}

/// Full JSON payload for a processed batch.
#[derive(Debug, Serialize)]
pub struct PayoutReport<'a> {
    pub title: String,
    pub calculated_data: Vec<ReportRow>,
    pub metrics: ReportMetrics<'a>,
    /// The rule table the batch was calculated against.
    pub formula_data: Vec<RuleDefinition>,
}

impl<'a> PayoutReport<'a> {
    pub fn new(batch: &'a PayoutBatch, rules: &RuleTable, company_name: &'a str) -> Self {
        Self {
            title: format!("{company_name} - Policy Data"),
            calculated_data: batch.outcomes.iter().map(ReportRow::from).collect(),
            metrics: ReportMetrics {
                summary: &batch.summary,
                company_name,
            },
            formula_data: rules.definitions(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

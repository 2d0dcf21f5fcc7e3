use crate::domain::line_of_business::LineOfBusiness;
use crate::domain::payin::PayinBand;
use crate::error::{EngineError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{error, warn};

/// Transform applied to a payin once a rule has been selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutFormula {
    /// `payout = payin * factor`
    PercentOfPayin(Decimal),
    /// `payout = payin - points`
    Subtract(Decimal),
}

impl PayoutFormula {
    /// Applies the transform. The payout never goes below zero and saturates
    /// at the bounds of `Decimal`.
    pub fn apply(&self, payin: Decimal) -> Decimal {
        let payout = match self {
            PayoutFormula::PercentOfPayin(factor) => payin.saturating_mul(*factor),
            PayoutFormula::Subtract(points) => payin.saturating_sub(*points),
        };
        payout.max(Decimal::ZERO)
    }
}

/// Parses the PO column: `"90% of Payin"`, `"Less 2% of Payin"` or `"-3%"`.
impl FromStr for PayoutFormula {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let text = value.trim();
        let lowered = text.to_ascii_lowercase();

        let percent = |number: &str| -> std::result::Result<Decimal, String> {
            Decimal::from_str(number.trim())
                .map_err(|_| format!("unrecognised payout formula '{text}'"))
        };

        if let Some(body) = lowered.strip_suffix("% of payin") {
            return match body.strip_prefix("less ") {
                Some(points) => Ok(PayoutFormula::Subtract(percent(points)?)),
                None => Ok(PayoutFormula::PercentOfPayin(percent(body)? / dec!(100))),
            };
        }

        if let Some(points) = lowered
            .strip_prefix('-')
            .and_then(|rest| rest.strip_suffix('%'))
        {
            return Ok(PayoutFormula::Subtract(percent(points)?));
        }

        Err(format!("unrecognised payout formula '{text}'"))
    }
}

/// Which payin bands a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BandCondition {
    /// `NIL`: any band.
    Any,
    Only(PayinBand),
    /// A remark naming no band (e.g. `"Payin Above 20%"`). Never matches.
    Unrecognised(String),
}

impl BandCondition {
    /// Reads a REMARKS cell. A remark matches a band when it contains the
    /// band's label.
    pub fn parse(remarks: &str) -> Self {
        let remarks = remarks.trim();
        if remarks.eq_ignore_ascii_case("NIL") {
            return BandCondition::Any;
        }

        PayinBand::ALL
            .into_iter()
            .find(|band| remarks.contains(band.label()))
            .map(BandCondition::Only)
            .unwrap_or_else(|| BandCondition::Unrecognised(remarks.to_string()))
    }

    pub fn admits(&self, band: PayinBand) -> bool {
        match self {
            BandCondition::Any => true,
            BandCondition::Only(expected) => *expected == band,
            BandCondition::Unrecognised(_) => false,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BandCondition::Any => "NIL",
            BandCondition::Only(band) => band.label(),
            BandCondition::Unrecognised(text) => text,
        }
    }
}

/// One row of a rule table in its hand-maintained text form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    #[serde(rename = "LOB")]
    pub lob: String,
    #[serde(rename = "SEGMENT")]
    pub segment: String,
    #[serde(rename = "PO")]
    pub po: String,
    #[serde(rename = "REMARKS")]
    pub remarks: String,
}

impl RuleDefinition {
    pub fn new(lob: &str, segment: &str, po: &str, remarks: &str) -> Self {
        Self {
            lob: lob.to_string(),
            segment: segment.to_string(),
            po: po.to_string(),
            remarks: remarks.to_string(),
        }
    }
}

/// A business rule mapping (LOB, segment substring, band) to a payout formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub line_of_business: LineOfBusiness,
    /// Upper-cased substring the line item segment must contain.
    pub segment_match: String,
    pub formula: PayoutFormula,
    pub band: BandCondition,
    definition: RuleDefinition,
}

impl Rule {
    pub fn matches(&self, lob: LineOfBusiness, segment_upper: &str, band: PayinBand) -> bool {
        self.line_of_business == lob
            && segment_upper.contains(&self.segment_match)
            && self.band.admits(band)
    }

    /// The PO text as written in the table, reported as `formula_used`.
    pub fn po(&self) -> &str {
        &self.definition.po
    }
}

impl TryFrom<RuleDefinition> for Rule {
    type Error = String;

    fn try_from(definition: RuleDefinition) -> std::result::Result<Self, Self::Error> {
        let line_of_business = definition.lob.parse::<LineOfBusiness>()?;
        let formula = definition.po.parse::<PayoutFormula>()?;
        let segment_match = definition.segment.trim().to_uppercase();
        if segment_match.is_empty() {
            return Err("segment must not be empty".to_string());
        }
        let band = BandCondition::parse(&definition.remarks);

        Ok(Self {
            line_of_business,
            segment_match,
            formula,
            band,
            definition,
        })
    }
}

/// Ordered, immutable rule table. The first matching rule wins.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Builds a table from text rows, keeping their order.
    ///
    /// Rows are numbered from 1 in errors. Rows whose remark names no payin
    /// band are kept but logged, since they can never match.
    pub fn from_definitions(definitions: Vec<RuleDefinition>) -> Result<Self> {
        let rules = definitions
            .into_iter()
            .enumerate()
            .map(|(index, definition)| {
                parse_row(index + 1, definition)
                    .map_err(|(row, reason)| EngineError::InvalidRule { row, reason })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// The stock rule table.
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .enumerate()
            .filter_map(|(index, (lob, segment, po, remarks))| {
                match parse_row(index + 1, RuleDefinition::new(lob, segment, po, remarks)) {
                    Ok(rule) => Some(rule),
                    Err((row, reason)) => {
                        error!(row, reason = %reason, "dropping invalid built-in rule");
                        None
                    }
                }
            })
            .collect();
        Self { rules }
    }

    pub fn first_match(
        &self,
        lob: LineOfBusiness,
        segment_upper: &str,
        band: PayinBand,
    ) -> Option<&Rule> {
        self.rules
            .iter()
            .find(|rule| rule.matches(lob, segment_upper, band))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn definitions(&self) -> Vec<RuleDefinition> {
        self.rules.iter().map(|rule| rule.definition.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_row(row: usize, definition: RuleDefinition) -> std::result::Result<Rule, (usize, String)> {
    let rule = Rule::try_from(definition).map_err(|reason| (row, reason))?;
    if let BandCondition::Unrecognised(remarks) = &rule.band {
        warn!(
            row,
            lob = %rule.line_of_business,
            segment = %rule.segment_match,
            remarks = %remarks,
            "rule remark names no payin band; rule can never match"
        );
    }
    Ok(rule)
}

// PVT CAR TP "Above 20/30/40%" rows name no band and never match; they are
// kept as written. See DESIGN.md.
const BUILTIN_RULES: &[(&str, &str, &str, &str)] = &[
    ("TW", "1+5", "90% of Payin", "NIL"),
    ("TW", "TW SAOD + COMP", "-2%", "Payin Below 20%"),
    ("TW", "TW SAOD + COMP", "-3%", "Payin 21% to 30%"),
    ("TW", "TW SAOD + COMP", "-4%", "Payin 31% to 50%"),
    ("TW", "TW SAOD + COMP", "-5%", "Payin Above 50%"),
    ("TW", "TW TP", "-2%", "Payin Below 20%"),
    ("TW", "TW TP", "-3%", "Payin 21% to 30%"),
    ("TW", "TW TP", "-3%", "Payin 31% to 50%"),
    ("TW", "TW TP", "-3%", "Payin Above 50%"),
    ("PVT CAR", "PVT CAR COMP + SAOD", "90% of Payin", "NIL"),
    ("PVT CAR", "PVT CAR TP", "-2%", "Payin Below 20%"),
    ("PVT CAR", "PVT CAR TP", "-3%", "Payin Above 20%"),
    ("PVT CAR", "PVT CAR TP", "-3%", "Payin Above 30%"),
    ("PVT CAR", "PVT CAR TP", "-3%", "Payin Above 40%"),
    ("PVT CAR", "PVT CAR TP", "-3%", "Payin Above 50%"),
    ("CV", "All GVW & PCV 3W, GCV 3W", "-2%", "Payin Below 20%"),
    ("CV", "All GVW & PCV 3W, GCV 3W", "-3%", "Payin 21% to 30%"),
    ("CV", "All GVW & PCV 3W, GCV 3W", "-4%", "Payin 31% to 50%"),
    ("CV", "All GVW & PCV 3W, GCV 3W", "-5%", "Payin Above 50%"),
    ("BUS", "SCHOOL BUS", "Less 2% of Payin", "NIL"),
    ("BUS", "STAFF BUS", "88% of Payin", "NIL"),
    ("TAXI", "TAXI", "-2%", "Payin Below 20%"),
    ("TAXI", "TAXI", "-3%", "Payin 21% to 30%"),
    ("TAXI", "TAXI", "-4%", "Payin 31% to 50%"),
    ("TAXI", "TAXI", "-5%", "Payin Above 50%"),
    ("MISD", "Misd, Tractor", "88% of Payin", "NIL"),
];

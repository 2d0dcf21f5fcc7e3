use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Payin ranges used to pick between competing rules for the same segment.
///
/// Each band is closed on its upper bound: 20 belongs to `Below20`,
/// 30 to `Pct21To30`, 50 to `Pct31To50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PayinBand {
    #[serde(rename = "BELOW_20")]
    Below20,
    #[serde(rename = "PCT_21_30")]
    Pct21To30,
    #[serde(rename = "PCT_31_50")]
    Pct31To50,
    #[serde(rename = "ABOVE_50")]
    Above50,
}

impl PayinBand {
    pub const ALL: [PayinBand; 4] = [
        PayinBand::Below20,
        PayinBand::Pct21To30,
        PayinBand::Pct31To50,
        PayinBand::Above50,
    ];

    pub fn of(value: Decimal) -> Self {
        if value <= dec!(20) {
            PayinBand::Below20
        } else if value <= dec!(30) {
            PayinBand::Pct21To30
        } else if value <= dec!(50) {
            PayinBand::Pct31To50
        } else {
            PayinBand::Above50
        }
    }

    /// The wording used by the REMARKS column of the rule table.
    pub fn label(&self) -> &'static str {
        match self {
            PayinBand::Below20 => "Payin Below 20%",
            PayinBand::Pct21To30 => "Payin 21% to 30%",
            PayinBand::Pct31To50 => "Payin 31% to 50%",
            PayinBand::Above50 => "Payin Above 50%",
        }
    }
}

impl fmt::Display for PayinBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payin exactly as the extractor reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPayin {
    Number(serde_json::Number),
    Text(String),
}

impl From<&str> for RawPayin {
    fn from(value: &str) -> Self {
        RawPayin::Text(value.to_string())
    }
}

impl From<String> for RawPayin {
    fn from(value: String) -> Self {
        RawPayin::Text(value)
    }
}

impl From<i64> for RawPayin {
    fn from(value: i64) -> Self {
        RawPayin::Number(value.into())
    }
}

impl fmt::Display for RawPayin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawPayin::Number(number) => write!(f, "{number}"),
            RawPayin::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayinClassification {
    pub value: Decimal,
    pub band: PayinBand,
}

impl PayinClassification {
    pub const ZERO: Self = Self {
        value: Decimal::ZERO,
        band: PayinBand::Below20,
    };

    fn of(value: Decimal) -> Self {
        Self {
            value,
            band: PayinBand::of(value),
        }
    }
}

/// Normalizes a raw payin into a value and its band.
///
/// Never fails: anything that cannot be read as a number falls back to
/// `(0, Below20)` and is logged. Text payins lose their `%`, whitespace and
/// minus signs, so `"-15%"` and `"15%"` classify identically. Numeric payins
/// are taken as-is.
pub fn classify(payin: &RawPayin) -> PayinClassification {
    match payin {
        RawPayin::Number(number) => match parse_decimal(&number.to_string()) {
            Some(value) => PayinClassification::of(value),
            None => {
                // Beyond Decimal's range; saturate so the band stays right.
                let value = match number.as_f64() {
                    Some(float) if float.is_sign_negative() => Decimal::MIN,
                    _ => Decimal::MAX,
                };
                warn!(payin = %number, saturated = %value, "payin out of range, saturating");
                PayinClassification::of(value)
            }
        },
        RawPayin::Text(text) => {
            let cleaned: String = text
                .chars()
                .filter(|c| *c != '%' && *c != '-' && !c.is_whitespace())
                .collect();

            if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("N/A") {
                return PayinClassification::ZERO;
            }

            match parse_decimal(&cleaned) {
                Some(value) => PayinClassification::of(value),
                None => {
                    warn!(payin = %text, "could not parse payin, defaulting to 0");
                    PayinClassification::ZERO
                }
            }
        }
    }
}

/// Classifies a payin that may be missing altogether.
pub fn classify_optional(payin: Option<&RawPayin>) -> PayinClassification {
    payin.map(classify).unwrap_or(PayinClassification::ZERO)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

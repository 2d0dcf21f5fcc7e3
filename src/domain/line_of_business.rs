use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level insurance category a segment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineOfBusiness {
    #[serde(rename = "TW")]
    TwoWheeler,
    #[serde(rename = "PVT CAR")]
    PrivateCar,
    #[serde(rename = "CV")]
    CommercialVehicle,
    #[serde(rename = "BUS")]
    Bus,
    #[serde(rename = "TAXI")]
    Taxi,
    #[serde(rename = "MISD")]
    Miscellaneous,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

// Checked top to bottom; segments often carry keywords of several groups
// ("SCHOOL BUS" contains "SC"), so the order decides the outcome.
const KEYWORD_PRIORITY: &[(LineOfBusiness, &[&str])] = &[
    (LineOfBusiness::Bus, &["BUS"]),
    (LineOfBusiness::TwoWheeler, &["TW", "2W", "MC", "SC", "1+5"]),
    (LineOfBusiness::PrivateCar, &["PVT CAR", "CAR", "PCI"]),
    (LineOfBusiness::CommercialVehicle, &["CV", "GVW", "PCV", "GCV"]),
    (LineOfBusiness::Taxi, &["TAXI"]),
    (LineOfBusiness::Miscellaneous, &["MISD", "TRACTOR"]),
];

impl LineOfBusiness {
    pub fn label(&self) -> &'static str {
        match self {
            LineOfBusiness::TwoWheeler => "TW",
            LineOfBusiness::PrivateCar => "PVT CAR",
            LineOfBusiness::CommercialVehicle => "CV",
            LineOfBusiness::Bus => "BUS",
            LineOfBusiness::Taxi => "TAXI",
            LineOfBusiness::Miscellaneous => "MISD",
            LineOfBusiness::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for LineOfBusiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses the LOB column of a rule table. `UNKNOWN` is not a valid rule target.
impl FromStr for LineOfBusiness {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "TW" => Ok(LineOfBusiness::TwoWheeler),
            "PVT CAR" => Ok(LineOfBusiness::PrivateCar),
            "CV" => Ok(LineOfBusiness::CommercialVehicle),
            "BUS" => Ok(LineOfBusiness::Bus),
            "TAXI" => Ok(LineOfBusiness::Taxi),
            "MISD" => Ok(LineOfBusiness::Miscellaneous),
            other => Err(format!("unknown line of business '{other}'")),
        }
    }
}

/// Derives the line of business from free-text segment description.
pub fn lob_of(segment: &str) -> LineOfBusiness {
    let segment = segment.to_uppercase();
    KEYWORD_PRIORITY
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| segment.contains(keyword)))
        .map(|(lob, _)| *lob)
        .unwrap_or(LineOfBusiness::Unknown)
}

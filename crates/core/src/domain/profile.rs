use std::fmt;

use serde::{Deserialize, Serialize};

pub const CAMPING_TENTS: &str = "Camping Tents";

/// Lifetime-value bucket. `Assigned` carries a caller-supplied label verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LtvSegment {
    High,
    Medium,
    Low,
    Unknown,
    Assigned(String),
}

impl LtvSegment {
    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unknown => "Unknown",
            Self::Assigned(label) => label,
        }
    }
}

impl fmt::Display for LtvSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for LtvSegment {
    fn from(value: String) -> Self {
        match value.as_str() {
            "High" => Self::High,
            "Medium" => Self::Medium,
            "Low" => Self::Low,
            "Unknown" => Self::Unknown,
            _ => Self::Assigned(value),
        }
    }
}

impl From<LtvSegment> for String {
    fn from(value: LtvSegment) -> Self {
        match value {
            LtvSegment::Assigned(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub ltv_segment: LtvSegment,
    pub discount_sensitive: bool,
    pub recommendations: Vec<String>,
    pub loyalty_flag: bool,
    pub churn_risk: bool,
    pub cross_sell_opportunity: bool,
    pub needs_more_data: bool,
}

use serde::{Deserialize, Serialize};

pub const PREFER_NOT_TO_SAY: &str = "Prefer not to say";

pub const INCOME_RANGES: &[&str] = &[
    "Under $25k",
    "$25k-$50k",
    "$50k-$75k",
    "$75k-$100k",
    "$100k-$150k",
    "Over $150k",
    PREFER_NOT_TO_SAY,
];

pub const DEBT_LEVELS: &[&str] = &["None", "Low", "Moderate", "High", PREFER_NOT_TO_SAY];

/// Savings runway buckets, measured in months of expenses covered.
pub const SAVINGS_BUCKETS: &[&str] = &[
    "Less than 1 month",
    "1-3 months",
    "3-6 months",
    "6-12 months",
    "More than 12 months",
    PREFER_NOT_TO_SAY,
];

/// Risk tolerance levels offered by the profile form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RiskTolerance {
    #[serde(rename = "Conservative")]
    Conservative,
    #[serde(rename = "Moderate")]
    #[default]
    Moderate,
    #[serde(rename = "Aggressive")]
    Aggressive,
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl RiskTolerance {
    pub const ALL: [RiskTolerance; 4] = [
        RiskTolerance::Conservative,
        RiskTolerance::Moderate,
        RiskTolerance::Aggressive,
        RiskTolerance::PreferNotToSay,
    ];
}

impl std::fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTolerance::Conservative => write!(f, "Conservative"),
            RiskTolerance::Moderate => write!(f, "Moderate"),
            RiskTolerance::Aggressive => write!(f, "Aggressive"),
            RiskTolerance::PreferNotToSay => write!(f, "{}", PREFER_NOT_TO_SAY),
        }
    }
}

impl std::str::FromStr for RiskTolerance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Conservative" => Ok(RiskTolerance::Conservative),
            "Moderate" => Ok(RiskTolerance::Moderate),
            "Aggressive" => Ok(RiskTolerance::Aggressive),
            PREFER_NOT_TO_SAY => Ok(RiskTolerance::PreferNotToSay),
            _ => Err(format!("Invalid risk tolerance: {}", s)),
        }
    }
}

/// The user's lightweight financial profile as sent to the backend.
///
/// Every field is optional in practice: an empty string means "not answered".
/// Only `risk_tolerance` carries a default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProfileData {
    #[serde(default)]
    pub income_range: String,
    #[serde(default)]
    pub debt_level: String,
    #[serde(default)]
    pub savings: String,
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
    #[serde(default)]
    pub financial_goals: String,
    /// Communication preference, e.g. "Brief answers". Omitted on the wire when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
}

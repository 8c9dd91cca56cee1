//! Work-injury risk classes.

use serde::{Deserialize, Serialize};

/// The five-level occupational risk scale that selects the work-injury
/// insurance rate.
///
/// Serialized with the Roman numerals used in the regulation (`"I"` to `"V"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskClass {
    /// Minimum risk (office work).
    #[serde(rename = "I")]
    Class1,
    /// Low risk.
    #[serde(rename = "II")]
    Class2,
    /// Medium risk.
    #[serde(rename = "III")]
    Class3,
    /// High risk.
    #[serde(rename = "IV")]
    Class4,
    /// Maximum risk.
    #[serde(rename = "V")]
    Class5,
}

impl RiskClass {
    /// All risk classes, lowest first.
    pub const ALL: [RiskClass; 5] = [
        RiskClass::Class1,
        RiskClass::Class2,
        RiskClass::Class3,
        RiskClass::Class4,
        RiskClass::Class5,
    ];

    /// Returns the regulatory label (`"I"` to `"V"`).
    pub fn label(&self) -> &'static str {
        match self {
            RiskClass::Class1 => "I",
            RiskClass::Class2 => "II",
            RiskClass::Class3 => "III",
            RiskClass::Class4 => "IV",
            RiskClass::Class5 => "V",
        }
    }
}

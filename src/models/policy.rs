//! Quotation policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AllocationMethod, FeeScheduleKind, RiskClass};

/// The choices a user makes when quoting a roster.
///
/// # Example
///
/// ```
/// use parafiscal_engine::models::{AllocationMethod, QuotationPolicy};
///
/// let policy: QuotationPolicy = serde_json::from_str(r#"{
///     "salary_percentage": "70",
///     "risk_class": "III",
///     "allocation": {"method": "proportional"},
///     "fee_schedule": "discretionary_bonus"
/// }"#).unwrap();
/// assert_eq!(policy.allocation, AllocationMethod::Proportional);
/// assert!(policy.cap_at_ceiling);
/// assert!(!policy.auto_redistribute);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationPolicy {
    /// Salary share of total compensation, 0-100.
    pub salary_percentage: Decimal,
    /// Occupational risk class of the roster.
    pub risk_class: RiskClass,
    /// How the bonus pool is shared out.
    pub allocation: AllocationMethod,
    /// Clamp each assignment to the statutory ceiling while allocating.
    #[serde(default = "default_true")]
    pub cap_at_ceiling: bool,
    /// Repair cap violations by redistributing the excess.
    #[serde(default)]
    pub auto_redistribute: bool,
    /// Which commission schedule prices the bonus pool.
    pub fee_schedule: FeeScheduleKind,
}

fn default_true() -> bool {
    true
}

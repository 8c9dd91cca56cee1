//! Commission (fee) models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which commission schedule prices a bonus pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeScheduleKind {
    /// Discretionary bonus, priced with the progressive bracket table.
    DiscretionaryBonus,
    /// Meal-subsidy bonus, priced with a single flat rate.
    MealSubsidy,
}

/// The commission resolved for a bonus pool.
///
/// Amounts are exact: `base_commission = pool * rate`,
/// `tax = base_commission * tax_rate`, `total = base_commission + tax`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTierResult {
    /// The schedule that priced the pool.
    pub schedule: FeeScheduleKind,
    /// The pool that was priced.
    pub pool: Decimal,
    /// The commission rate applied to the whole pool.
    pub rate: Decimal,
    /// Human-readable description of the matched tier.
    pub tier_label: String,
    /// `pool * rate`.
    pub base_commission: Decimal,
    /// The consumption-tax rate applied to the commission.
    pub tax_rate: Decimal,
    /// `base_commission * tax_rate`.
    pub tax: Decimal,
    /// `base_commission + tax`.
    pub total: Decimal,
}

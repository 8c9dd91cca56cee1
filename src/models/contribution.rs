//! Statutory contribution breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The six employer contributions owed on a salary base, plus their sum.
///
/// Always build one through [`ContributionBreakdown::from_components`] so the
/// total can never drift from its parts.
///
/// # Example
///
/// ```
/// use parafiscal_engine::models::ContributionBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = ContributionBreakdown::from_components(
///     Decimal::from(85),
///     Decimal::from(120),
///     Decimal::from(5),
///     Decimal::from(20),
///     Decimal::from(30),
///     Decimal::from(40),
/// );
/// assert_eq!(breakdown.total, Decimal::from(300));
/// assert!(breakdown.is_consistent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    /// Health insurance (EPS).
    pub health: Decimal,
    /// Pension fund.
    pub pension: Decimal,
    /// Work-injury insurance (ARL), rate depends on the risk class.
    pub work_injury: Decimal,
    /// Training levy (SENA).
    pub training_levy: Decimal,
    /// Family-welfare levy (ICBF).
    pub family_welfare: Decimal,
    /// Compensation-fund levy (caja de compensación).
    pub compensation_fund: Decimal,
    /// Sum of the six contributions.
    pub total: Decimal,
}

impl ContributionBreakdown {
    /// Builds a breakdown whose total is the exact sum of the components.
    pub fn from_components(
        health: Decimal,
        pension: Decimal,
        work_injury: Decimal,
        training_levy: Decimal,
        family_welfare: Decimal,
        compensation_fund: Decimal,
    ) -> Self {
        let total =
            health + pension + work_injury + training_levy + family_welfare + compensation_fund;
        Self {
            health,
            pension,
            work_injury,
            training_levy,
            family_welfare,
            compensation_fund,
            total,
        }
    }

    /// A breakdown where every amount is zero.
    pub fn zero() -> Self {
        Self::from_components(
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        )
    }

    /// Returns true if `total` equals the sum of the named components.
    pub fn is_consistent(&self) -> bool {
        self.total
            == self.health
                + self.pension
                + self.work_injury
                + self.training_levy
                + self.family_welfare
                + self.compensation_fund
    }
}

//! Compensation scenarios and the savings comparison between them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ContributionBreakdown, RiskClass};

/// Which compensation structure a scenario models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// All compensation paid as salary.
    Traditional,
    /// Compensation split between salary and an exempt bonus.
    Structured,
}

/// A compensation structure applied to a whole roster.
///
/// Contributions are computed on `salary_base_total` only; the bonus share
/// is exempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationScenario {
    /// The kind of scenario.
    pub kind: ScenarioKind,
    /// Human-readable label (e.g. "Structured 70/30").
    pub label: String,
    /// Share of total compensation paid as salary, 0-100.
    pub salary_percentage: Decimal,
    /// Share of total compensation paid as bonus, `100 - salary_percentage`.
    pub bonus_percentage: Decimal,
    /// Sum of the roster's base salaries.
    pub total_compensation: Decimal,
    /// The portion of total compensation subject to contributions.
    pub salary_base_total: Decimal,
    /// The portion of total compensation paid as exempt bonus.
    pub bonus_total: Decimal,
    /// The risk class used for the work-injury rate.
    pub risk_class: RiskClass,
    /// Contributions owed on `salary_base_total`.
    pub contributions: ContributionBreakdown,
}

/// The difference in employer contributions between two scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsResult {
    /// The all-salary baseline.
    pub traditional: CompensationScenario,
    /// The salary/bonus split being proposed.
    pub structured: CompensationScenario,
    /// `traditional.contributions.total - structured.contributions.total`.
    pub monthly_savings: Decimal,
    /// `monthly_savings / traditional total * 100`, rounded to two places.
    /// Zero when the traditional total is zero.
    pub percentage_reduction: Decimal,
}

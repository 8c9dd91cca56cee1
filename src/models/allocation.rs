//! Bonus allocation models.
//!
//! This module contains the per-employee [`BonusAssignment`], the
//! [`ValidationResult`] produced by the cap validator, and the
//! [`RedistributionResult`] produced by the excess redistributor.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Employee;

/// How a bonus pool is shared out across a roster.
///
/// # Example
///
/// ```
/// use parafiscal_engine::models::AllocationMethod;
///
/// let method: AllocationMethod =
///     serde_json::from_str(r#"{"method": "fixed", "amount_per_employee": "600000"}"#).unwrap();
/// assert!(matches!(method, AllocationMethod::Fixed { .. }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum AllocationMethod {
    /// Each employee receives `salary / total salary * pool`.
    Proportional,
    /// Each employee receives the same nominal amount.
    Fixed {
        /// The nominal bonus per employee.
        amount_per_employee: Decimal,
    },
}

/// The bonus assigned to one employee.
///
/// When a ceiling was applied and the nominal share exceeded it,
/// `allocated_bonus` holds the ceiling and `excess_amount` holds the part
/// that was clamped off, so the nominal share is always
/// `allocated_bonus + excess_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusAssignment {
    /// The employee's ID.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The employee's monthly base salary.
    pub salary: Decimal,
    /// The bonus actually assigned.
    pub allocated_bonus: Decimal,
    /// True if the nominal share was above the ceiling.
    pub exceeds_cap: bool,
    /// `max(0, nominal - ceiling)`.
    pub excess_amount: Decimal,
}

impl BonusAssignment {
    /// Assigns `nominal` to `employee`, clamping it to `ceiling` if one is given.
    ///
    /// # Example
    ///
    /// ```
    /// use parafiscal_engine::models::{BonusAssignment, Employee};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new("emp_001", "Ana", Decimal::from(3_000_000));
    /// let assignment = BonusAssignment::assess(
    ///     &employee,
    ///     Decimal::from(600_000),
    ///     Some(Decimal::from(500_000)),
    /// );
    /// assert_eq!(assignment.allocated_bonus, Decimal::from(500_000));
    /// assert_eq!(assignment.excess_amount, Decimal::from(100_000));
    /// assert!(assignment.exceeds_cap);
    /// ```
    pub fn assess(employee: &Employee, nominal: Decimal, ceiling: Option<Decimal>) -> Self {
        let (allocated_bonus, excess_amount) = match ceiling {
            Some(cap) if nominal > cap => (cap, nominal - cap),
            _ => (nominal, Decimal::ZERO),
        };

        Self {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            salary: employee.salary,
            allocated_bonus,
            exceeds_cap: excess_amount > Decimal::ZERO,
            excess_amount,
        }
    }

    /// The share this employee was entitled to before any clamping.
    pub fn nominal_bonus(&self) -> Decimal {
        self.allocated_bonus + self.excess_amount
    }

    /// How far the nominal share sits above `ceiling` (zero if it does not).
    pub fn excess_over(&self, ceiling: Decimal) -> Decimal {
        (self.nominal_bonus() - ceiling).max(Decimal::ZERO)
    }

    /// Returns a copy holding `amount` as its nominal share, assessed
    /// against `ceiling` the same way [`BonusAssignment::assess`] does.
    pub(crate) fn with_bonus(&self, amount: Decimal, ceiling: Decimal) -> Self {
        let excess_amount = (amount - ceiling).max(Decimal::ZERO);
        Self {
            allocated_bonus: amount - excess_amount,
            exceeds_cap: excess_amount > Decimal::ZERO,
            excess_amount,
            ..self.clone()
        }
    }
}

/// A single assignment that is above the statutory ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapViolation {
    /// The employee's ID.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The nominal bonus that was checked.
    pub nominal_bonus: Decimal,
    /// The ceiling it was checked against.
    pub ceiling: Decimal,
    /// `nominal_bonus - ceiling`.
    pub excess_amount: Decimal,
}

/// The outcome of checking an allocation against the statutory ceiling.
///
/// A violation is a reportable state, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True exactly when `violations` is empty.
    pub valid: bool,
    /// The ceiling used for the check.
    pub ceiling: Decimal,
    /// Violations in roster order.
    pub violations: Vec<CapViolation>,
    /// Sum of `excess_amount` across all violations.
    pub total_excess: Decimal,
}

/// The repaired allocation produced by excess redistribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedistributionResult {
    /// Assignments in the original roster order.
    pub assignments: Vec<BonusAssignment>,
    /// Excess freed from over-cap entries and placed with under-cap entries.
    pub redistributed_amount: Decimal,
    /// Excess that found no headroom and was left unplaced.
    pub undistributed_amount: Decimal,
}

impl RedistributionResult {
    /// Sum of the assigned bonuses after repair.
    pub fn total_allocated(&self) -> Decimal {
        self.assignments.iter().map(|a| a.allocated_bonus).sum()
    }
}

//! Bonus pool allocation.
//!
//! This module shares a bonus across a roster, either proportionally to
//! salary or as the same amount per head. When a ceiling is supplied, shares
//! above it are clamped and flagged for the caller to repair with
//! [`redistribute_excess`](super::redistribute_excess); the pool is never
//! renormalized here.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{BonusAssignment, Employee, validate_roster};

use super::rounding::round_currency;

/// Allocates `pool` in proportion to each employee's share of total salary.
///
/// Each share is `salary / total salary * pool`, rounded to cents, so the
/// shares add up to the pool within one cent per employee.
///
/// # Arguments
///
/// * `roster` - The employees sharing the pool
/// * `pool` - The bonus pool to share out (must not be negative)
/// * `ceiling` - Optional per-employee cap; shares above it are clamped and flagged
///
/// # Errors
///
/// Returns `InvalidInput` for a negative pool or ceiling or a salary sum that
/// overflows, and `InvalidEmployee` for a malformed roster.
///
/// # Examples
///
/// ```
/// use parafiscal_engine::calculation::allocate_proportional;
/// use parafiscal_engine::models::Employee;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let roster = vec![
///     Employee::new("emp_001", "Ana", Decimal::from(3_000_000)),
///     Employee::new("emp_002", "Luis", Decimal::from(4_000_000)),
///     Employee::new("emp_003", "Marta", Decimal::from(5_000_000)),
/// ];
///
/// let assignments = allocate_proportional(&roster, Decimal::from(1_000_000), None).unwrap();
/// assert_eq!(assignments[0].allocated_bonus, Decimal::from(250_000));
/// assert_eq!(assignments[1].allocated_bonus, Decimal::from_str("333333.33").unwrap());
/// assert_eq!(assignments[2].allocated_bonus, Decimal::from_str("416666.67").unwrap());
/// ```
pub fn allocate_proportional(
    roster: &[Employee],
    pool: Decimal,
    ceiling: Option<Decimal>,
) -> EngineResult<Vec<BonusAssignment>> {
    check_non_negative("pool", pool)?;
    check_ceiling(ceiling)?;
    validate_roster(roster)?;

    let total_salary = roster
        .iter()
        .try_fold(Decimal::ZERO, |acc, e| acc.checked_add(e.salary))
        .ok_or_else(|| EngineError::overflow("total_salary"))?;

    Ok(roster
        .iter()
        .map(|employee| {
            let share = if total_salary.is_zero() {
                Decimal::ZERO
            } else {
                round_currency(employee.salary / total_salary * pool)
            };
            assess(employee, share, ceiling)
        })
        .collect())
}

/// Allocates the same nominal amount to every employee.
///
/// # Errors
///
/// Returns `InvalidInput` for a negative amount or ceiling and
/// `InvalidEmployee` for a malformed roster.
///
/// # Examples
///
/// ```
/// use parafiscal_engine::calculation::allocate_fixed;
/// use parafiscal_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let roster = vec![Employee::new("emp_001", "Ana", Decimal::from(3_000_000))];
/// let assignments = allocate_fixed(
///     &roster,
///     Decimal::from(600_000),
///     Some(Decimal::from(500_000)),
/// ).unwrap();
/// assert_eq!(assignments[0].allocated_bonus, Decimal::from(500_000));
/// assert!(assignments[0].exceeds_cap);
/// ```
pub fn allocate_fixed(
    roster: &[Employee],
    amount_per_employee: Decimal,
    ceiling: Option<Decimal>,
) -> EngineResult<Vec<BonusAssignment>> {
    check_non_negative("amount_per_employee", amount_per_employee)?;
    check_ceiling(ceiling)?;
    validate_roster(roster)?;

    Ok(roster
        .iter()
        .map(|employee| assess(employee, amount_per_employee, ceiling))
        .collect())
}

fn assess(employee: &Employee, nominal: Decimal, ceiling: Option<Decimal>) -> BonusAssignment {
    let assignment = BonusAssignment::assess(employee, nominal, ceiling);
    if assignment.exceeds_cap {
        debug!(
            employee_id = %assignment.employee_id,
            nominal = %nominal,
            allocated = %assignment.allocated_bonus,
            excess = %assignment.excess_amount,
            "Bonus clamped to ceiling"
        );
    }
    assignment
}

fn check_ceiling(ceiling: Option<Decimal>) -> EngineResult<()> {
    match ceiling {
        Some(cap) => check_non_negative("ceiling", cap),
        None => Ok(()),
    }
}

fn check_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("must not be negative, got {}", value),
        });
    }
    Ok(())
}

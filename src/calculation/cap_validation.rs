//! Statutory ceiling validation.

use rust_decimal::Decimal;

use crate::models::{BonusAssignment, CapViolation, ValidationResult};

/// Checks every assignment against the statutory per-employee ceiling.
///
/// Each assignment is judged on its nominal share (allocated bonus plus any
/// amount already clamped off), so clamped and unclamped allocations report
/// the same excess. The input is not modified.
///
/// # Examples
///
/// ```
/// use parafiscal_engine::calculation::{allocate_fixed, validate_allocation};
/// use parafiscal_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let roster = vec![
///     Employee::new("emp_001", "Ana", Decimal::from(3_000_000)),
///     Employee::new("emp_002", "Luis", Decimal::from(4_000_000)),
/// ];
/// let assignments = allocate_fixed(&roster, Decimal::from(600_000), None).unwrap();
///
/// let result = validate_allocation(&assignments, Decimal::from(500_000));
/// assert!(!result.valid);
/// assert_eq!(result.violations.len(), 2);
/// assert_eq!(result.total_excess, Decimal::from(200_000));
/// ```
pub fn validate_allocation(assignments: &[BonusAssignment], ceiling: Decimal) -> ValidationResult {
    let violations: Vec<CapViolation> = assignments
        .iter()
        .filter_map(|assignment| {
            let excess_amount = assignment.excess_over(ceiling);
            (excess_amount > Decimal::ZERO).then(|| CapViolation {
                employee_id: assignment.employee_id.clone(),
                employee_name: assignment.employee_name.clone(),
                nominal_bonus: assignment.nominal_bonus(),
                ceiling,
                excess_amount,
            })
        })
        .collect();

    let total_excess = violations.iter().map(|v| v.excess_amount).sum();

    ValidationResult {
        valid: violations.is_empty(),
        ceiling,
        violations,
        total_excess,
    }
}

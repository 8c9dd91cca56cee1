//! Excess redistribution.
//!
//! This module repairs an allocation that breaks the statutory ceiling: the
//! excess above the ceiling is freed from over-cap entries and handed to
//! under-cap entries in proportion to their headroom.
//!
//! The repair is a single pass. Increments are capped at each entry's
//! headroom, so the pass can never push an entry over the ceiling, but when
//! total headroom is smaller than the freed excess the remainder is left
//! unplaced and reported in [`RedistributionResult::undistributed_amount`].
//! There is no second round.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{BonusAssignment, RedistributionResult};

use super::rounding::round_currency;

/// Clamps over-cap assignments to `ceiling` and redistributes the freed
/// excess among under-cap assignments, proportionally to headroom.
///
/// If there are no over-cap entries, or no under-cap entries to absorb the
/// excess, the assignments are returned unchanged and the undistributed
/// amount is what the input had already clamped off; unclamped shares keep
/// their full amount and leave nothing unplaced. Entries sitting exactly at
/// the ceiling are left alone. Roster order is preserved.
///
/// Increments are rounded to cents; the under-cap entry with the most
/// headroom takes the rounding remainder so the amount placed matches the
/// amount available.
///
/// # Examples
///
/// ```
/// use parafiscal_engine::calculation::{allocate_proportional, redistribute_excess};
/// use parafiscal_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let roster = vec![
///     Employee::new("emp_001", "Ana", Decimal::from(1_000_000)),
///     Employee::new("emp_002", "Luis", Decimal::from(3_000_000)),
/// ];
/// let ceiling = Decimal::from(600_000);
/// // Nominal shares: 250,000 and 750,000, the second 150,000 over the ceiling.
/// let assignments = allocate_proportional(&roster, Decimal::from(1_000_000), Some(ceiling)).unwrap();
///
/// let result = redistribute_excess(&assignments, ceiling);
/// assert_eq!(result.assignments[0].allocated_bonus, Decimal::from(400_000));
/// assert_eq!(result.assignments[1].allocated_bonus, Decimal::from(600_000));
/// assert_eq!(result.undistributed_amount, Decimal::ZERO);
/// ```
pub fn redistribute_excess(
    assignments: &[BonusAssignment],
    ceiling: Decimal,
) -> RedistributionResult {
    let freed: Decimal = assignments.iter().map(|a| a.excess_over(ceiling)).sum();
    let under_cap: Vec<usize> = assignments
        .iter()
        .enumerate()
        .filter(|(_, a)| a.nominal_bonus() < ceiling)
        .map(|(index, _)| index)
        .collect();

    if freed.is_zero() || under_cap.is_empty() {
        let clamped_off: Decimal = assignments.iter().map(|a| a.excess_amount).sum();
        if !freed.is_zero() {
            warn!(
                excess = %freed,
                unplaced = %clamped_off,
                "No assignment has headroom below the ceiling, allocation left unchanged"
            );
        }
        return RedistributionResult {
            assignments: assignments.to_vec(),
            redistributed_amount: Decimal::ZERO,
            undistributed_amount: clamped_off,
        };
    }

    let headroom: Vec<Decimal> = under_cap
        .iter()
        .map(|&index| ceiling - assignments[index].nominal_bonus())
        .collect();
    let total_headroom: Decimal = headroom.iter().copied().sum();
    let placeable = freed.min(total_headroom);

    // The entry with the most headroom absorbs the rounding remainder.
    let absorber = headroom
        .iter()
        .enumerate()
        .max_by_key(|(_, room)| **room)
        .map_or(0, |(position, _)| position);

    let mut increments = vec![Decimal::ZERO; assignments.len()];
    let mut placed = Decimal::ZERO;
    for (position, (&index, &room)) in under_cap.iter().zip(&headroom).enumerate() {
        if position == absorber {
            continue;
        }
        let increment = round_currency(freed * room / total_headroom)
            .min(room)
            .min(placeable - placed);
        increments[index] = increment;
        placed += increment;
    }
    let increment = (placeable - placed).min(headroom[absorber]);
    increments[under_cap[absorber]] = increment;
    placed += increment;

    let repaired: Vec<BonusAssignment> = assignments
        .iter()
        .zip(&increments)
        .map(|(assignment, &increment)| {
            if assignment.nominal_bonus() > ceiling {
                assignment.with_bonus(ceiling, ceiling)
            } else {
                assignment.with_bonus(assignment.nominal_bonus() + increment, ceiling)
            }
        })
        .collect();

    let undistributed_amount = (freed - placed).max(Decimal::ZERO);

    debug!(
        freed = %freed,
        total_headroom = %total_headroom,
        redistributed = %placed,
        recipients = under_cap.len(),
        "Redistributed excess above ceiling"
    );
    if undistributed_amount > Decimal::ZERO {
        warn!(
            undistributed = %undistributed_amount,
            "Headroom exhausted, excess left unplaced"
        );
    }

    RedistributionResult {
        assignments: repaired,
        redistributed_amount: placed,
        undistributed_amount,
    }
}

//! Calculation logic for the Parafiscal Calculation Engine.
//!
//! This module contains the calculation functions for a quotation:
//! contribution breakdowns, traditional and structured compensation
//! scenarios, savings evaluation, bonus allocation, statutory ceiling
//! validation, excess redistribution, commission fee resolution, and the
//! end-to-end quotation that chains them together.

mod allocation;
mod cap_validation;
mod contributions;
mod fee_schedule;
mod quotation;
mod redistribution;
mod rounding;
mod savings;
mod scenario;

pub use allocation::{allocate_fixed, allocate_proportional};
pub use cap_validation::validate_allocation;
pub use contributions::calculate_contributions;
pub use fee_schedule::{resolve_fee, resolve_fee_for};
pub use quotation::calculate_quotation;
pub use redistribution::redistribute_excess;
pub use rounding::{DECIMAL_PLACES, percentage_of, round_currency, safe_ratio};
pub use savings::evaluate_savings;
pub use scenario::{build_structured_scenario, build_traditional_scenario};

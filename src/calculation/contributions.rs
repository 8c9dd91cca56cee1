//! Statutory contribution calculation.
//!
//! This module maps a salary base and a risk class to the six employer
//! contributions (health, pension, work-injury, training levy, family
//! welfare and compensation fund).

use rust_decimal::Decimal;

use crate::config::ContributionRates;
use crate::error::{EngineError, EngineResult};
use crate::models::{ContributionBreakdown, RiskClass};

/// Calculates the employer contributions owed on a salary base.
///
/// Each contribution is `salary_base * rate`. Five rates are fixed by the
/// rule set; the work-injury rate is selected by `risk_class`. No rounding is
/// applied, so the breakdown total is exactly the sum of its parts.
///
/// # Arguments
///
/// * `salary_base` - The amount subject to contributions (must not be negative)
/// * `risk_class` - Selects the work-injury insurance rate
/// * `rates` - The contribution rates of the active rule set
///
/// # Returns
///
/// Returns the `ContributionBreakdown`, or `InvalidInput` if `salary_base`
/// is negative or a contribution overflows the decimal range.
///
/// # Examples
///
/// ```
/// use parafiscal_engine::calculation::calculate_contributions;
/// use parafiscal_engine::config::ConfigLoader;
/// use parafiscal_engine::models::RiskClass;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/co_2025").unwrap();
/// let breakdown = calculate_contributions(
///     Decimal::from(1_000_000),
///     RiskClass::Class1,
///     loader.contribution_rates(),
/// ).unwrap();
/// assert_eq!(breakdown.health, Decimal::from(85_000));
/// assert!(breakdown.is_consistent());
/// ```
pub fn calculate_contributions(
    salary_base: Decimal,
    risk_class: RiskClass,
    rates: &ContributionRates,
) -> EngineResult<ContributionBreakdown> {
    if salary_base < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "salary_base".to_string(),
            message: format!("must not be negative, got {}", salary_base),
        });
    }

    let part = |field: &str, rate: Decimal| {
        salary_base
            .checked_mul(rate)
            .ok_or_else(|| EngineError::overflow(field))
    };
    let health = part("health", rates.health)?;
    let pension = part("pension", rates.pension)?;
    let work_injury = part("work_injury", rates.work_injury.rate(risk_class))?;
    let training_levy = part("training_levy", rates.training_levy)?;
    let family_welfare = part("family_welfare", rates.family_welfare)?;
    let compensation_fund = part("compensation_fund", rates.compensation_fund)?;

    // from_components adds unchecked, so prove the total fits first.
    [pension, work_injury, training_levy, family_welfare, compensation_fund]
        .into_iter()
        .try_fold(health, |acc, value| acc.checked_add(value))
        .ok_or_else(|| EngineError::overflow("contributions_total"))?;

    Ok(ContributionBreakdown::from_components(
        health,
        pension,
        work_injury,
        training_levy,
        family_welfare,
        compensation_fund,
    ))
}

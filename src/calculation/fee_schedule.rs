//! Commission pricing on a bonus pool.
//!
//! This module resolves the service commission for a bonus pool against
//! either a progressive bracket table (discretionary bonuses) or a flat rate
//! (meal-subsidy bonuses), then adds consumption tax on the commission.

use rust_decimal::Decimal;

use crate::config::{EngineConfig, FeeSchedule};
use crate::error::{EngineError, EngineResult};
use crate::models::{FeeScheduleKind, FeeTierResult};

/// Prices a bonus pool against a fee schedule.
///
/// The matched rate applies to the entire pool; it is not a marginal rate.
/// Amounts are exact: `base = pool * rate`, `tax = base * tax_rate`,
/// `total = base + tax`.
///
/// # Arguments
///
/// * `pool` - The bonus pool to price (must not be negative)
/// * `kind` - Which kind of bonus the schedule prices, echoed in the result
/// * `schedule` - The progressive or flat schedule
/// * `tax_rate` - Consumption tax charged on the commission
///
/// # Errors
///
/// Returns `InvalidInput` for a negative pool or a commission that overflows,
/// and `NoMatchingBracket` if the progressive table does not cover the pool.
/// The latter is a configuration fault and never falls back to a default rate.
///
/// # Examples
///
/// ```
/// use parafiscal_engine::calculation::resolve_fee;
/// use parafiscal_engine::config::ConfigLoader;
/// use parafiscal_engine::models::FeeScheduleKind;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/co_2025").unwrap();
/// let kind = FeeScheduleKind::DiscretionaryBonus;
/// let fee = resolve_fee(
///     Decimal::from(15_000_000),
///     kind,
///     loader.fee_schedule(kind),
///     loader.config().consumption_tax_rate(),
/// ).unwrap();
/// assert_eq!(fee.base_commission, Decimal::from(525_000));
/// assert_eq!(fee.tax, Decimal::from(99_750));
/// assert_eq!(fee.total, Decimal::from(624_750));
/// ```
pub fn resolve_fee(
    pool: Decimal,
    kind: FeeScheduleKind,
    schedule: &FeeSchedule,
    tax_rate: Decimal,
) -> EngineResult<FeeTierResult> {
    if pool < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "pool".to_string(),
            message: format!("must not be negative, got {}", pool),
        });
    }

    let (rate, tier_label) = match schedule {
        FeeSchedule::Progressive(table) => {
            let bracket = table.bracket_for(pool)?;
            let label = bracket.label.clone().unwrap_or_else(|| match bracket.max {
                Some(max) => format!(
                    "{} to {} at {}%",
                    bracket.min.normalize(),
                    max.normalize(),
                    as_percent(bracket.rate)
                ),
                None => format!(
                    "{} and above at {}%",
                    bracket.min.normalize(),
                    as_percent(bracket.rate)
                ),
            });
            (bracket.rate, label)
        }
        FeeSchedule::Flat(flat) => {
            let label = flat
                .label
                .clone()
                .unwrap_or_else(|| format!("Flat rate {}%", as_percent(flat.rate)));
            (flat.rate, label)
        }
    };

    let base_commission = pool
        .checked_mul(rate)
        .ok_or_else(|| EngineError::overflow("base_commission"))?;
    let tax = base_commission
        .checked_mul(tax_rate)
        .ok_or_else(|| EngineError::overflow("tax"))?;
    let total = base_commission
        .checked_add(tax)
        .ok_or_else(|| EngineError::overflow("commission_total"))?;

    Ok(FeeTierResult {
        schedule: kind,
        pool,
        rate,
        tier_label,
        base_commission,
        tax_rate,
        tax,
        total,
    })
}

/// Prices a bonus pool with the schedule and tax rate of a rule set.
pub fn resolve_fee_for(
    pool: Decimal,
    kind: FeeScheduleKind,
    config: &EngineConfig,
) -> EngineResult<FeeTierResult> {
    resolve_fee(
        pool,
        kind,
        config.fee_schedule(kind),
        config.consumption_tax_rate(),
    )
}

fn as_percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}

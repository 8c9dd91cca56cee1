//! Savings evaluation between two compensation scenarios.

use crate::models::{CompensationScenario, SavingsResult};

use super::rounding::percentage_of;

/// Diffs two scenarios into absolute and percentage contribution savings.
///
/// `monthly_savings` is the exact difference of the two contribution totals;
/// `percentage_reduction` is that difference over the traditional total, on a
/// 0-100 scale rounded to two places, and zero when the traditional total is
/// zero.
///
/// # Examples
///
/// ```
/// use parafiscal_engine::calculation::{
///     build_structured_scenario, build_traditional_scenario, evaluate_savings,
/// };
/// use parafiscal_engine::config::ConfigLoader;
/// use parafiscal_engine::models::{Employee, RiskClass};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/co_2025").unwrap();
/// let rates = loader.contribution_rates();
/// let roster = vec![Employee::new("emp_001", "Ana", Decimal::from(1_000_000))];
///
/// let traditional = build_traditional_scenario(&roster, RiskClass::Class1, rates).unwrap();
/// let structured =
///     build_structured_scenario(&roster, Decimal::from(60), RiskClass::Class1, rates).unwrap();
///
/// let savings = evaluate_savings(traditional, structured);
/// assert_eq!(savings.percentage_reduction, Decimal::from(40));
/// ```
pub fn evaluate_savings(
    traditional: CompensationScenario,
    structured: CompensationScenario,
) -> SavingsResult {
    let monthly_savings = traditional.contributions.total - structured.contributions.total;
    let percentage_reduction = percentage_of(monthly_savings, traditional.contributions.total);

    SavingsResult {
        traditional,
        structured,
        monthly_savings,
        percentage_reduction,
    }
}

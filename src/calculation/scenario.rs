//! Compensation scenario construction.
//!
//! This module builds the two compensation structures compared by a
//! quotation: the traditional all-salary structure, and the structured
//! salary/bonus split where only the salary share carries contributions.

use rust_decimal::Decimal;

use crate::config::ContributionRates;
use crate::error::{EngineError, EngineResult};
use crate::models::{CompensationScenario, Employee, RiskClass, ScenarioKind, validate_roster};

use super::calculate_contributions;

/// Builds the traditional scenario: 100% salary, 0% bonus.
///
/// Contributions are computed on the full salary sum of the roster.
///
/// # Errors
///
/// Returns `InvalidEmployee` if any employee has a blank id, a duplicate id or
/// a non-positive salary, and `InvalidInput` if the salary sum overflows.
pub fn build_traditional_scenario(
    roster: &[Employee],
    risk_class: RiskClass,
    rates: &ContributionRates,
) -> EngineResult<CompensationScenario> {
    validate_roster(roster)?;

    let total_compensation = total_salary(roster)?;
    let contributions = calculate_contributions(total_compensation, risk_class, rates)?;

    Ok(CompensationScenario {
        kind: ScenarioKind::Traditional,
        label: "Traditional".to_string(),
        salary_percentage: Decimal::ONE_HUNDRED,
        bonus_percentage: Decimal::ZERO,
        total_compensation,
        salary_base_total: total_compensation,
        bonus_total: Decimal::ZERO,
        risk_class,
        contributions,
    })
}

/// Builds the structured scenario for a salary/bonus split.
///
/// `salary_percentage` of total compensation stays salary and carries
/// contributions; the remainder becomes exempt bonus.
///
/// # Arguments
///
/// * `roster` - The employees being quoted
/// * `salary_percentage` - Salary share on a 0-100 scale
/// * `risk_class` - Selects the work-injury insurance rate
/// * `rates` - The contribution rates of the active rule set
///
/// # Errors
///
/// Returns `InvalidPercentage` if `salary_percentage` is outside `[0, 100]`
/// (it is never clamped), `InvalidEmployee` for a malformed roster and
/// `InvalidInput` if the salary sum overflows.
///
/// # Examples
///
/// ```
/// use parafiscal_engine::calculation::build_structured_scenario;
/// use parafiscal_engine::config::ConfigLoader;
/// use parafiscal_engine::models::{Employee, RiskClass};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/co_2025").unwrap();
/// let roster = vec![
///     Employee::new("emp_001", "Ana", Decimal::from(3_000_000)),
///     Employee::new("emp_002", "Luis", Decimal::from(4_000_000)),
///     Employee::new("emp_003", "Marta", Decimal::from(5_000_000)),
/// ];
///
/// let scenario = build_structured_scenario(
///     &roster,
///     Decimal::from(70),
///     RiskClass::Class3,
///     loader.contribution_rates(),
/// ).unwrap();
/// assert_eq!(scenario.bonus_total, Decimal::from(3_600_000));
/// assert_eq!(scenario.bonus_percentage, Decimal::from(30));
/// ```
pub fn build_structured_scenario(
    roster: &[Employee],
    salary_percentage: Decimal,
    risk_class: RiskClass,
    rates: &ContributionRates,
) -> EngineResult<CompensationScenario> {
    if salary_percentage < Decimal::ZERO || salary_percentage > Decimal::ONE_HUNDRED {
        return Err(EngineError::InvalidPercentage {
            value: salary_percentage,
        });
    }
    validate_roster(roster)?;

    let bonus_percentage = Decimal::ONE_HUNDRED - salary_percentage;
    let total_compensation = total_salary(roster)?;
    let salary_base_total = total_compensation
        .checked_mul(salary_percentage)
        .ok_or_else(|| EngineError::overflow("salary_base_total"))?
        / Decimal::ONE_HUNDRED;
    let bonus_total = total_compensation - salary_base_total;

    // Bonuses are exempt: only the salary share is a contribution base.
    let contributions = calculate_contributions(salary_base_total, risk_class, rates)?;

    Ok(CompensationScenario {
        kind: ScenarioKind::Structured,
        label: format!(
            "Structured {}/{}",
            salary_percentage.normalize(),
            bonus_percentage.normalize()
        ),
        salary_percentage,
        bonus_percentage,
        total_compensation,
        salary_base_total,
        bonus_total,
        risk_class,
        contributions,
    })
}

fn total_salary(roster: &[Employee]) -> EngineResult<Decimal> {
    roster
        .iter()
        .try_fold(Decimal::ZERO, |acc, e| acc.checked_add(e.salary))
        .ok_or_else(|| EngineError::overflow("total_salary"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rates() -> ContributionRates {
        ConfigLoader::load("./config/co_2025")
            .unwrap()
            .contribution_rates()
            .clone()
    }

    fn sample_roster() -> Vec<Employee> {
        vec![
            Employee::new("emp_001", "Ana Torres", dec("3000000")),
            Employee::new("emp_002", "Luis Gómez", dec("4000000")),
            Employee::new("emp_003", "Marta Ruiz", dec("5000000")),
        ]
    }

    /// SB-001: traditional scenario on the sample roster
    #[test]
    fn test_traditional_scenario_uses_full_salary() {
        let scenario =
            build_traditional_scenario(&sample_roster(), RiskClass::Class3, &rates()).unwrap();

        assert_eq!(scenario.kind, ScenarioKind::Traditional);
        assert_eq!(scenario.total_compensation, dec("12000000"));
        assert_eq!(scenario.salary_base_total, dec("12000000"));
        assert_eq!(scenario.bonus_total, Decimal::ZERO);
        assert_eq!(scenario.salary_percentage, dec("100"));
        assert_eq!(scenario.bonus_percentage, Decimal::ZERO);
        assert_eq!(scenario.contributions.total, dec("3832320"));
    }

    /// SB-002: 70/30 split on the sample roster
    #[test]
    fn test_structured_scenario_70_30() {
        let scenario =
            build_structured_scenario(&sample_roster(), dec("70"), RiskClass::Class3, &rates())
                .unwrap();

        assert_eq!(scenario.kind, ScenarioKind::Structured);
        assert_eq!(scenario.label, "Structured 70/30");
        assert_eq!(scenario.total_compensation, dec("12000000"));
        assert_eq!(scenario.salary_base_total, dec("8400000"));
        assert_eq!(scenario.bonus_total, dec("3600000"));
        assert_eq!(scenario.bonus_percentage, dec("30"));
        assert_eq!(scenario.contributions.total, dec("2682624"));
    }

    #[test]
    fn test_salary_sum_beyond_decimal_range_is_rejected() {
        let half = Decimal::MAX / Decimal::TWO + Decimal::ONE;
        let roster = vec![
            Employee::new("emp_001", "Ana Torres", half),
            Employee::new("emp_002", "Luis Gómez", half),
        ];

        let result = build_traditional_scenario(&roster, RiskClass::Class1, &rates());
        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "total_salary"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }

        let result = build_structured_scenario(&roster, dec("70"), RiskClass::Class1, &rates());
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    /// SB-003: contributions ignore the bonus share
    #[test]
    fn test_structured_contributions_are_on_salary_share_only() {
        let rates = rates();
        let scenario =
            build_structured_scenario(&sample_roster(), dec("70"), RiskClass::Class3, &rates)
                .unwrap();
        let on_salary_only =
            calculate_contributions(dec("8400000"), RiskClass::Class3, &rates).unwrap();

        assert_eq!(scenario.contributions, on_salary_only);
    }

    #[test]
    fn test_structured_at_100_percent_matches_traditional_contributions() {
        let rates = rates();
        let traditional =
            build_traditional_scenario(&sample_roster(), RiskClass::Class2, &rates).unwrap();
        let structured =
            build_structured_scenario(&sample_roster(), dec("100"), RiskClass::Class2, &rates)
                .unwrap();

        assert_eq!(structured.bonus_total, Decimal::ZERO);
        assert_eq!(structured.contributions, traditional.contributions);
    }

    #[test]
    fn test_structured_at_0_percent_has_no_contributions() {
        let scenario =
            build_structured_scenario(&sample_roster(), Decimal::ZERO, RiskClass::Class1, &rates())
                .unwrap();

        assert_eq!(scenario.bonus_total, dec("12000000"));
        assert_eq!(scenario.contributions.total, Decimal::ZERO);
    }

    #[test]
    fn test_percentage_above_100_is_rejected() {
        let result =
            build_structured_scenario(&sample_roster(), dec("100.01"), RiskClass::Class1, &rates());
        match result {
            Err(EngineError::InvalidPercentage { value }) => assert_eq!(value, dec("100.01")),
            other => panic!("Expected InvalidPercentage, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_percentage_is_rejected() {
        let result =
            build_structured_scenario(&sample_roster(), dec("-5"), RiskClass::Class1, &rates());
        assert!(matches!(result, Err(EngineError::InvalidPercentage { .. })));
    }

    #[test]
    fn test_negative_salary_in_roster_is_rejected() {
        let roster = vec![Employee::new("emp_001", "Ana", dec("-3000000"))];
        let result = build_traditional_scenario(&roster, RiskClass::Class1, &rates());
        assert!(matches!(result, Err(EngineError::InvalidEmployee { .. })));
    }

    #[test]
    fn test_empty_roster_gives_zero_scenario() {
        let scenario =
            build_structured_scenario(&[], dec("70"), RiskClass::Class1, &rates()).unwrap();
        assert_eq!(scenario.total_compensation, Decimal::ZERO);
        assert_eq!(scenario.bonus_total, Decimal::ZERO);
        assert_eq!(scenario.contributions.total, Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn prop_salary_and_bonus_percentages_sum_to_100(
            basis_points in 0i64..=10_000i64,
            salaries in prop::collection::vec(1i64..50_000_000i64, 0..20),
        ) {
            let roster: Vec<Employee> = salaries
                .iter()
                .enumerate()
                .map(|(i, s)| Employee::new(format!("emp_{}", i), "Employee", Decimal::from(*s)))
                .collect();
            let percentage = Decimal::new(basis_points, 2);

            let scenario =
                build_structured_scenario(&roster, percentage, RiskClass::Class3, &rates()).unwrap();

            prop_assert_eq!(
                scenario.salary_percentage + scenario.bonus_percentage,
                Decimal::ONE_HUNDRED
            );
            prop_assert_eq!(
                scenario.salary_base_total + scenario.bonus_total,
                scenario.total_compensation
            );
        }
    }
}

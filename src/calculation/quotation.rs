//! End-to-end quotation.
//!
//! Runs a roster through both compensation scenarios, shares out the bonus
//! pool, checks it against the statutory ceiling, optionally repairs it, and
//! prices whatever ends up placed.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllocationMethod, AuditStep, AuditTrace, AuditWarning, BonusAssignment, Employee,
    FeeTierResult, QuotationPolicy, QuotationResult, QuotationSummary, SavingsResult,
};

use super::rounding::{round_currency, safe_ratio};
use super::{
    allocate_fixed, allocate_proportional, build_structured_scenario, build_traditional_scenario,
    evaluate_savings, redistribute_excess, resolve_fee_for, validate_allocation,
};

const MONTHS_PER_YEAR: u32 = 12;

/// Collects audit steps with sequential numbering.
struct AuditLog {
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
}

impl AuditLog {
    fn new() -> Self {
        Self {
            steps: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn step(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        self.steps.push(AuditStep {
            step_number: self.steps.len() as u32 + 1,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    fn warn(&mut self, code: &str, message: String, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message,
            severity: severity.to_string(),
        });
    }
}

/// Produces a complete quotation for a roster under the given policy.
///
/// The bonus pool is the structured scenario's bonus total for proportional
/// allocation, or the fixed amount times headcount for fixed allocation. The
/// commission is priced on the bonus actually placed with employees, after
/// clamping and any redistribution.
///
/// # Errors
///
/// Returns `InvalidEmployee` for a malformed roster, `InvalidPercentage` for
/// a salary percentage outside 0-100, `InvalidInput` for a negative fixed
/// amount or an amount that overflows the decimal range, and
/// `NoMatchingBracket` if the fee schedule cannot price the pool.
///
/// # Examples
///
/// ```
/// use parafiscal_engine::calculation::calculate_quotation;
/// use parafiscal_engine::config::ConfigLoader;
/// use parafiscal_engine::models::{
///     AllocationMethod, Employee, FeeScheduleKind, QuotationPolicy, RiskClass,
/// };
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/co_2025").unwrap();
/// let roster = vec![
///     Employee::new("emp_001", "Ana", Decimal::from(3_000_000)),
///     Employee::new("emp_002", "Luis", Decimal::from(4_000_000)),
///     Employee::new("emp_003", "Marta", Decimal::from(5_000_000)),
/// ];
/// let policy = QuotationPolicy {
///     salary_percentage: Decimal::from(70),
///     risk_class: RiskClass::Class3,
///     allocation: AllocationMethod::Proportional,
///     cap_at_ceiling: true,
///     auto_redistribute: true,
///     fee_schedule: FeeScheduleKind::DiscretionaryBonus,
/// };
///
/// let quotation = calculate_quotation(&roster, &policy, loader.config()).unwrap();
/// assert_eq!(quotation.summary.monthly_savings, Decimal::from(1_149_696));
/// assert_eq!(quotation.summary.bonus_pool, Decimal::from(3_600_000));
/// ```
pub fn calculate_quotation(
    roster: &[Employee],
    policy: &QuotationPolicy,
    config: &EngineConfig,
) -> EngineResult<QuotationResult> {
    let start_time = Instant::now();
    let mut audit = AuditLog::new();
    let rates = config.contribution_rates();

    let traditional = build_traditional_scenario(roster, policy.risk_class, rates)?;
    audit.step(
        "traditional_scenario",
        "Traditional Scenario",
        json!({
            "employee_count": roster.len(),
            "risk_class": policy.risk_class,
            "total_compensation": traditional.total_compensation,
        }),
        json!({
            "salary_base_total": traditional.salary_base_total,
            "contributions": traditional.contributions,
        }),
        format!(
            "All {} paid as salary; contributions {}",
            traditional.total_compensation, traditional.contributions.total
        ),
    );

    let structured =
        build_structured_scenario(roster, policy.salary_percentage, policy.risk_class, rates)?;
    audit.step(
        "structured_scenario",
        "Structured Scenario",
        json!({
            "salary_percentage": policy.salary_percentage,
            "total_compensation": structured.total_compensation,
        }),
        json!({
            "salary_base_total": structured.salary_base_total,
            "bonus_total": structured.bonus_total,
            "contributions": structured.contributions,
        }),
        format!(
            "{}% of {} as salary ({}), {} as exempt bonus; contributions {}",
            policy.salary_percentage,
            structured.total_compensation,
            structured.salary_base_total,
            structured.bonus_total,
            structured.contributions.total
        ),
    );

    let savings = evaluate_savings(traditional, structured);
    audit.step(
        "savings_evaluation",
        "Savings Evaluation",
        json!({
            "traditional_total": savings.traditional.contributions.total,
            "structured_total": savings.structured.contributions.total,
        }),
        json!({
            "monthly_savings": savings.monthly_savings,
            "percentage_reduction": savings.percentage_reduction,
        }),
        format!(
            "{} - {} = {} saved per month ({}%)",
            savings.traditional.contributions.total,
            savings.structured.contributions.total,
            savings.monthly_savings,
            savings.percentage_reduction
        ),
    );

    let ceiling = config.bonus_ceiling();
    let allocation_ceiling = policy.cap_at_ceiling.then_some(ceiling);
    let (nominal_pool, assignments) = match &policy.allocation {
        AllocationMethod::Proportional => {
            let pool = savings.structured.bonus_total;
            (pool, allocate_proportional(roster, pool, allocation_ceiling)?)
        }
        AllocationMethod::Fixed {
            amount_per_employee,
        } => (
            amount_per_employee
                .checked_mul(Decimal::from(roster.len()))
                .ok_or_else(|| EngineError::overflow("bonus_pool"))?,
            allocate_fixed(roster, *amount_per_employee, allocation_ceiling)?,
        ),
    };
    audit.step(
        "bonus_allocation",
        "Bonus Allocation",
        json!({
            "allocation": policy.allocation,
            "pool": nominal_pool,
            "ceiling": allocation_ceiling,
        }),
        json!({ "assignments": assignments }),
        format!(
            "{} shared across {} employees{}",
            nominal_pool,
            assignments.len(),
            if policy.cap_at_ceiling {
                format!(", clamped at {}", ceiling)
            } else {
                String::new()
            }
        ),
    );

    let validation = validate_allocation(&assignments, ceiling);
    audit.step(
        "cap_validation",
        "Cap Validation",
        json!({ "ceiling": ceiling }),
        json!({
            "valid": validation.valid,
            "violations": validation.violations,
            "total_excess": validation.total_excess,
        }),
        if validation.valid {
            format!("Every assignment is within the ceiling of {}", ceiling)
        } else {
            format!(
                "{} assignments exceed the ceiling of {} by {} in total",
                validation.violations.len(),
                ceiling,
                validation.total_excess
            )
        },
    );

    let redistribution = (policy.auto_redistribute && !validation.valid).then(|| {
        let result = redistribute_excess(&assignments, ceiling);
        audit.step(
            "excess_redistribution",
            "Excess Redistribution",
            json!({
                "ceiling": ceiling,
                "total_excess": validation.total_excess,
            }),
            json!({
                "redistributed_amount": result.redistributed_amount,
                "undistributed_amount": result.undistributed_amount,
            }),
            format!(
                "{} moved to employees under the ceiling, {} left unplaced",
                result.redistributed_amount, result.undistributed_amount
            ),
        );
        result
    });

    let final_assignments: &[BonusAssignment] = match &redistribution {
        Some(result) => &result.assignments,
        None => &assignments,
    };
    let bonus_pool: Decimal = final_assignments.iter().map(|a| a.allocated_bonus).sum();

    match &redistribution {
        Some(result) => {
            if result.undistributed_amount > Decimal::ZERO {
                audit.warn(
                    "EXCESS_UNDISTRIBUTED",
                    format!(
                        "{} of excess could not be placed without breaching the ceiling",
                        result.undistributed_amount
                    ),
                    "high",
                );
            }
            // Unclamped shares with no headroom to move into stay as allocated.
            let over: Vec<Decimal> = result
                .assignments
                .iter()
                .filter(|a| a.allocated_bonus > ceiling)
                .map(|a| a.allocated_bonus - ceiling)
                .collect();
            if !over.is_empty() {
                audit.warn(
                    "CAP_EXCEEDED",
                    format!(
                        "{} assignments still exceed the ceiling of {} by {} in total",
                        over.len(),
                        ceiling,
                        over.iter().copied().sum::<Decimal>()
                    ),
                    "medium",
                );
            }
        }
        None if !validation.valid => audit.warn(
            "CAP_EXCEEDED",
            format!(
                "{} assignments exceed the ceiling of {} by {} in total",
                validation.violations.len(),
                ceiling,
                validation.total_excess
            ),
            "medium",
        ),
        None => {}
    }

    let fee = resolve_fee_for(bonus_pool, policy.fee_schedule, config)?;
    audit.step(
        "commission",
        "Commission",
        json!({
            "pool": bonus_pool,
            "schedule": policy.fee_schedule,
        }),
        json!({
            "rate": fee.rate,
            "tier_label": fee.tier_label,
            "base_commission": fee.base_commission,
            "tax": fee.tax,
            "total": fee.total,
        }),
        format!(
            "{} x {} = {}, plus {} tax = {}",
            bonus_pool, fee.rate, fee.base_commission, fee.tax, fee.total
        ),
    );

    let summary = summarize(roster.len(), &savings, bonus_pool, &fee)?;
    debug!(
        employees = summary.employee_count,
        monthly_savings = %summary.monthly_savings,
        commission = %summary.commission_total,
        "Quotation summarized"
    );

    Ok(QuotationResult {
        quotation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        ruleset_code: config.ruleset().code.clone(),
        savings,
        policy: policy.clone(),
        assignments,
        validation,
        redistribution,
        fee,
        summary,
        audit_trace: AuditTrace {
            steps: audit.steps,
            warnings: audit.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

fn summarize(
    employee_count: usize,
    savings: &SavingsResult,
    bonus_pool: Decimal,
    fee: &FeeTierResult,
) -> EngineResult<QuotationSummary> {
    let monthly_savings = savings.monthly_savings;
    let annual_savings = monthly_savings
        .checked_mul(Decimal::from(MONTHS_PER_YEAR))
        .ok_or_else(|| EngineError::overflow("annual_savings"))?;
    Ok(QuotationSummary {
        employee_count,
        monthly_savings,
        annual_savings,
        percentage_reduction: savings.percentage_reduction,
        bonus_pool,
        commission_total: fee.total,
        net_monthly_benefit: monthly_savings - fee.total,
        savings_to_commission_ratio: round_currency(safe_ratio(monthly_savings, fee.total)),
    })
}

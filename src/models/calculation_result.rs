//! Quotation result models for the Parafiscal Calculation Engine.
//!
//! This module contains the [`QuotationResult`] type and its associated structures
//! that capture all outputs from a quotation, including both compensation
//! scenarios, the bonus allocation, its cap validation, the commission and an
//! audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    BonusAssignment, FeeTierResult, QuotationPolicy, RedistributionResult, SavingsResult,
    ValidationResult,
};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results the user should review, such as bonuses above the
/// statutory ceiling, without failing the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a quotation.
///
/// # Example
///
/// ```
/// use parafiscal_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// Headline figures handed to the UI, PDF and notification layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationSummary {
    /// Number of employees on the roster.
    pub employee_count: usize,
    /// Contributions saved per month by the structured scenario.
    pub monthly_savings: Decimal,
    /// `monthly_savings * 12`.
    pub annual_savings: Decimal,
    /// Percentage reduction in monthly contributions.
    pub percentage_reduction: Decimal,
    /// Total bonus actually placed with employees.
    pub bonus_pool: Decimal,
    /// Total commission cost including tax.
    pub commission_total: Decimal,
    /// `monthly_savings - commission_total`.
    pub net_monthly_benefit: Decimal,
    /// `monthly_savings / commission_total`, rounded to two places.
    /// Zero when there is no commission.
    pub savings_to_commission_ratio: Decimal,
}

/// The complete result of a quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationResult {
    /// Unique identifier for this quotation.
    pub quotation_id: Uuid,
    /// When the quotation was calculated.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Code of the rule set used (e.g. "CO-2025").
    pub ruleset_code: String,
    /// The traditional vs structured comparison.
    pub savings: SavingsResult,
    /// The policy the quotation was calculated under.
    pub policy: QuotationPolicy,
    /// Per-employee bonus assignments as first allocated.
    pub assignments: Vec<BonusAssignment>,
    /// Cap validation of `assignments`.
    pub validation: ValidationResult,
    /// The repaired allocation, present when redistribution was requested
    /// and there was excess to move.
    pub redistribution: Option<RedistributionResult>,
    /// The commission on the placed bonus pool.
    pub fee: FeeTierResult,
    /// Headline figures.
    pub summary: QuotationSummary,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

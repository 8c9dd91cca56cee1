//! Core data models for the Parafiscal Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.
//! Every value is created fresh per calculation; nothing here is mutated by
//! the engine once constructed.

mod allocation;
mod calculation_result;
mod contribution;
mod employee;
mod fee;
mod policy;
mod risk_class;
mod scenario;

pub use allocation::{
    AllocationMethod, BonusAssignment, CapViolation, RedistributionResult, ValidationResult,
};
pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, QuotationResult, QuotationSummary,
};
pub use contribution::ContributionBreakdown;
pub use employee::{Employee, validate_roster};
pub use fee::{FeeScheduleKind, FeeTierResult};
pub use policy::QuotationPolicy;
pub use risk_class::RiskClass;
pub use scenario::{CompensationScenario, SavingsResult, ScenarioKind};

//! Request types for the Parafiscal Calculation Engine API.
//!
//! This module defines the JSON request structures for the `/quote` and
//! `/fee` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AllocationMethod, Employee, FeeScheduleKind, QuotationPolicy, RiskClass};

/// Request body for the `/quote` endpoint.
///
/// Contains the roster and every policy choice needed to produce a
/// quotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationRequest {
    /// The employees being quoted.
    pub employees: Vec<EmployeeRequest>,
    /// Salary share of total compensation, 0-100.
    pub salary_percentage: Decimal,
    /// Occupational risk class of the roster.
    pub risk_class: RiskClass,
    /// How the bonus pool is shared out.
    pub allocation: AllocationMethod,
    /// Clamp each assignment to the statutory ceiling while allocating.
    #[serde(default = "default_cap_at_ceiling")]
    pub cap_at_ceiling: bool,
    /// Repair cap violations by redistributing the excess.
    #[serde(default)]
    pub auto_redistribute: bool,
    /// Which commission schedule prices the bonus pool.
    #[serde(default = "default_fee_schedule")]
    pub fee_schedule: FeeScheduleKind,
}

fn default_cap_at_ceiling() -> bool {
    true
}

fn default_fee_schedule() -> FeeScheduleKind {
    FeeScheduleKind::DiscretionaryBonus
}

/// Employee information in a quotation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Monthly base salary.
    pub salary: Decimal,
}

/// Request body for the `/fee` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeRequest {
    /// The bonus pool to price.
    pub pool: Decimal,
    /// Which commission schedule to price it with.
    #[serde(default = "default_fee_schedule")]
    pub schedule: FeeScheduleKind,
}

impl QuotationRequest {
    /// Splits the request into the roster and the policy it is quoted under.
    pub fn into_parts(self) -> (Vec<Employee>, QuotationPolicy) {
        let roster = self.employees.into_iter().map(Into::into).collect();
        let policy = QuotationPolicy {
            salary_percentage: self.salary_percentage,
            risk_class: self.risk_class,
            allocation: self.allocation,
            cap_at_ceiling: self.cap_at_ceiling,
            auto_redistribute: self.auto_redistribute,
            fee_schedule: self.fee_schedule,
        };
        (roster, policy)
    }
}

impl From<EmployeeRequest> for Employee {
    fn from(req: EmployeeRequest) -> Self {
        Employee {
            id: req.id,
            name: req.name,
            salary: req.salary,
        }
    }
}

//! Employee model and roster validation.
//!
//! This module defines the Employee struct used to describe one member of
//! the payroll roster being quoted.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents an employee on the roster being quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Opaque unique identifier for the employee.
    pub id: String,
    /// Display name, carried through to allocation reports.
    pub name: String,
    /// Monthly base salary in currency units.
    pub salary: Decimal,
}

impl Employee {
    /// Creates a new employee.
    ///
    /// # Examples
    ///
    /// ```
    /// use parafiscal_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new("emp_001", "Ana Torres", Decimal::from(3_000_000));
    /// assert_eq!(employee.salary, Decimal::from(3_000_000));
    /// assert!(employee.validate().is_ok());
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>, salary: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            salary,
        }
    }

    /// Checks that the id is present and the salary is strictly positive.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidEmployee {
                employee_id: self.id.clone(),
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.salary <= Decimal::ZERO {
            return Err(EngineError::InvalidEmployee {
                employee_id: self.id.clone(),
                field: "salary".to_string(),
                message: format!("must be positive, got {}", self.salary),
            });
        }

        Ok(())
    }
}

/// Validates every employee in a roster and rejects duplicate ids.
///
/// An empty roster is valid.
pub fn validate_roster(roster: &[Employee]) -> EngineResult<()> {
    let mut seen = HashSet::with_capacity(roster.len());

    for employee in roster {
        employee.validate()?;
        if !seen.insert(employee.id.as_str()) {
            return Err(EngineError::InvalidEmployee {
                employee_id: employee.id.clone(),
                field: "id".to_string(),
                message: "appears more than once in the roster".to_string(),
            });
        }
    }

    Ok(())
}

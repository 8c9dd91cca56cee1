//! Parafiscal Calculation Engine for Colombian payroll contributions
//!
//! This crate compares an all-salary compensation structure against a
//! salary/bonus split, quantifies the employer contribution savings, shares a
//! bonus pool across a roster within the statutory per-employee ceiling, and
//! prices the arrangement with a tiered commission schedule.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

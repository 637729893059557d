//! Core data models for the Salon Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod pay_breakdown;
mod period_record;
mod revenue;
mod tier;

pub use employee::{Employee, EmployeeGroup};
pub use pay_breakdown::{
    AuditStep, AuditTrace, AuditWarning, CategoryCommission, PayBreakdown, TierSource,
};
pub use period_record::PeriodRevenueRecord;
pub use revenue::RevenueCategory;
pub use tier::Tier;

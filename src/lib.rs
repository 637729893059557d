//! Salon Payroll Engine
//!
//! This crate resolves salon staff performance tiers from revenue figures and
//! calculates monthly pay: per-category commissions, KPI penalties and manual
//! adjustments folded into a net pay breakdown.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

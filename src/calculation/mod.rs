//! Calculation logic for the Salon Payroll Engine.
//!
//! This module contains the calculation steps for one payroll period: tier
//! resolution or manual tier assignment, per-category commissions, KPI
//! evaluation and penalty, and the [`PayrollCalculator`] that combines them.
//! [`summarize`] aggregates the resulting breakdowns.

mod commission;
mod kpi_penalty;
mod payroll;
mod summary;
mod tier_resolution;

pub use commission::{CommissionResult, IGNORED_REVENUE_WARNING, calculate_commissions};
pub use kpi_penalty::{KpiEvaluationResult, KpiPenaltyResult, calculate_kpi_penalty, evaluate_kpi};
pub use payroll::PayrollCalculator;
pub use summary::{GroupTotals, PayrollSummary, summarize};
pub use tier_resolution::{TierResolutionResult, apply_tier_override, resolve_tier};

//! Pay breakdown models for the Salon Payroll Engine.
//!
//! This module contains the [`PayBreakdown`] type and its associated structures
//! that capture every output of a payroll calculation: the resolved tier,
//! per-category commissions, the KPI penalty, totals and an audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeGroup, RevenueCategory};

/// Commission earned on one revenue category.
///
/// # Example
///
/// ```
/// use salon_payroll::models::{CategoryCommission, RevenueCategory};
/// use rust_decimal::Decimal;
///
/// let line = CategoryCommission {
///     category: RevenueCategory::Service,
///     revenue: Decimal::from(90_000_000),
///     rate: Decimal::from(13),
///     amount: Decimal::from(11_700_000),
/// };
/// assert_eq!(line.revenue * line.rate / Decimal::ONE_HUNDRED, line.amount);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCommission {
    /// The revenue category.
    pub category: RevenueCategory,
    /// Revenue reported for the category.
    pub revenue: Decimal,
    /// Commission percentage applied.
    pub rate: Decimal,
    /// Commission amount (revenue × rate / 100).
    pub amount: Decimal,
}

/// How the tier used for a calculation was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierSource {
    /// Resolved from the period's revenue figures.
    Resolved,
    /// Assigned manually by the caller.
    Override,
}

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
/// Warnings indicate input that was ignored or looks suspicious without
/// preventing the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The audit trace for a calculation.
///
/// Holds no timing data, so identical inputs always produce identical traces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns the step number the next recorded step should use.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }
}

/// The complete result of a payroll calculation for one employee and period.
///
/// `total_income = basic_salary + allowance + total_commission + bonus - penalty - kpi_penalty`
/// and `net_pay = total_income - advance`. Net pay may be negative; it is never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// The employee the breakdown is for.
    pub employee_id: String,
    /// The employee's group.
    pub group: EmployeeGroup,
    /// Name of the tier applied.
    pub tier_name: String,
    /// Whether the tier was resolved or overridden.
    pub tier_source: TierSource,
    /// Basic salary applied.
    pub basic_salary: Decimal,
    /// Fixed allowance applied.
    pub allowance: Decimal,
    /// One commission line per revenue category of the group, in schema order.
    pub commissions: Vec<CategoryCommission>,
    /// Sum of all commission lines.
    pub total_commission: Decimal,
    /// Whether the KPI targets were achieved.
    pub kpi_achieved: bool,
    /// Penalty rate as a fraction (e.g. 0.02); applied only when KPI was missed.
    pub kpi_penalty_rate: Decimal,
    /// KPI penalty deducted from income.
    pub kpi_penalty: Decimal,
    /// Manual bonus.
    pub bonus: Decimal,
    /// Manual penalty.
    pub penalty: Decimal,
    /// Cash advance.
    pub advance: Decimal,
    /// Income before the advance is deducted.
    pub total_income: Decimal,
    /// Final pay after the advance.
    pub net_pay: Decimal,
    /// Record of every calculation decision.
    pub audit_trace: AuditTrace,
}

impl PayBreakdown {
    /// Returns the commission line for a category, if the group has one.
    pub fn commission_for(&self, category: RevenueCategory) -> Option<&CategoryCommission> {
        self.commissions.iter().find(|c| c.category == category)
    }
}

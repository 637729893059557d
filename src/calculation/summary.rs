//! Payroll summary across many breakdowns.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{EmployeeGroup, PayBreakdown};

/// Totals for one employee group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotals {
    /// Number of employees in the group.
    pub employee_count: usize,
    /// Sum of commissions.
    pub total_commission: Decimal,
    /// Sum of net pay.
    pub total_net_pay: Decimal,
}

/// Aggregated totals for a payroll run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Number of breakdowns summarized.
    pub employee_count: usize,
    /// Number of employees who achieved their KPI targets.
    pub kpi_achievers: usize,
    /// Sum of commissions.
    pub total_commission: Decimal,
    /// Sum of KPI penalties.
    pub total_kpi_penalty: Decimal,
    /// Sum of net pay.
    pub total_net_pay: Decimal,
    /// Totals per group, ordered by group.
    pub by_group: BTreeMap<EmployeeGroup, GroupTotals>,
}

/// Summarizes a set of pay breakdowns.
///
/// # Example
///
/// ```
/// use salon_payroll::calculation::summarize;
///
/// let summary = summarize(&[]);
/// assert_eq!(summary.employee_count, 0);
/// assert!(summary.by_group.is_empty());
/// ```
pub fn summarize(breakdowns: &[PayBreakdown]) -> PayrollSummary {
    breakdowns
        .iter()
        .fold(PayrollSummary::default(), |mut summary, breakdown| {
            summary.employee_count += 1;
            if breakdown.kpi_achieved {
                summary.kpi_achievers += 1;
            }
            summary.total_commission += breakdown.total_commission;
            summary.total_kpi_penalty += breakdown.kpi_penalty;
            summary.total_net_pay += breakdown.net_pay;

            let group = summary.by_group.entry(breakdown.group).or_default();
            group.employee_count += 1;
            group.total_commission += breakdown.total_commission;
            group.total_net_pay += breakdown.net_pay;

            summary
        })
}

//! Configuration types for tier tables and payroll policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeGroup, RevenueCategory, Tier};

/// One tier as written in `tiers.yaml`.
///
/// The owning group comes from the enclosing map key.
#[derive(Debug, Clone, Deserialize)]
pub struct TierDefinition {
    /// Unique tier name.
    pub name: String,
    /// Minimum daily-average revenue.
    pub daily_revenue_min: Decimal,
    /// Minimum monthly revenue.
    pub monthly_revenue_min: Decimal,
    /// Basic salary attached to the tier.
    #[serde(default)]
    pub basic_salary: Decimal,
    /// Commission percentages keyed by revenue category.
    pub commission_rates: BTreeMap<RevenueCategory, Decimal>,
    /// Descriptive bonus label.
    #[serde(default)]
    pub bonus_label: String,
    /// Descriptive working-hours label.
    #[serde(default)]
    pub working_hours: String,
    /// Required count per KPI metric.
    #[serde(default)]
    pub kpi_targets: BTreeMap<String, u32>,
}

impl TierDefinition {
    /// Converts the definition into a [`Tier`] of the given group.
    pub fn into_tier(self, group: EmployeeGroup) -> Tier {
        Tier {
            name: self.name,
            group,
            daily_revenue_min: self.daily_revenue_min,
            monthly_revenue_min: self.monthly_revenue_min,
            basic_salary: self.basic_salary,
            commission_rates: self.commission_rates,
            bonus_label: self.bonus_label,
            working_hours: self.working_hours,
            kpi_targets: self.kpi_targets,
        }
    }
}

/// Structure of `tiers.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TiersConfig {
    /// Tier lists keyed by employee group, lowest tier first.
    pub groups: BTreeMap<EmployeeGroup, Vec<TierDefinition>>,
}

/// How the KPI penalty rate is chosen when KPI targets are missed.
///
/// Rates are fractions of total commission (0.02 means 2%).
///
/// # Example
///
/// ```
/// use salon_payroll::config::KpiPenaltyPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = KpiPenaltyPolicy::default();
/// assert_eq!(policy.rate_for(false), Decimal::new(2, 2));
/// assert_eq!(policy.rate_for(true), Decimal::new(4, 2));
///
/// let flat = KpiPenaltyPolicy::Flat { rate: Decimal::new(1, 2) };
/// assert_eq!(flat.rate_for(true), Decimal::new(1, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum KpiPenaltyPolicy {
    /// A standard rate, and a separate rate for employees in their new-hire period.
    TenureBased {
        /// Rate for established employees.
        standard_rate: Decimal,
        /// Rate for new employees.
        new_employee_rate: Decimal,
    },
    /// A single rate regardless of tenure.
    Flat {
        /// The rate applied to everyone.
        rate: Decimal,
    },
}

impl Default for KpiPenaltyPolicy {
    fn default() -> Self {
        KpiPenaltyPolicy::TenureBased {
            standard_rate: Decimal::new(2, 2),
            new_employee_rate: Decimal::new(4, 2),
        }
    }
}

impl KpiPenaltyPolicy {
    /// Returns the penalty rate for an employee.
    pub fn rate_for(&self, is_new_employee: bool) -> Decimal {
        match *self {
            KpiPenaltyPolicy::TenureBased {
                standard_rate,
                new_employee_rate,
            } => {
                if is_new_employee {
                    new_employee_rate
                } else {
                    standard_rate
                }
            }
            KpiPenaltyPolicy::Flat { rate } => rate,
        }
    }

    fn rates(&self) -> Vec<(&'static str, Decimal)> {
        match *self {
            KpiPenaltyPolicy::TenureBased {
                standard_rate,
                new_employee_rate,
            } => vec![
                ("standard_rate", standard_rate),
                ("new_employee_rate", new_employee_rate),
            ],
            KpiPenaltyPolicy::Flat { rate } => vec![("rate", rate)],
        }
    }
}

fn default_working_days_per_month() -> u32 {
    26
}

/// Payroll policy from `payroll.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// KPI penalty policy.
    #[serde(default)]
    pub kpi_penalty: KpiPenaltyPolicy,
    /// Divisor used to derive daily-average revenue when a record omits it.
    #[serde(default = "default_working_days_per_month")]
    pub working_days_per_month: u32,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            kpi_penalty: KpiPenaltyPolicy::default(),
            working_days_per_month: default_working_days_per_month(),
        }
    }
}

impl PayrollSettings {
    /// Checks that penalty rates are fractions in `[0, 1]` and the working-day
    /// divisor is positive.
    pub fn validate(&self) -> EngineResult<()> {
        for (name, rate) in self.kpi_penalty.rates() {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::configuration(
                    "payroll",
                    format!("kpi_penalty.{} must be between 0 and 1, got {}", name, rate),
                ));
            }
        }

        if self.working_days_per_month == 0 {
            return Err(EngineError::configuration(
                "payroll",
                "working_days_per_month must be greater than 0",
            ));
        }

        Ok(())
    }
}

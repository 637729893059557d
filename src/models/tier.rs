//! Tier model.
//!
//! A [`Tier`] is a named performance bracket within an employee group. It gates
//! a basic salary and a set of commission rates behind a daily-average and a
//! monthly revenue threshold.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeGroup, RevenueCategory};

/// A performance tier of one employee group.
///
/// Tiers are built once when the tier table is loaded and never mutated.
///
/// # Example
///
/// ```
/// use salon_payroll::models::{EmployeeGroup, RevenueCategory, Tier};
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
///
/// let tier = Tier {
///     name: "Nail Target".to_string(),
///     group: EmployeeGroup::NailTechnician,
///     daily_revenue_min: Decimal::from(1_115_385),
///     monthly_revenue_min: Decimal::from(29_000_000),
///     basic_salary: Decimal::from(8_000_000),
///     commission_rates: BTreeMap::from([(RevenueCategory::Service, Decimal::from(24))]),
///     bonus_label: "T13+T14".to_string(),
///     working_hours: String::new(),
///     kpi_targets: BTreeMap::new(),
/// };
///
/// assert!(tier.is_reached(Decimal::from(30_000_000), Decimal::from(1_200_000)));
/// // A high monthly total alone does not reach the tier.
/// assert!(!tier.is_reached(Decimal::from(30_000_000), Decimal::from(1_000_000)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Identifying label, unique across the whole tier table.
    pub name: String,
    /// The employee group this tier belongs to.
    pub group: EmployeeGroup,
    /// Minimum daily-average revenue required to reach the tier.
    pub daily_revenue_min: Decimal,
    /// Minimum monthly revenue required to reach the tier.
    pub monthly_revenue_min: Decimal,
    /// Basic salary attached to the tier (0 where base pay is fixed on the employee).
    pub basic_salary: Decimal,
    /// Commission rates as whole or fractional percentages, keyed by category.
    pub commission_rates: BTreeMap<RevenueCategory, Decimal>,
    /// Descriptive bonus label (e.g. "T13+T14"), not used in arithmetic.
    pub bonus_label: String,
    /// Descriptive working-hours label, not used in arithmetic.
    pub working_hours: String,
    /// Required count per KPI metric for the period.
    pub kpi_targets: BTreeMap<String, u32>,
}

impl Tier {
    /// Returns true if both revenue figures meet this tier's minimums.
    pub fn is_reached(&self, monthly_revenue: Decimal, daily_revenue: Decimal) -> bool {
        monthly_revenue >= self.monthly_revenue_min && daily_revenue >= self.daily_revenue_min
    }

    /// Returns the commission percentage for a category, if the tier defines one.
    pub fn rate_for(&self, category: RevenueCategory) -> Option<Decimal> {
        self.commission_rates.get(&category).copied()
    }

    /// Returns true if every KPI target is met by the given counts.
    ///
    /// Metrics missing from `counts` count as zero. A tier without targets is
    /// always met.
    pub fn kpi_targets_met(&self, counts: &BTreeMap<String, u32>) -> bool {
        self.kpi_targets
            .iter()
            .all(|(metric, target)| counts.get(metric).copied().unwrap_or(0) >= *target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tier() -> Tier {
        Tier {
            name: "Relax Standard".to_string(),
            group: EmployeeGroup::RelaxTherapist,
            daily_revenue_min: Decimal::from(1_076_923),
            monthly_revenue_min: Decimal::from(28_000_000),
            basic_salary: Decimal::from(7_000_000),
            commission_rates: BTreeMap::from([(RevenueCategory::Service, Decimal::from(25))]),
            bonus_label: "T13".to_string(),
            working_hours: "Mon-Thu 08:45-19:00".to_string(),
            kpi_targets: BTreeMap::from([
                ("oil_treatment".to_string(), 6),
                ("keratin".to_string(), 8),
                ("spa_foot".to_string(), 7),
            ]),
        }
    }

    #[test]
    fn test_is_reached_at_exact_thresholds() {
        let tier = sample_tier();
        assert!(tier.is_reached(Decimal::from(28_000_000), Decimal::from(1_076_923)));
    }

    #[test]
    fn test_is_not_reached_with_low_daily_average() {
        let tier = sample_tier();
        assert!(!tier.is_reached(Decimal::from(90_000_000), Decimal::from(1_076_922)));
    }

    #[test]
    fn test_is_not_reached_with_low_monthly_total() {
        let tier = sample_tier();
        assert!(!tier.is_reached(Decimal::from(27_999_999), Decimal::from(5_000_000)));
    }

    #[test]
    fn test_rate_for_missing_category_is_none() {
        let tier = sample_tier();
        assert_eq!(tier.rate_for(RevenueCategory::Service), Some(Decimal::from(25)));
        assert_eq!(tier.rate_for(RevenueCategory::Cutting), None);
    }

    #[test]
    fn test_kpi_targets_met_when_all_counts_reach_target() {
        let tier = sample_tier();
        let counts = BTreeMap::from([
            ("oil_treatment".to_string(), 6),
            ("keratin".to_string(), 10),
            ("spa_foot".to_string(), 7),
        ]);
        assert!(tier.kpi_targets_met(&counts));
    }

    #[test]
    fn test_kpi_targets_missing_metric_counts_as_zero() {
        let tier = sample_tier();
        let counts = BTreeMap::from([
            ("oil_treatment".to_string(), 6),
            ("keratin".to_string(), 8),
        ]);
        assert!(!tier.kpi_targets_met(&counts));
    }

    #[test]
    fn test_kpi_targets_empty_always_met() {
        let mut tier = sample_tier();
        tier.kpi_targets.clear();
        assert!(tier.kpi_targets_met(&BTreeMap::new()));
    }
}

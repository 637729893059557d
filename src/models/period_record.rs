//! Period revenue record model.
//!
//! This module contains the [`PeriodRevenueRecord`] type: one employee's
//! revenue, KPI results and manual adjustments for a single pay period.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RevenueCategory;

/// Revenue and KPI inputs for one employee in one pay period.
///
/// Every field other than `employee_id` and `monthly_revenue` is optional in
/// the serialized form and defaults to zero (or to "not supplied" for
/// `daily_revenue` and `kpi_achieved`).
///
/// # Example
///
/// ```
/// use salon_payroll::models::{PeriodRevenueRecord, RevenueCategory};
/// use rust_decimal::Decimal;
///
/// let record: PeriodRevenueRecord = serde_json::from_str(r#"{
///     "employee_id": "emp_001",
///     "month": "2024-01",
///     "monthly_revenue": "170000000",
///     "daily_revenue": "6538462",
///     "category_revenue": { "service": "90000000", "bleaching": "5000000" },
///     "kpi_achieved": true
/// }"#).unwrap();
///
/// assert_eq!(record.revenue_for(RevenueCategory::Service), Decimal::from(90_000_000));
/// assert_eq!(record.revenue_for(RevenueCategory::Cutting), Decimal::ZERO);
/// assert_eq!(record.advance, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRevenueRecord {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// Pay period label (e.g. "2024-01").
    #[serde(default)]
    pub month: String,
    /// Daily-average revenue. Derived from the monthly total when absent.
    #[serde(default)]
    pub daily_revenue: Option<Decimal>,
    /// Total revenue for the period.
    pub monthly_revenue: Decimal,
    /// Revenue broken out per category.
    #[serde(default)]
    pub category_revenue: BTreeMap<RevenueCategory, Decimal>,
    /// Explicit KPI outcome. When absent, achievement is derived from `kpi_counts`.
    #[serde(default)]
    pub kpi_achieved: Option<bool>,
    /// Achieved count per KPI metric.
    #[serde(default)]
    pub kpi_counts: BTreeMap<String, u32>,
    /// Manual bonus for the period.
    #[serde(default)]
    pub bonus: Decimal,
    /// Manual penalty for the period.
    #[serde(default)]
    pub penalty: Decimal,
    /// Cash advance already paid out during the period.
    #[serde(default)]
    pub advance: Decimal,
}

impl PeriodRevenueRecord {
    /// Creates a record with only the revenue totals set.
    pub fn new(
        employee_id: impl Into<String>,
        monthly_revenue: Decimal,
        daily_revenue: Option<Decimal>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            month: String::new(),
            daily_revenue,
            monthly_revenue,
            category_revenue: BTreeMap::new(),
            kpi_achieved: None,
            kpi_counts: BTreeMap::new(),
            bonus: Decimal::ZERO,
            penalty: Decimal::ZERO,
            advance: Decimal::ZERO,
        }
    }

    /// Returns the revenue reported for a category, or zero when absent.
    pub fn revenue_for(&self, category: RevenueCategory) -> Decimal {
        self.category_revenue
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_record_defaults_to_zero() {
        let json = r#"{
            "employee_id": "emp_001",
            "monthly_revenue": "0"
        }"#;

        let record: PeriodRevenueRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.daily_revenue, None);
        assert_eq!(record.kpi_achieved, None);
        assert!(record.category_revenue.is_empty());
        assert!(record.kpi_counts.is_empty());
        assert_eq!(record.bonus, Decimal::ZERO);
        assert_eq!(record.penalty, Decimal::ZERO);
        assert_eq!(record.advance, Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_kpi_counts() {
        let json = r#"{
            "employee_id": "emp_004",
            "monthly_revenue": "30000000",
            "kpi_counts": { "nail_design": 52, "keratin": 6 }
        }"#;

        let record: PeriodRevenueRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kpi_counts.get("nail_design"), Some(&52));
        assert_eq!(record.kpi_counts.get("eyebrow_threading"), None);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let json = r#"{
            "employee_id": "emp_001",
            "monthly_revenue": "100",
            "category_revenue": { "massage": "100" }
        }"#;
        assert!(serde_json::from_str::<PeriodRevenueRecord>(json).is_err());
    }

    #[test]
    fn test_revenue_for_missing_category_is_zero() {
        let record = PeriodRevenueRecord::new("emp_001", Decimal::from(100), None);
        assert_eq!(record.revenue_for(RevenueCategory::Product), Decimal::ZERO);
    }
}

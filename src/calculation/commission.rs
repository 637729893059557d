//! Commission calculation functionality.
//!
//! This module applies a tier's commission rates to the revenue categories of
//! the employee's group.

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, CategoryCommission, PeriodRevenueRecord, Tier};

/// Warning code for revenue reported under a category the group does not earn on.
pub const IGNORED_REVENUE_WARNING: &str = "IGNORED_REVENUE";

/// The result of calculating commissions for a period.
#[derive(Debug, Clone)]
pub struct CommissionResult {
    /// One line per revenue category of the group, in schema order.
    pub commissions: Vec<CategoryCommission>,
    /// Sum of all commission lines.
    pub total_commission: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Warnings for revenue that was ignored.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates the commission on each revenue category of the tier's group.
///
/// Each category earns `revenue × rate / 100`, where `rate` is the tier's
/// percentage for that category. Categories without reported revenue earn
/// zero. Revenue reported for categories outside the group's schema is not
/// commissioned and produces an [`IGNORED_REVENUE_WARNING`].
///
/// # Errors
///
/// - `Configuration` if the tier lacks a rate for one of its group's categories
/// - `InvalidInput` if a commission amount or their sum exceeds the `Decimal` range
///
/// # Examples
///
/// ```
/// use salon_payroll::calculation::calculate_commissions;
/// use salon_payroll::config::ConfigLoader;
/// use salon_payroll::models::{PeriodRevenueRecord, RevenueCategory};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let tier = loader.tier_table().lookup_tier_by_name("Stylist Target").unwrap();
///
/// let mut record = PeriodRevenueRecord::new("emp_001", Decimal::from(170_000_000), None);
/// record.category_revenue.insert(RevenueCategory::Service, Decimal::from(90_000_000));
/// record.category_revenue.insert(RevenueCategory::Bleaching, Decimal::from(5_000_000));
///
/// let result = calculate_commissions(tier, &record, 1).unwrap();
/// assert_eq!(result.total_commission, Decimal::from(12_350_000));
/// ```
pub fn calculate_commissions(
    tier: &Tier,
    record: &PeriodRevenueRecord,
    step_number: u32,
) -> EngineResult<CommissionResult> {
    let categories = tier.group.revenue_categories();

    let commissions = categories
        .iter()
        .map(|category| {
            let rate = tier.rate_for(*category).ok_or_else(|| {
                EngineError::configuration(
                    tier.group.as_str(),
                    format!("tier '{}' has no commission rate for '{}'", tier.name, category),
                )
            })?;
            let revenue = record.revenue_for(*category);
            let amount = revenue
                .checked_mul(rate)
                .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
                .ok_or_else(|| {
                    EngineError::invalid_input(
                        format!("category_revenue.{}", category),
                        "amount too large",
                    )
                })?;

            Ok(CategoryCommission {
                category: *category,
                revenue,
                rate,
                amount,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let total_commission = commissions
        .iter()
        .try_fold(Decimal::ZERO, |total, c| total.checked_add(c.amount))
        .ok_or_else(|| EngineError::invalid_input("category_revenue", "amount too large"))?;

    let warnings: Vec<AuditWarning> = record
        .category_revenue
        .iter()
        .filter(|(category, revenue)| !categories.contains(category) && !revenue.is_zero())
        .map(|(category, revenue)| {
            warn!(
                employee_id = %record.employee_id,
                group = %tier.group,
                category = %category,
                revenue = %revenue,
                "Ignoring revenue outside the group's commission categories"
            );
            AuditWarning {
                code: IGNORED_REVENUE_WARNING.to_string(),
                message: format!(
                    "{} revenue {} is not commissionable for group {}",
                    category,
                    revenue.normalize(),
                    tier.group
                ),
                severity: "low".to_string(),
            }
        })
        .collect();

    let lines: Vec<serde_json::Value> = commissions
        .iter()
        .map(|c| {
            serde_json::json!({
                "category": c.category.as_str(),
                "revenue": c.revenue.normalize().to_string(),
                "rate": c.rate.normalize().to_string(),
                "amount": c.amount.normalize().to_string()
            })
        })
        .collect();

    let reasoning = commissions
        .iter()
        .map(|c| {
            format!(
                "{}: {} x {}% = {}",
                c.category,
                c.revenue.normalize(),
                c.rate.normalize(),
                c.amount.normalize()
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    let audit_step = AuditStep {
        step_number,
        rule_id: "commission".to_string(),
        rule_name: "Category Commission".to_string(),
        input: serde_json::json!({
            "tier": tier.name,
            "categories": categories.iter().map(|c| c.as_str()).collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "lines": lines,
            "total_commission": total_commission.normalize().to_string()
        }),
        reasoning: format!("{} (total {})", reasoning, total_commission.normalize()),
    };

    Ok(CommissionResult {
        commissions,
        total_commission,
        audit_step,
        warnings,
    })
}

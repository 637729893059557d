//! KPI evaluation and penalty calculation functionality.
//!
//! An employee who misses their KPI targets forfeits a fraction of their
//! total commission. The fraction comes from the configured
//! [`KpiPenaltyPolicy`].

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::KpiPenaltyPolicy;
use crate::models::{AuditStep, PeriodRevenueRecord, Tier};

/// The result of evaluating KPI achievement.
#[derive(Debug, Clone)]
pub struct KpiEvaluationResult {
    /// Whether the KPI targets count as achieved.
    pub achieved: bool,
    /// The audit step recording this evaluation.
    pub audit_step: AuditStep,
}

/// The result of calculating the KPI penalty.
#[derive(Debug, Clone)]
pub struct KpiPenaltyResult {
    /// The penalty rate that applied to this employee.
    pub rate: Decimal,
    /// The penalty amount (zero when KPIs were achieved).
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Decides whether an employee achieved their KPI targets for the period.
///
/// An explicit `kpi_achieved` flag on the record wins. Otherwise every
/// target of the tier must be met by the record's `kpi_counts`, with missing
/// metrics counted as zero.
///
/// # Examples
///
/// ```
/// use salon_payroll::calculation::evaluate_kpi;
/// use salon_payroll::config::ConfigLoader;
/// use salon_payroll::models::PeriodRevenueRecord;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let tier = loader.tier_table().lookup_tier_by_name("Nail New").unwrap();
///
/// let mut record = PeriodRevenueRecord::new("emp_001", Decimal::ZERO, None);
/// record.kpi_achieved = Some(true);
/// assert!(evaluate_kpi(tier, &record, 1).achieved);
///
/// record.kpi_achieved = None;
/// assert!(!evaluate_kpi(tier, &record, 1).achieved);
/// ```
pub fn evaluate_kpi(
    tier: &Tier,
    record: &PeriodRevenueRecord,
    step_number: u32,
) -> KpiEvaluationResult {
    let (achieved, reasoning) = match record.kpi_achieved {
        Some(achieved) => (
            achieved,
            format!("KPI achievement reported directly as {}", achieved),
        ),
        None => {
            let missed: Vec<String> = tier
                .kpi_targets
                .iter()
                .filter_map(|(metric, target)| {
                    let count = record.kpi_counts.get(metric).copied().unwrap_or(0);
                    (count < *target).then(|| format!("{} {}/{}", metric, count, target))
                })
                .collect();

            if missed.is_empty() {
                (true, format!("All KPI targets of '{}' met", tier.name))
            } else {
                (
                    false,
                    format!("KPI targets of '{}' missed: {}", tier.name, missed.join(", ")),
                )
            }
        }
    };

    debug!(
        employee_id = %record.employee_id,
        tier = %tier.name,
        achieved,
        "Evaluated KPI achievement"
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "kpi_evaluation".to_string(),
        rule_name: "KPI Evaluation".to_string(),
        input: serde_json::json!({
            "kpi_achieved": record.kpi_achieved,
            "kpi_counts": record.kpi_counts,
            "kpi_targets": tier.kpi_targets
        }),
        output: serde_json::json!({
            "achieved": achieved
        }),
        reasoning,
    };

    KpiEvaluationResult {
        achieved,
        audit_step,
    }
}

/// Calculates the KPI penalty on total commission.
///
/// The penalty is zero when KPIs were achieved. Otherwise it is
/// `total_commission × rate`, where the rate comes from `policy`.
///
/// # Examples
///
/// ```
/// use salon_payroll::calculation::calculate_kpi_penalty;
/// use salon_payroll::config::KpiPenaltyPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = KpiPenaltyPolicy::default();
/// let result = calculate_kpi_penalty(Decimal::from(1_000_000), false, true, &policy, 1);
/// assert_eq!(result.amount, Decimal::from(40_000));
/// ```
pub fn calculate_kpi_penalty(
    total_commission: Decimal,
    kpi_achieved: bool,
    is_new_employee: bool,
    policy: &KpiPenaltyPolicy,
    step_number: u32,
) -> KpiPenaltyResult {
    let rate = policy.rate_for(is_new_employee);

    let (amount, reasoning) = if kpi_achieved {
        (Decimal::ZERO, "KPI achieved - no penalty".to_string())
    } else {
        let amount = total_commission * rate;
        (
            amount,
            format!(
                "KPI missed: {} x {} = {}",
                total_commission.normalize(),
                rate.normalize(),
                amount.normalize()
            ),
        )
    };

    if !kpi_achieved && !amount.is_zero() {
        warn!(
            rate = %rate,
            penalty = %amount,
            is_new_employee,
            "Applying KPI penalty"
        );
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "kpi_penalty".to_string(),
        rule_name: "KPI Penalty".to_string(),
        input: serde_json::json!({
            "total_commission": total_commission.normalize().to_string(),
            "kpi_achieved": kpi_achieved,
            "is_new_employee": is_new_employee
        }),
        output: serde_json::json!({
            "rate": rate.normalize().to_string(),
            "kpi_penalty": amount.normalize().to_string()
        }),
        reasoning,
    };

    KpiPenaltyResult {
        rate,
        amount,
        audit_step,
    }
}

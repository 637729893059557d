//! Payroll calculation for one employee and period.
//!
//! [`PayrollCalculator`] runs the calculation steps in order (input checks,
//! tier, commissions, KPI evaluation, KPI penalty, totals) and collects each
//! step's audit record into the returned [`PayBreakdown`].

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;

use crate::config::{PayrollSettings, TierTable, ensure_non_negative};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, Employee, EmployeeGroup, PayBreakdown, PeriodRevenueRecord, Tier,
};

use super::commission::calculate_commissions;
use super::kpi_penalty::{calculate_kpi_penalty, evaluate_kpi};
use super::tier_resolution::{apply_tier_override, resolve_tier};

/// Calculates payroll against a shared, read-only tier table.
///
/// The calculator holds no mutable state and can be shared across threads.
///
/// # Example
///
/// ```
/// use salon_payroll::config::ConfigLoader;
/// use salon_payroll::models::{Employee, EmployeeGroup, PeriodRevenueRecord, RevenueCategory};
/// use rust_decimal::Decimal;
///
/// let calculator = ConfigLoader::builtin().unwrap().calculator();
///
/// let employee = Employee::new("emp_001", EmployeeGroup::MainStylist);
/// let mut record = PeriodRevenueRecord::new(
///     "emp_001",
///     Decimal::from(170_000_000),
///     Some(Decimal::from(6_538_462)),
/// );
/// record.category_revenue.insert(RevenueCategory::Service, Decimal::from(90_000_000));
/// record.category_revenue.insert(RevenueCategory::Bleaching, Decimal::from(5_000_000));
/// record.kpi_achieved = Some(true);
///
/// let breakdown = calculator.calculate_payroll(&employee, &record, None).unwrap();
/// assert_eq!(breakdown.tier_name, "Stylist Target");
/// assert_eq!(breakdown.total_commission, Decimal::from(12_350_000));
/// ```
#[derive(Debug, Clone)]
pub struct PayrollCalculator {
    tier_table: Arc<TierTable>,
    settings: PayrollSettings,
}

impl PayrollCalculator {
    /// Creates a calculator over a shared tier table.
    pub fn new(tier_table: Arc<TierTable>, settings: PayrollSettings) -> Self {
        Self {
            tier_table,
            settings,
        }
    }

    /// Returns the tier table.
    pub fn tier_table(&self) -> &TierTable {
        &self.tier_table
    }

    /// Returns the payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Resolves the tier reached by the given revenue figures.
    ///
    /// See [`TierTable::resolve_tier`].
    pub fn resolve_tier(
        &self,
        group: EmployeeGroup,
        monthly_revenue: Decimal,
        daily_revenue: Decimal,
    ) -> EngineResult<&Tier> {
        self.tier_table.resolve_tier(group, monthly_revenue, daily_revenue)
    }

    /// Calculates the full pay breakdown of one employee for one period.
    ///
    /// `tier_override` names a tier to use instead of revenue-based
    /// resolution. It must belong to the employee's group.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for negative amounts, a record of another employee,
    ///   an override tier of another group, or amounts whose commission or
    ///   totals exceed the `Decimal` range
    /// - `TierNotFound` for an unknown override name
    /// - `Configuration` if the tier table lacks data the calculation needs
    pub fn calculate_payroll(
        &self,
        employee: &Employee,
        record: &PeriodRevenueRecord,
        tier_override: Option<&str>,
    ) -> EngineResult<PayBreakdown> {
        let mut audit_trace = AuditTrace::default();

        // Step 1: input checks and daily average
        validate_inputs(employee, record)?;
        let (daily_revenue, input_step) =
            self.daily_revenue(record, audit_trace.next_step_number());
        audit_trace.steps.push(input_step);

        // Step 2: tier
        let resolution = match tier_override {
            Some(name) => apply_tier_override(
                &self.tier_table,
                employee.group,
                name,
                audit_trace.next_step_number(),
            )?,
            None => resolve_tier(
                &self.tier_table,
                employee.group,
                record.monthly_revenue,
                daily_revenue,
                audit_trace.next_step_number(),
            )?,
        };
        let tier = resolution.tier;
        audit_trace.steps.push(resolution.audit_step);

        // Step 3: commissions
        let commission = calculate_commissions(tier, record, audit_trace.next_step_number())?;
        audit_trace.steps.push(commission.audit_step);
        audit_trace.warnings.extend(commission.warnings);

        // Step 4: KPI
        let kpi = evaluate_kpi(tier, record, audit_trace.next_step_number());
        audit_trace.steps.push(kpi.audit_step);

        let kpi_penalty = calculate_kpi_penalty(
            commission.total_commission,
            kpi.achieved,
            employee.is_new_employee,
            &self.settings.kpi_penalty,
            audit_trace.next_step_number(),
        );
        audit_trace.steps.push(kpi_penalty.audit_step);

        // Step 5: totals
        let basic_salary = employee.basic_salary.unwrap_or(tier.basic_salary);
        let total_income = [employee.allowance, commission.total_commission, record.bonus]
            .into_iter()
            .try_fold(basic_salary, |total, amount| total.checked_add(amount))
            .and_then(|total| total.checked_sub(record.penalty))
            .and_then(|total| total.checked_sub(kpi_penalty.amount))
            .ok_or_else(|| EngineError::invalid_input("total_income", "amount too large"))?;
        let net_pay = total_income
            .checked_sub(record.advance)
            .ok_or_else(|| EngineError::invalid_input("net_pay", "amount too large"))?;
        let basic_salary_source = if employee.basic_salary.is_some() {
            "employee"
        } else {
            "tier"
        };

        audit_trace.steps.push(AuditStep {
            step_number: audit_trace.next_step_number(),
            rule_id: "totals".to_string(),
            rule_name: "Income Totals".to_string(),
            input: serde_json::json!({
                "basic_salary": basic_salary.normalize().to_string(),
                "basic_salary_source": basic_salary_source,
                "allowance": employee.allowance.normalize().to_string(),
                "total_commission": commission.total_commission.normalize().to_string(),
                "bonus": record.bonus.normalize().to_string(),
                "penalty": record.penalty.normalize().to_string(),
                "kpi_penalty": kpi_penalty.amount.normalize().to_string(),
                "advance": record.advance.normalize().to_string()
            }),
            output: serde_json::json!({
                "total_income": total_income.normalize().to_string(),
                "net_pay": net_pay.normalize().to_string()
            }),
            reasoning: format!(
                "{} + {} + {} + {} - {} - {} = {}; net pay {} - {} = {}",
                basic_salary.normalize(),
                employee.allowance.normalize(),
                commission.total_commission.normalize(),
                record.bonus.normalize(),
                record.penalty.normalize(),
                kpi_penalty.amount.normalize(),
                total_income.normalize(),
                total_income.normalize(),
                record.advance.normalize(),
                net_pay.normalize()
            ),
        });

        info!(
            employee_id = %employee.id,
            tier = %tier.name,
            net_pay = %net_pay,
            "Calculated payroll"
        );

        Ok(PayBreakdown {
            employee_id: employee.id.clone(),
            group: employee.group,
            tier_name: tier.name.clone(),
            tier_source: resolution.source,
            basic_salary,
            allowance: employee.allowance,
            commissions: commission.commissions,
            total_commission: commission.total_commission,
            kpi_achieved: kpi.achieved,
            kpi_penalty_rate: kpi_penalty.rate,
            kpi_penalty: kpi_penalty.amount,
            bonus: record.bonus,
            penalty: record.penalty,
            advance: record.advance,
            total_income,
            net_pay,
            audit_trace,
        })
    }

    /// Calculates payroll for many employees, stopping at the first error.
    ///
    /// Tiers are always resolved from revenue; use
    /// [`calculate_payroll`](Self::calculate_payroll) for manual assignments.
    pub fn calculate_batch<'a, I>(&self, items: I) -> EngineResult<Vec<PayBreakdown>>
    where
        I: IntoIterator<Item = (&'a Employee, &'a PeriodRevenueRecord)>,
    {
        items
            .into_iter()
            .map(|(employee, record)| self.calculate_payroll(employee, record, None))
            .collect()
    }

    /// Returns the record's daily average, deriving it from the monthly total
    /// when absent.
    fn daily_revenue(
        &self,
        record: &PeriodRevenueRecord,
        step_number: u32,
    ) -> (Decimal, AuditStep) {
        let days = Decimal::from(self.settings.working_days_per_month);

        let (daily_revenue, reasoning) = match record.daily_revenue {
            Some(daily) => (daily, format!("Daily average {} as reported", daily.normalize())),
            None => {
                // Truncated so a fractional average never passes a daily gate.
                let daily = (record.monthly_revenue / days)
                    .round_dp_with_strategy(0, RoundingStrategy::ToZero);
                (
                    daily,
                    format!(
                        "Daily average derived as {} / {} = {}",
                        record.monthly_revenue.normalize(),
                        days,
                        daily.normalize()
                    ),
                )
            }
        };

        let audit_step = AuditStep {
            step_number,
            rule_id: "period_revenue".to_string(),
            rule_name: "Period Revenue".to_string(),
            input: serde_json::json!({
                "month": record.month,
                "monthly_revenue": record.monthly_revenue.normalize().to_string(),
                "daily_revenue": record.daily_revenue.map(|d| d.normalize().to_string()),
                "working_days_per_month": self.settings.working_days_per_month
            }),
            output: serde_json::json!({
                "daily_revenue": daily_revenue.normalize().to_string(),
                "derived": record.daily_revenue.is_none()
            }),
            reasoning,
        };

        (daily_revenue, audit_step)
    }
}

/// Rejects mismatched records and negative amounts.
fn validate_inputs(employee: &Employee, record: &PeriodRevenueRecord) -> EngineResult<()> {
    if record.employee_id != employee.id {
        return Err(EngineError::invalid_input(
            "employee_id",
            format!(
                "record belongs to '{}', not '{}'",
                record.employee_id, employee.id
            ),
        ));
    }

    if let Some(basic_salary) = employee.basic_salary {
        ensure_non_negative("basic_salary", basic_salary)?;
    }
    ensure_non_negative("allowance", employee.allowance)?;
    ensure_non_negative("monthly_revenue", record.monthly_revenue)?;
    if let Some(daily_revenue) = record.daily_revenue {
        ensure_non_negative("daily_revenue", daily_revenue)?;
    }
    for (category, revenue) in &record.category_revenue {
        ensure_non_negative(&format!("category_revenue.{}", category), *revenue)?;
    }
    ensure_non_negative("bonus", record.bonus)?;
    ensure_non_negative("penalty", record.penalty)?;
    ensure_non_negative("advance", record.advance)?;

    Ok(())
}

//! Tier resolution functionality.
//!
//! This module wraps the [`TierTable`] queries with audit steps: resolving a
//! tier from a period's revenue figures, or applying a manually assigned tier.

use rust_decimal::Decimal;

use crate::config::TierTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, EmployeeGroup, Tier, TierSource};

/// The result of choosing a tier, including the tier and audit step.
#[derive(Debug, Clone)]
pub struct TierResolutionResult<'a> {
    /// The tier that applies for the period.
    pub tier: &'a Tier,
    /// Whether the tier was resolved or overridden.
    pub source: TierSource,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Resolves the tier an employee reached from their revenue figures.
///
/// Both the monthly total and the daily average must meet a tier's minimums
/// for the tier to be reached. When nothing is reached the group's lowest
/// tier applies.
///
/// # Errors
///
/// - `InvalidInput` if either revenue figure is negative
/// - `Configuration` if the group has no tier list
///
/// # Examples
///
/// ```
/// use salon_payroll::calculation::resolve_tier;
/// use salon_payroll::config::ConfigLoader;
/// use salon_payroll::models::EmployeeGroup;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let result = resolve_tier(
///     loader.tier_table(),
///     EmployeeGroup::NailTechnician,
///     Decimal::ZERO,
///     Decimal::ZERO,
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.tier.name, "Nail New");
/// assert_eq!(result.audit_step.output["lowest_tier"], true);
/// ```
pub fn resolve_tier(
    table: &TierTable,
    group: EmployeeGroup,
    monthly_revenue: Decimal,
    daily_revenue: Decimal,
    step_number: u32,
) -> EngineResult<TierResolutionResult<'_>> {
    let tier = table.resolve_tier(group, monthly_revenue, daily_revenue)?;
    let lowest_tier = table
        .tiers(group)?
        .first()
        .is_some_and(|lowest| lowest.name == tier.name);

    let reasoning = if lowest_tier {
        format!(
            "No higher {} tier reached by monthly {} and daily {} - using lowest tier '{}'",
            group,
            monthly_revenue.normalize(),
            daily_revenue.normalize(),
            tier.name
        )
    } else {
        format!(
            "Monthly {} >= {} and daily {} >= {} - highest tier reached is '{}'",
            monthly_revenue.normalize(),
            tier.monthly_revenue_min.normalize(),
            daily_revenue.normalize(),
            tier.daily_revenue_min.normalize(),
            tier.name
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "tier_resolution".to_string(),
        rule_name: "Tier Resolution".to_string(),
        input: serde_json::json!({
            "group": group.as_str(),
            "monthly_revenue": monthly_revenue.normalize().to_string(),
            "daily_revenue": daily_revenue.normalize().to_string()
        }),
        output: serde_json::json!({
            "tier": tier.name,
            "monthly_revenue_min": tier.monthly_revenue_min.normalize().to_string(),
            "daily_revenue_min": tier.daily_revenue_min.normalize().to_string(),
            "lowest_tier": lowest_tier
        }),
        reasoning,
    };

    Ok(TierResolutionResult {
        tier,
        source: TierSource::Resolved,
        audit_step,
    })
}

/// Applies a manually assigned tier, bypassing revenue-based resolution.
///
/// # Errors
///
/// - `TierNotFound` if no tier has the given name
/// - `InvalidInput` if the tier belongs to a different group
pub fn apply_tier_override<'a>(
    table: &'a TierTable,
    group: EmployeeGroup,
    tier_name: &str,
    step_number: u32,
) -> EngineResult<TierResolutionResult<'a>> {
    let tier = table
        .lookup_tier_by_name(tier_name)
        .ok_or_else(|| EngineError::TierNotFound {
            name: tier_name.to_string(),
        })?;

    if tier.group != group {
        return Err(EngineError::invalid_input(
            "tier_override",
            format!(
                "tier '{}' belongs to group '{}', not '{}'",
                tier.name, tier.group, group
            ),
        ));
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "tier_override".to_string(),
        rule_name: "Tier Override".to_string(),
        input: serde_json::json!({
            "group": group.as_str(),
            "tier_override": tier_name
        }),
        output: serde_json::json!({
            "tier": tier.name
        }),
        reasoning: format!(
            "Using manually assigned tier '{}' instead of revenue-based resolution",
            tier.name
        ),
    };

    Ok(TierResolutionResult {
        tier,
        source: TierSource::Override,
        audit_step,
    })
}

//! The validated, read-only tier table.
//!
//! A [`TierTable`] holds one ordered tier list per [`EmployeeGroup`] and
//! answers the two tier queries of the engine: resolving a tier from revenue
//! figures and looking a tier up by name.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeGroup, Tier};

/// Per-group tier lists, validated on construction and never mutated.
///
/// Invariants checked by [`TierTable::new`]:
/// - every group has a non-empty tier list,
/// - the first tier of each group has both thresholds at 0,
/// - thresholds strictly increase, monthly and daily,
/// - commission rates cover exactly the group's revenue categories, each in `[0, 100]`,
/// - tier names are unique across the whole table.
#[derive(Debug, Clone)]
pub struct TierTable {
    groups: BTreeMap<EmployeeGroup, Vec<Tier>>,
}

impl TierTable {
    /// Builds a tier table, rejecting any malformed group with a
    /// [`EngineError::Configuration`] error.
    pub fn new(groups: BTreeMap<EmployeeGroup, Vec<Tier>>) -> EngineResult<Self> {
        for group in EmployeeGroup::ALL {
            let tiers = groups.get(&group).ok_or_else(|| {
                EngineError::configuration(group.as_str(), "no tier list defined")
            })?;
            validate_group(group, tiers)?;
        }

        let mut seen = HashSet::new();
        for tier in groups.values().flatten() {
            if !seen.insert(tier.name.as_str()) {
                return Err(EngineError::configuration(
                    tier.group.as_str(),
                    format!("tier name '{}' is used more than once", tier.name),
                ));
            }
        }

        Ok(Self { groups })
    }

    /// Returns the tier list of a group, lowest tier first.
    pub fn tiers(&self, group: EmployeeGroup) -> EngineResult<&[Tier]> {
        self.groups
            .get(&group)
            .map(Vec::as_slice)
            .ok_or_else(|| EngineError::configuration(group.as_str(), "no tier list defined"))
    }

    /// Iterates over every group and its tiers, in group order.
    pub fn groups(&self) -> impl Iterator<Item = (EmployeeGroup, &[Tier])> {
        self.groups
            .iter()
            .map(|(group, tiers)| (*group, tiers.as_slice()))
    }

    /// Resolves the highest tier of `group` reached by both revenue figures.
    ///
    /// Tiers are checked from the highest threshold down; the first one whose
    /// monthly and daily minimums are both met wins. When no tier is reached
    /// the group's lowest tier is returned, so a valid group always resolves.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if either revenue figure is negative
    /// - `Configuration` if the group has no tier list
    ///
    /// # Example
    ///
    /// ```
    /// use salon_payroll::config::ConfigLoader;
    /// use salon_payroll::models::EmployeeGroup;
    /// use rust_decimal::Decimal;
    ///
    /// let loader = ConfigLoader::builtin().unwrap();
    /// let tier = loader
    ///     .tier_table()
    ///     .resolve_tier(
    ///         EmployeeGroup::MainStylist,
    ///         Decimal::from(170_000_000),
    ///         Decimal::from(6_538_462),
    ///     )
    ///     .unwrap();
    /// assert_eq!(tier.name, "Stylist Target");
    /// ```
    pub fn resolve_tier(
        &self,
        group: EmployeeGroup,
        monthly_revenue: Decimal,
        daily_revenue: Decimal,
    ) -> EngineResult<&Tier> {
        ensure_non_negative("monthly_revenue", monthly_revenue)?;
        ensure_non_negative("daily_revenue", daily_revenue)?;

        let tiers = self.tiers(group)?;
        let lowest = tiers.first().ok_or_else(|| {
            EngineError::configuration(group.as_str(), "tier list is empty")
        })?;

        let tier = tiers
            .iter()
            .rev()
            .find(|tier| tier.is_reached(monthly_revenue, daily_revenue))
            .unwrap_or(lowest);

        debug!(
            group = %group,
            monthly_revenue = %monthly_revenue,
            daily_revenue = %daily_revenue,
            tier = %tier.name,
            "Resolved tier"
        );

        Ok(tier)
    }

    /// Finds a tier by exact name across all groups.
    pub fn lookup_tier_by_name(&self, name: &str) -> Option<&Tier> {
        self.groups
            .values()
            .flatten()
            .find(|tier| tier.name == name)
    }
}

pub(crate) fn ensure_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(())
}

fn validate_group(group: EmployeeGroup, tiers: &[Tier]) -> EngineResult<()> {
    let fail = |message: String| Err(EngineError::configuration(group.as_str(), message));

    let Some(lowest) = tiers.first() else {
        return fail("tier list is empty".to_string());
    };

    if !lowest.monthly_revenue_min.is_zero() || !lowest.daily_revenue_min.is_zero() {
        return fail(format!(
            "lowest tier '{}' must have zero revenue thresholds",
            lowest.name
        ));
    }

    let categories = group.revenue_categories();

    for tier in tiers {
        if tier.group != group {
            return fail(format!(
                "tier '{}' is declared for group '{}'",
                tier.name, tier.group
            ));
        }

        if tier.basic_salary < Decimal::ZERO {
            return fail(format!("tier '{}' has a negative basic salary", tier.name));
        }

        for category in categories {
            match tier.rate_for(*category) {
                None => {
                    return fail(format!(
                        "tier '{}' has no commission rate for '{}'",
                        tier.name, category
                    ));
                }
                Some(rate) if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED => {
                    return fail(format!(
                        "tier '{}' has {} rate {} outside 0-100",
                        tier.name, category, rate
                    ));
                }
                Some(_) => {}
            }
        }

        if let Some(extra) = tier
            .commission_rates
            .keys()
            .find(|category| !categories.contains(category))
        {
            return fail(format!(
                "tier '{}' defines a '{}' rate, which is not a {} category",
                tier.name, extra, group
            ));
        }
    }

    for pair in tiers.windows(2) {
        let (lower, higher) = (&pair[0], &pair[1]);
        if higher.monthly_revenue_min <= lower.monthly_revenue_min
            || higher.daily_revenue_min <= lower.daily_revenue_min
        {
            return fail(format!(
                "thresholds of tier '{}' must be strictly above those of '{}'",
                higher.name, lower.name
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RevenueCategory;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tier(group: EmployeeGroup, name: &str, daily: i64, monthly: i64, rate: i64) -> Tier {
        Tier {
            name: name.to_string(),
            group,
            daily_revenue_min: Decimal::from(daily),
            monthly_revenue_min: Decimal::from(monthly),
            basic_salary: Decimal::ZERO,
            commission_rates: group
                .revenue_categories()
                .iter()
                .map(|c| (*c, Decimal::from(rate)))
                .collect(),
            bonus_label: "T13".to_string(),
            working_hours: String::new(),
            kpi_targets: BTreeMap::new(),
        }
    }

    fn three_tiers(group: EmployeeGroup) -> Vec<Tier> {
        let prefix = group.as_str();
        vec![
            tier(group, &format!("{} low", prefix), 0, 0, 5),
            tier(group, &format!("{} mid", prefix), 100, 2_600, 10),
            tier(group, &format!("{} high", prefix), 200, 5_200, 15),
        ]
    }

    fn all_groups() -> BTreeMap<EmployeeGroup, Vec<Tier>> {
        EmployeeGroup::ALL
            .into_iter()
            .map(|group| (group, three_tiers(group)))
            .collect()
    }

    fn table() -> TierTable {
        TierTable::new(all_groups()).unwrap()
    }

    fn expect_configuration_error(result: EngineResult<TierTable>, needle: &str) {
        match result {
            Err(EngineError::Configuration { message, .. }) => {
                assert!(message.contains(needle), "unexpected message: {}", message);
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    /// TT-001: highest tier reached by both gates wins
    #[test]
    fn test_resolve_highest_tier() {
        let table = table();
        let tier = table
            .resolve_tier(EmployeeGroup::NailTechnician, dec("6000"), dec("250"))
            .unwrap();
        assert_eq!(tier.name, "nail_technician high");
    }

    /// TT-002: exact thresholds reach the tier
    #[test]
    fn test_resolve_at_exact_thresholds() {
        let table = table();
        let tier = table
            .resolve_tier(EmployeeGroup::MainStylist, dec("2600"), dec("100"))
            .unwrap();
        assert_eq!(tier.name, "main_stylist mid");
    }

    /// TT-003: high monthly with low daily does not promote
    #[test]
    fn test_dual_gate_low_daily() {
        let table = table();
        let tier = table
            .resolve_tier(EmployeeGroup::MainStylist, dec("100000"), dec("99"))
            .unwrap();
        assert_eq!(tier.name, "main_stylist low");
    }

    /// TT-004: high daily with low monthly does not promote
    #[test]
    fn test_dual_gate_low_monthly() {
        let table = table();
        let tier = table
            .resolve_tier(EmployeeGroup::RelaxTherapist, dec("2599"), dec("1000"))
            .unwrap();
        assert_eq!(tier.name, "relax_therapist low");
    }

    /// TT-005: zero revenue falls back to the lowest tier
    #[test]
    fn test_zero_revenue_falls_back_to_lowest() {
        let table = table();
        let tier = table
            .resolve_tier(EmployeeGroup::AssistantStylist, Decimal::ZERO, Decimal::ZERO)
            .unwrap();
        assert_eq!(tier.name, "assistant_stylist low");
    }

    #[test]
    fn test_negative_revenue_is_invalid_input() {
        let table = table();
        match table.resolve_tier(EmployeeGroup::NailTechnician, dec("-1"), Decimal::ZERO) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "monthly_revenue"),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_tier_by_name_across_groups() {
        let table = table();
        let tier = table.lookup_tier_by_name("relax_therapist mid").unwrap();
        assert_eq!(tier.group, EmployeeGroup::RelaxTherapist);
        assert!(table.lookup_tier_by_name("unknown").is_none());
    }

    #[test]
    fn test_groups_iterates_in_group_order() {
        let table = table();
        let groups: Vec<EmployeeGroup> = table.groups().map(|(g, _)| g).collect();
        assert_eq!(groups, EmployeeGroup::ALL.to_vec());
    }

    #[test]
    fn test_missing_group_is_rejected() {
        let mut groups = all_groups();
        groups.remove(&EmployeeGroup::NailTechnician);
        expect_configuration_error(TierTable::new(groups), "no tier list");
    }

    #[test]
    fn test_empty_group_is_rejected() {
        let mut groups = all_groups();
        groups.insert(EmployeeGroup::RelaxTherapist, vec![]);
        expect_configuration_error(TierTable::new(groups), "empty");
    }

    #[test]
    fn test_nonzero_lowest_tier_is_rejected() {
        let mut groups = all_groups();
        groups.get_mut(&EmployeeGroup::MainStylist).unwrap()[0].daily_revenue_min = dec("1");
        expect_configuration_error(TierTable::new(groups), "zero revenue thresholds");
    }

    #[test]
    fn test_non_monotonic_thresholds_are_rejected() {
        let mut groups = all_groups();
        groups.get_mut(&EmployeeGroup::NailTechnician).unwrap()[2].daily_revenue_min = dec("50");
        expect_configuration_error(TierTable::new(groups), "strictly above");
    }

    #[test]
    fn test_missing_rate_is_rejected() {
        let mut groups = all_groups();
        groups.get_mut(&EmployeeGroup::MainStylist).unwrap()[1]
            .commission_rates
            .remove(&RevenueCategory::Cutting);
        expect_configuration_error(TierTable::new(groups), "no commission rate for 'cutting'");
    }

    #[test]
    fn test_rate_outside_schema_is_rejected() {
        let mut groups = all_groups();
        groups.get_mut(&EmployeeGroup::NailTechnician).unwrap()[0]
            .commission_rates
            .insert(RevenueCategory::Facial, dec("10"));
        expect_configuration_error(TierTable::new(groups), "not a nail_technician category");
    }

    #[test]
    fn test_rate_above_hundred_is_rejected() {
        let mut groups = all_groups();
        groups.get_mut(&EmployeeGroup::RelaxTherapist).unwrap()[1]
            .commission_rates
            .insert(RevenueCategory::Service, dec("101"));
        expect_configuration_error(TierTable::new(groups), "outside 0-100");
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut groups = all_groups();
        groups.get_mut(&EmployeeGroup::NailTechnician).unwrap()[1].name =
            "relax_therapist mid".to_string();
        expect_configuration_error(TierTable::new(groups), "more than once");
    }

    #[test]
    fn test_tier_of_wrong_group_is_rejected() {
        let mut groups = all_groups();
        groups.get_mut(&EmployeeGroup::NailTechnician).unwrap()[1].group =
            EmployeeGroup::RelaxTherapist;
        expect_configuration_error(TierTable::new(groups), "declared for group");
    }
}

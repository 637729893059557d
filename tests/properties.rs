//! Property tests for tier resolution and payroll calculation.

use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;

use salon_payroll::config::{ConfigLoader, TierTable};
use salon_payroll::models::{Employee, EmployeeGroup, PeriodRevenueRecord, RevenueCategory};

fn loader() -> ConfigLoader {
    ConfigLoader::builtin().expect("builtin config")
}

fn rank(table: &TierTable, group: EmployeeGroup, name: &str) -> usize {
    table
        .tiers(group)
        .expect("group tiers")
        .iter()
        .position(|tier| tier.name == name)
        .expect("tier in group")
}

fn any_group() -> impl Strategy<Value = EmployeeGroup> {
    prop::sample::select(EmployeeGroup::ALL.to_vec())
}

fn revenue() -> impl Strategy<Value = Decimal> {
    (0_i64..600_000_000_i64).prop_map(Decimal::from)
}

fn record_for(
    group: EmployeeGroup,
    monthly: Decimal,
    amounts: &[i64],
    kpi_achieved: bool,
) -> PeriodRevenueRecord {
    let mut record = PeriodRevenueRecord::new("emp_prop", monthly, None);
    for (category, amount) in group.revenue_categories().iter().zip(amounts) {
        record.category_revenue.insert(*category, Decimal::from(*amount));
    }
    record.kpi_achieved = Some(kpi_achieved);
    record
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn resolved_rank_never_decreases_with_revenue(
        group in any_group(),
        monthly in revenue(),
        daily in (0_i64..25_000_000_i64).prop_map(Decimal::from),
        extra_monthly in revenue(),
        extra_daily in (0_i64..25_000_000_i64).prop_map(Decimal::from),
    ) {
        let loader = loader();
        let table = loader.tier_table();

        let low = table.resolve_tier(group, monthly, daily).unwrap();
        let high = table
            .resolve_tier(group, monthly + extra_monthly, daily + extra_daily)
            .unwrap();

        prop_assert!(rank(table, group, &high.name) >= rank(table, group, &low.name));
    }

    #[test]
    fn resolved_tier_meets_both_gates(
        group in any_group(),
        monthly in revenue(),
        daily in (0_i64..25_000_000_i64).prop_map(Decimal::from),
    ) {
        let loader = loader();
        let table = loader.tier_table();
        let tier = table.resolve_tier(group, monthly, daily).unwrap();

        prop_assert!(monthly >= tier.monthly_revenue_min);
        prop_assert!(daily >= tier.daily_revenue_min);

        let next = table.tiers(group).unwrap().get(rank(table, group, &tier.name) + 1);
        if let Some(next) = next {
            prop_assert!(monthly < next.monthly_revenue_min || daily < next.daily_revenue_min);
        }
    }

    #[test]
    fn resolution_is_total_for_non_negative_revenue(
        group in any_group(),
        monthly in revenue(),
        daily in revenue(),
    ) {
        prop_assert!(loader().tier_table().resolve_tier(group, monthly, daily).is_ok());
    }

    #[test]
    fn total_commission_is_sum_of_lines(
        group in any_group(),
        monthly in revenue(),
        amounts in prop::collection::vec(0_i64..200_000_000_i64, 6),
    ) {
        let calculator = loader().calculator();
        let employee = Employee::new("emp_prop", group);
        let record = record_for(group, monthly, &amounts, true);

        let breakdown = calculator.calculate_payroll(&employee, &record, None).unwrap();
        let sum: Decimal = breakdown.commissions.iter().map(|c| c.amount).sum();

        prop_assert_eq!(breakdown.total_commission, sum);
        prop_assert_eq!(breakdown.commissions.len(), group.revenue_categories().len());
    }

    #[test]
    fn kpi_penalty_gated_on_achievement(
        group in any_group(),
        monthly in revenue(),
        amounts in prop::collection::vec(0_i64..200_000_000_i64, 6),
        kpi_achieved in any::<bool>(),
        is_new_employee in any::<bool>(),
    ) {
        let calculator = loader().calculator();
        let mut employee = Employee::new("emp_prop", group);
        employee.is_new_employee = is_new_employee;
        let record = record_for(group, monthly, &amounts, kpi_achieved);

        let breakdown = calculator.calculate_payroll(&employee, &record, None).unwrap();

        if kpi_achieved {
            prop_assert_eq!(breakdown.kpi_penalty, Decimal::ZERO);
        } else {
            let rate = if is_new_employee { Decimal::new(4, 2) } else { Decimal::new(2, 2) };
            prop_assert_eq!(breakdown.kpi_penalty, breakdown.total_commission * rate);
        }
    }

    #[test]
    fn calculation_is_idempotent(
        group in any_group(),
        monthly in revenue(),
        amounts in prop::collection::vec(0_i64..200_000_000_i64, 6),
        advance in (0_i64..50_000_000_i64).prop_map(Decimal::from),
    ) {
        let calculator = loader().calculator();
        let employee = Employee::new("emp_prop", group);
        let mut record = record_for(group, monthly, &amounts, false);
        record.advance = advance;
        record.category_revenue.insert(RevenueCategory::Cutting, Decimal::from(1_000));

        let first = calculator.calculate_payroll(&employee, &record, None).unwrap();
        let second = calculator.calculate_payroll(&employee, &record, None).unwrap();

        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        prop_assert_eq!(first, second);
    }
}

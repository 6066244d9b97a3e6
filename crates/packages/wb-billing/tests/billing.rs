use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wb_billing::{
    BillingCalculator, Tariff, TariffTable, compare_years, compute_bill, DEFAULT_YEAR,
};
use wb_domain::{BillingInput, BillingPeriod, MAX_CONSUMPTION, Money};

fn household(consumption: Decimal, persons: u32, period: BillingPeriod, disability: bool) -> BillingInput {
    BillingInput::new(consumption, persons, period, disability, 2026).unwrap()
}

fn sample_inputs() -> Vec<BillingInput> {
    let mut inputs = Vec::new();
    for consumption in [dec!(0), dec!(0.4), dec!(2.99), dec!(3), dec!(7), dec!(13.25), dec!(40)] {
        for persons in [1, 2, 5] {
            for period in [BillingPeriod::Monthly, BillingPeriod::BiMonthly] {
                for disability in [false, true] {
                    inputs.push(household(consumption, persons, period, disability));
                }
            }
        }
    }
    inputs
}

#[test]
fn test_tiers_add_up_to_effective_consumption() {
    for input in sample_inputs() {
        let bill = compute_bill(&input);
        assert_eq!(
            bill.reduced_consumption + bill.full_consumption,
            bill.effective_consumption,
            "{input:?}"
        );
        assert_eq!(bill.reduced_price + bill.full_price, bill.total_price, "{input:?}");
    }
}

#[test]
fn test_reduced_tier_never_exceeds_allocation() {
    for input in sample_inputs() {
        let bill = compute_bill(&input);
        assert!(bill.reduced_consumption <= bill.allocation, "{input:?}");
        assert!(bill.full_consumption >= Decimal::ZERO, "{input:?}");
        if input.consumption() <= bill.allocation {
            assert_eq!(bill.full_consumption, Decimal::ZERO, "{input:?}");
        }
    }
}

#[test]
fn test_minimum_charge_only_for_small_bimonthly_bills() {
    for input in sample_inputs() {
        let bill = compute_bill(&input);
        let expected = input.period() == BillingPeriod::BiMonthly && input.consumption() < dec!(3);
        assert_eq!(bill.minimum_charge_applied, expected, "{input:?}");
        if expected {
            assert_eq!(bill.effective_consumption, dec!(3));
        } else {
            assert_eq!(bill.effective_consumption, input.consumption());
        }
    }
}

#[test]
fn test_largest_accepted_consumption_is_priced() {
    for period in [BillingPeriod::Monthly, BillingPeriod::BiMonthly] {
        let input = household(MAX_CONSUMPTION, 1, period, false);
        let bill = compute_bill(&input);
        assert_eq!(bill.effective_consumption, MAX_CONSUMPTION);
        assert!(bill.total_price > bill.reduced_price);
        let comparison = compare_years(&input, 2023);
        assert!(comparison.delta_percent.is_some());
    }
}

#[test]
fn test_compare_years_delta_flips_sign_when_swapped() {
    let input = household(dec!(30), 3, BillingPeriod::BiMonthly, false);
    let forward = compare_years(&input, 2023);
    let backward = compare_years(&input.with_year(2023), 2026);
    assert_eq!(forward.delta, Money::zero() - backward.delta);
    assert!(forward.delta.is_positive());
}

#[test]
fn test_compare_years_reports_percent() {
    let input = household(dec!(20), 4, BillingPeriod::BiMonthly, false);
    let comparison = compare_years(&input, 2025);
    // 20 * (8.508 - 8.188) = 6.4 over 163.76
    assert_eq!(comparison.current.total_price.amount(), dec!(170.16));
    assert_eq!(comparison.historical.total_price.amount(), dec!(163.76));
    assert_eq!(comparison.delta.amount(), dec!(6.4));
    let pct = comparison.delta_percent.unwrap();
    assert!(pct > dec!(3.90) && pct < dec!(3.91), "{pct}");
}

#[test]
fn test_unknown_year_priced_at_default_tariff() {
    let input = BillingInput::new(dec!(20), 4, BillingPeriod::BiMonthly, false, 1987).unwrap();
    let bill = compute_bill(&input);
    assert_eq!(bill.tariff.year, DEFAULT_YEAR);
    assert_eq!(bill.total_price.amount(), dec!(170.16));
}

#[test]
fn test_calculator_with_custom_table() {
    static FLAT: [Tariff; 2] = [
        Tariff::new(2010, dec!(1), dec!(2)),
        Tariff::new(2011, dec!(2), dec!(4)),
    ];
    let calculator = BillingCalculator::new(TariffTable::new(&FLAT, 2011).unwrap());
    let input = BillingInput::new(dec!(10), 1, BillingPeriod::Monthly, false, 2010).unwrap();
    let bill = calculator.compute_bill(&input);
    // 3.5 * 1 + 6.5 * 2
    assert_eq!(bill.total_price.amount(), dec!(16.5));

    let comparison = calculator.compare_years(&input.with_year(2011), 2010);
    assert_eq!(comparison.delta.amount(), dec!(16.5));
    assert_eq!(comparison.delta_percent, Some(dec!(100)));
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;
use wb_domain::{BillingInput, BillingPeriod, CubicMeters, Money};

use crate::allocation::allocate;
use crate::tariff::{Tariff, TariffTable};

/// Smallest volume a bi-monthly bill is charged for.
pub const MINIMUM_CHARGE_VOLUME: Decimal = dec!(3);

/// A priced bill for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BillingResult {
    pub allocation: CubicMeters,
    pub reduced_consumption: CubicMeters,
    pub full_consumption: CubicMeters,
    pub reduced_price: Money,
    pub full_price: Money,
    pub total_price: Money,
    pub tariff: Tariff,
    pub minimum_charge_applied: bool,
    /// Consumption the bill was priced on; differs from the input only when
    /// the minimum charge raised it.
    pub effective_consumption: CubicMeters,
}

/// The same household billed under two different years' tariffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearComparison {
    pub current: BillingResult,
    pub historical: BillingResult,
    /// `current.total_price - historical.total_price`.
    pub delta: Money,
    /// `delta` as a percentage of the historical total, `None` when that total is zero.
    pub delta_percent: Option<Decimal>,
}

/// Splits `consumption` into (reduced, full) tiers against `allocation`.
fn split_tiers(consumption: CubicMeters, allocation: CubicMeters) -> (CubicMeters, CubicMeters) {
    let reduced = consumption.min(allocation);
    let full = (consumption - allocation).max(Decimal::ZERO);
    (reduced, full)
}

/// Prices bills against a [`TariffTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BillingCalculator {
    tariffs: TariffTable,
}

impl BillingCalculator {
    pub fn new(tariffs: TariffTable) -> Self {
        Self { tariffs }
    }

    pub fn compute_bill(&self, input: &BillingInput) -> BillingResult {
        let tariff = self.tariffs.lookup(input.year());
        let allocation = allocate(
            input.persons(),
            input.has_disability_benefit(),
            input.period(),
        );

        let mut effective_consumption = input.consumption();
        let (mut reduced, mut full) = split_tiers(effective_consumption, allocation);

        let minimum_charge_applied = input.period() == BillingPeriod::BiMonthly
            && effective_consumption < MINIMUM_CHARGE_VOLUME;
        if minimum_charge_applied {
            debug!(
                "Raising consumption {} to the minimum charge of {} m3",
                effective_consumption, MINIMUM_CHARGE_VOLUME
            );
            effective_consumption = MINIMUM_CHARGE_VOLUME;
            (reduced, full) = split_tiers(effective_consumption, allocation);
        }

        let reduced_price = tariff.reduced_rate * reduced;
        let full_price = tariff.full_rate * full;

        BillingResult {
            allocation,
            reduced_consumption: reduced,
            full_consumption: full,
            reduced_price,
            full_price,
            total_price: reduced_price + full_price,
            tariff,
            minimum_charge_applied,
            effective_consumption,
        }
    }

    /// Bills `input` under its own year and under `other_year`.
    pub fn compare_years(&self, input: &BillingInput, other_year: i32) -> YearComparison {
        let current = self.compute_bill(input);
        let historical = self.compute_bill(&input.with_year(other_year));
        let delta = current.total_price - historical.total_price;

        YearComparison {
            current,
            historical,
            delta,
            delta_percent: delta.percent_of(historical.total_price),
        }
    }
}

/// Computes a bill with the standard tariff table.
pub fn compute_bill(input: &BillingInput) -> BillingResult {
    BillingCalculator::default().compute_bill(input)
}

/// Compares `input`'s year against `other_year` with the standard tariff table.
pub fn compare_years(input: &BillingInput, other_year: i32) -> YearComparison {
    BillingCalculator::default().compare_years(input, other_year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(consumption: Decimal, persons: u32, months: u8) -> BillingInput {
        let period = BillingPeriod::try_from(months).unwrap();
        BillingInput::new(consumption, persons, period, false, 2026).unwrap()
    }

    #[test]
    fn test_split_inside_allocation() {
        assert_eq!(split_tiers(dec!(20), dec!(28)), (dec!(20), dec!(0)));
    }

    #[test]
    fn test_split_beyond_allocation() {
        assert_eq!(split_tiers(dec!(30), dec!(28)), (dec!(28), dec!(2)));
    }

    #[test]
    fn test_split_exactly_at_allocation() {
        assert_eq!(split_tiers(dec!(7), dec!(7)), (dec!(7), dec!(0)));
    }

    #[test]
    fn test_four_person_bimonthly_bill() {
        let bill = compute_bill(&input(dec!(20), 4, 2));
        assert_eq!(bill.allocation, dec!(28));
        assert_eq!(bill.reduced_consumption, dec!(20));
        assert_eq!(bill.full_consumption, dec!(0));
        assert_eq!(bill.total_price.amount(), dec!(170.16));
        assert!(!bill.minimum_charge_applied);
        assert_eq!(bill.effective_consumption, dec!(20));
    }

    #[test]
    fn test_minimum_charge_bimonthly() {
        let bill = compute_bill(&input(dec!(1), 1, 2));
        assert!(bill.minimum_charge_applied);
        assert_eq!(bill.effective_consumption, dec!(3));
        assert_eq!(bill.allocation, dec!(7));
        assert_eq!(bill.reduced_consumption, dec!(3));
        assert_eq!(bill.full_consumption, dec!(0));
        assert_eq!(bill.total_price.amount(), dec!(25.524));
    }

    #[test]
    fn test_minimum_charge_boundary_not_applied_at_three() {
        let bill = compute_bill(&input(dec!(3), 1, 2));
        assert!(!bill.minimum_charge_applied);
        assert_eq!(bill.effective_consumption, dec!(3));
    }

    #[test]
    fn test_minimum_charge_never_monthly() {
        let bill = compute_bill(&input(dec!(0), 1, 1));
        assert!(!bill.minimum_charge_applied);
        assert_eq!(bill.effective_consumption, dec!(0));
        assert!(bill.total_price.is_zero());
    }

    #[test]
    fn test_full_tier_pricing() {
        // 1 person monthly: 3.5 m3 reduced, 6.5 m3 full
        let bill = compute_bill(&input(dec!(10), 1, 1));
        assert_eq!(bill.reduced_consumption, dec!(3.5));
        assert_eq!(bill.full_consumption, dec!(6.5));
        assert_eq!(bill.reduced_price.amount(), dec!(29.778));
        assert_eq!(bill.full_price.amount(), dec!(95.1405));
        assert_eq!(bill.total_price.amount(), dec!(124.9185));
    }

    #[test]
    fn test_compare_with_zero_historical_total() {
        let comparison = compare_years(&input(dec!(0), 2, 1), 2024);
        assert!(comparison.delta.is_zero());
        assert_eq!(comparison.delta_percent, None);
    }
}

//! Subsidized-tier allocation per household.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wb_domain::{BillingPeriod, CubicMeters};

/// m³ per person per month billed at the reduced rate.
pub const PER_PERSON_RATE: Decimal = dec!(3.5);

/// Extra m³ per month for households receiving a disability benefit.
pub const DISABILITY_BONUS_RATE: Decimal = dec!(3.5);

/// Reduced-rate quota for the whole billing period. Not rounded.
///
/// `persons` is at least 1 for any [`wb_domain::BillingInput`].
pub fn allocate(persons: u32, has_disability_benefit: bool, period: BillingPeriod) -> CubicMeters {
    let months = period.factor();
    let mut allocation = Decimal::from(persons) * PER_PERSON_RATE * months;
    if has_disability_benefit {
        allocation += DISABILITY_BONUS_RATE * months;
    }
    allocation
}

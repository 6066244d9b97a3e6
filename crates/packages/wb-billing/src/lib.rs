#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Tiered water bill calculation.
//!
//! Consumption up to the household's allocation is billed at the reduced
//! rate and the remainder at the full rate. Bi-monthly bills are charged for
//! at least [`MINIMUM_CHARGE_VOLUME`] m³. Every function here is pure: the
//! result depends only on the arguments and the immutable tariff data.

pub mod allocation;
mod calculator;
pub mod tariff;

pub use allocation::{allocate, DISABILITY_BONUS_RATE, PER_PERSON_RATE};
pub use calculator::{
    compare_years, compute_bill, BillingCalculator, BillingResult, YearComparison,
    MINIMUM_CHARGE_VOLUME,
};
pub use tariff::{Tariff, TariffTable, DEFAULT_YEAR, MAX_RATE};

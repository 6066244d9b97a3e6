//! Core value types shared by the billing calculator and the anomaly detector.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

mod input;

pub use input::{BillingBasis, BillingInput, BillingPeriod, MAX_CONSUMPTION};

/// ISO code of the only currency bills are issued in.
pub const CURRENCY: &str = "ILS";

/// A volume of water in cubic meters.
pub type CubicMeters = Decimal;

/// An amount of New Israeli Shekels.
///
/// Arithmetic keeps full decimal precision; rounding to agorot only happens
/// when the amount is displayed or explicitly requested with [`Money::rounded`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    amount: Decimal,
}

impl Money {
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    pub const fn zero() -> Self {
        Self {
            amount: Decimal::ZERO,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &'static str {
        CURRENCY
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Self {
            amount: self.amount.abs(),
        }
    }

    /// The amount rounded half away from zero to two decimal places.
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// `self` as a percentage of `base`, or `None` when `base` is zero or
    /// the ratio does not fit in a `Decimal`.
    pub fn percent_of(&self, base: Money) -> Option<Decimal> {
        self.amount
            .checked_div(base.amount)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shown = self.rounded();
        shown.rescale(2);
        write!(f, "{} {}", shown, CURRENCY)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            amount: self.amount + other.amount,
        }
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.amount += other.amount;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            amount: self.amount - other.amount,
        }
    }
}

/// Price per unit times a quantity, e.g. a per-m³ rate times a volume.
impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, quantity: Decimal) -> Self {
        Self {
            amount: self.amount * quantity,
        }
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use wb_error::{Error, Result};

use crate::CubicMeters;

/// Largest consumption a single bill is accepted for, in m³.
pub const MAX_CONSUMPTION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Length of the billing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BillingPeriod {
    Monthly,
    BiMonthly,
}

impl BillingPeriod {
    pub fn months(&self) -> u8 {
        match self {
            BillingPeriod::Monthly => 1,
            BillingPeriod::BiMonthly => 2,
        }
    }

    /// Number of months as a decimal factor for allocation arithmetic.
    pub fn factor(&self) -> Decimal {
        Decimal::from(self.months())
    }
}

impl TryFrom<u8> for BillingPeriod {
    type Error = Error;

    fn try_from(months: u8) -> Result<Self> {
        match months {
            1 => Ok(BillingPeriod::Monthly),
            2 => Ok(BillingPeriod::BiMonthly),
            other => Err(Error::invalid(format!(
                "billing period must be 1 or 2 months, got {other}"
            ))),
        }
    }
}

impl From<BillingPeriod> for u8 {
    fn from(period: BillingPeriod) -> u8 {
        period.months()
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingPeriod::Monthly => f.write_str("monthly"),
            BillingPeriod::BiMonthly => f.write_str("bi-monthly"),
        }
    }
}

/// How the utility arrived at the billed consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingBasis {
    /// Consumption read from the meter.
    Measured,
    /// Consumption estimated by the utility without a reading.
    Estimated,
}

impl FromStr for BillingBasis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "measured" => Ok(BillingBasis::Measured),
            "estimated" => Ok(BillingBasis::Estimated),
            other => Err(Error::invalid(format!(
                "billing basis must be 'measured' or 'estimated', got '{other}'"
            ))),
        }
    }
}

/// Household and consumption facts for one billing period.
///
/// Only constructible through [`BillingInput::new`], so every value that
/// reaches the calculator has non-negative consumption and at least one person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BillingInput {
    consumption: CubicMeters,
    persons: u32,
    period: BillingPeriod,
    has_disability_benefit: bool,
    year: i32,
}

impl BillingInput {
    pub fn new(
        consumption: CubicMeters,
        persons: u32,
        period: BillingPeriod,
        has_disability_benefit: bool,
        year: i32,
    ) -> Result<Self> {
        if consumption < Decimal::ZERO {
            return Err(Error::invalid(format!(
                "consumption cannot be negative, got {consumption}"
            )));
        }
        if consumption > MAX_CONSUMPTION {
            return Err(Error::invalid(format!(
                "consumption cannot exceed {MAX_CONSUMPTION} m3, got {consumption}"
            )));
        }
        if persons == 0 {
            return Err(Error::invalid("household must have at least 1 person"));
        }
        Ok(Self {
            consumption,
            persons,
            period,
            has_disability_benefit,
            year,
        })
    }

    /// The same household and consumption billed under another year's tariff.
    pub fn with_year(&self, year: i32) -> Self {
        Self { year, ..*self }
    }

    pub fn consumption(&self) -> CubicMeters {
        self.consumption
    }

    pub fn persons(&self) -> u32 {
        self.persons
    }

    pub fn period(&self) -> BillingPeriod {
        self.period
    }

    pub fn has_disability_benefit(&self) -> bool {
        self.has_disability_benefit
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

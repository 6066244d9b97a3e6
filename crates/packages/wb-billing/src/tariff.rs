//! Per-year water tariffs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;
use wb_domain::Money;
use wb_error::{Error, Result};

/// Reduced and full per-m³ prices in effect for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tariff {
    pub year: i32,
    /// Price per m³ inside the household allocation.
    pub reduced_rate: Money,
    /// Price per m³ beyond the household allocation.
    pub full_rate: Money,
}

impl Tariff {
    pub const fn new(year: i32, reduced_rate: Decimal, full_rate: Decimal) -> Self {
        Self {
            year,
            reduced_rate: Money::new(reduced_rate),
            full_rate: Money::new(full_rate),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.full_rate.amount() > MAX_RATE {
            return Err(Error::invalid(format!(
                "tariff {} full rate exceeds {MAX_RATE} per m3",
                self.year
            )));
        }
        if !self.reduced_rate.is_positive() {
            return Err(Error::invalid(format!(
                "tariff {} has a non-positive reduced rate",
                self.year
            )));
        }
        if self.full_rate <= self.reduced_rate {
            return Err(Error::invalid(format!(
                "tariff {} full rate must exceed its reduced rate",
                self.year
            )));
        }
        Ok(())
    }
}

/// Highest per-m³ rate a tariff may charge. Together with
/// [`wb_domain::MAX_CONSUMPTION`] this keeps every bill representable.
pub const MAX_RATE: Decimal = dec!(1000);

/// Most recent year with a published tariff; unknown years are billed at it.
pub const DEFAULT_YEAR: i32 = 2026;

// NIS per m³, VAT included. Ascending by year.
static STANDARD_TARIFFS: [Tariff; 4] = [
    Tariff::new(2023, dec!(7.389), dec!(12.712)),
    Tariff::new(2024, dec!(7.819), dec!(13.452)),
    Tariff::new(2025, dec!(8.188), dec!(14.087)),
    Tariff::new(2026, dec!(8.508), dec!(14.637)),
];

/// Lookup of tariffs by year with a designated fallback.
#[derive(Debug, Clone, Copy)]
pub struct TariffTable {
    entries: &'static [Tariff],
    default: Tariff,
}

impl TariffTable {
    /// Builds a table from static data.
    ///
    /// Fails when a tariff breaks `full_rate > reduced_rate > 0`, when a year
    /// appears twice, or when `default_year` has no entry.
    pub fn new(entries: &'static [Tariff], default_year: i32) -> Result<Self> {
        for (idx, tariff) in entries.iter().enumerate() {
            tariff.validate()?;
            if entries[..idx].iter().any(|t| t.year == tariff.year) {
                return Err(Error::invalid(format!(
                    "tariff year {} listed twice",
                    tariff.year
                )));
            }
        }
        let default = entries
            .iter()
            .find(|t| t.year == default_year)
            .copied()
            .ok_or_else(|| {
                Error::invalid(format!("default year {default_year} has no tariff"))
            })?;
        Ok(Self { entries, default })
    }

    /// The published tariffs, defaulting to [`DEFAULT_YEAR`].
    pub fn standard() -> Self {
        Self {
            entries: &STANDARD_TARIFFS,
            default: STANDARD_TARIFFS[STANDARD_TARIFFS.len() - 1],
        }
    }

    /// Tariff for `year`, or the default year's tariff when `year` is unknown.
    pub fn lookup(&self, year: i32) -> Tariff {
        match self.entries.iter().find(|t| t.year == year) {
            Some(tariff) => *tariff,
            None => {
                debug!(
                    "No tariff for {}, falling back to {}",
                    year, self.default.year
                );
                self.default
            }
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.entries.iter().any(|t| t.year == year)
    }

    pub fn default_tariff(&self) -> Tariff {
        self.default
    }

    /// Years with an entry, ascending.
    pub fn supported_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.entries.iter().map(|t| t.year).collect();
        years.sort_unstable();
        years
    }
}

impl Default for TariffTable {
    fn default() -> Self {
        Self::standard()
    }
}

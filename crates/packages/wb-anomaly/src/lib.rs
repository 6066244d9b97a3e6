#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Billing anomaly detection.
//!
//! Compares a computed [`BillingResult`] with what the household actually
//! received and observed, and reports likely billing errors, warnings and
//! recommendations. Every rule is evaluated on each pass; several findings
//! may be reported together.

use tracing::debug;
use wb_billing::BillingResult;
use wb_domain::{BillingBasis, BillingInput, CubicMeters, Money};

mod finding;
mod rules;

pub use finding::{DetectionReport, Finding, FindingCategory, FindingKind, Severity};
pub use rules::{
    ALLOCATION_UNDERUSE_RATIO, BILL_TOLERANCE_PERCENT, CONSUMPTION_CHANGE_PERCENT,
    UNDERUSE_HOUSEHOLD_SIZE,
};

/// Optional facts supplied alongside a bill. Rules whose facts are missing are skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Observations {
    /// Amount printed on the bill the household received.
    pub actual_bill_amount: Option<Money>,
    /// Consumption billed for the previous period.
    pub previous_consumption: Option<CubicMeters>,
    /// Meter reading the household took themselves.
    pub current_meter_reading: Option<CubicMeters>,
    pub billing_basis: Option<BillingBasis>,
}

impl Observations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actual_bill_amount(mut self, amount: Money) -> Self {
        self.actual_bill_amount = Some(amount);
        self
    }

    pub fn with_previous_consumption(mut self, consumption: CubicMeters) -> Self {
        self.previous_consumption = Some(consumption);
        self
    }

    pub fn with_current_meter_reading(mut self, reading: CubicMeters) -> Self {
        self.current_meter_reading = Some(reading);
        self
    }

    pub fn with_billing_basis(mut self, basis: BillingBasis) -> Self {
        self.billing_basis = Some(basis);
        self
    }
}

/// Everything a rule may look at.
pub(crate) struct DetectionContext<'a> {
    pub billing: &'a BillingResult,
    pub input: &'a BillingInput,
    pub observations: &'a Observations,
}

/// Runs every rule and returns the findings ordered errors first, then
/// warnings, then recommendations, each group in rule order.
pub fn detect(
    billing: &BillingResult,
    input: &BillingInput,
    observations: &Observations,
) -> Vec<Finding> {
    let ctx = DetectionContext {
        billing,
        input,
        observations,
    };
    let mut findings: Vec<Finding> = rules::RULES.iter().filter_map(|rule| rule(&ctx)).collect();
    // Stable, so rule order survives inside each kind.
    findings.sort_by_key(|f| f.kind);
    debug!("Detection produced {} finding(s)", findings.len());
    findings
}

//! Plain-text and JSON rendering of bills, comparisons and findings.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt::{self, Write};
use wb_anomaly::{DetectionReport, Finding};
use wb_billing::{BillingResult, YearComparison};
use wb_domain::{BillingInput, Money};

#[derive(Debug, Serialize)]
pub struct BillOutput<'a> {
    pub input: &'a BillingInput,
    pub bill: &'a BillingResult,
}

#[derive(Debug, Serialize)]
pub struct CompareOutput<'a> {
    pub input: &'a BillingInput,
    pub comparison: &'a YearComparison,
}

#[derive(Debug, Serialize)]
pub struct CheckOutput<'a> {
    pub input: &'a BillingInput,
    pub bill: &'a BillingResult,
    pub findings: &'a [Finding],
}

fn write_bill(out: &mut String, input: &BillingInput, bill: &BillingResult) -> fmt::Result {
    writeln!(
        out,
        "Bill for {} m3 ({}, {} persons{}, {} tariff)",
        input.consumption().normalize(),
        input.period(),
        input.persons(),
        if input.has_disability_benefit() {
            ", disability benefit"
        } else {
            ""
        },
        bill.tariff.year
    )?;
    if bill.tariff.year != input.year() {
        writeln!(
            out,
            "  No tariff published for {}; priced at the {} tariff",
            input.year(),
            bill.tariff.year
        )?;
    }
    if bill.minimum_charge_applied {
        writeln!(
            out,
            "  Minimum charge applied: billed for {} m3",
            bill.effective_consumption.normalize()
        )?;
    }
    writeln!(out, "  Allocation:   {} m3", bill.allocation.normalize())?;
    writeln!(
        out,
        "  Reduced tier: {} m3 x {} ILS/m3 = {}",
        bill.reduced_consumption.normalize(),
        bill.tariff.reduced_rate.amount(),
        bill.reduced_price
    )?;
    writeln!(
        out,
        "  Full tier:    {} m3 x {} ILS/m3 = {}",
        bill.full_consumption.normalize(),
        bill.tariff.full_rate.amount(),
        bill.full_price
    )?;
    writeln!(out, "  Total:        {}", bill.total_price)
}

fn signed(money: Money) -> String {
    if money.is_positive() {
        format!("+{money}")
    } else {
        money.to_string()
    }
}

fn signed_percent(pct: Decimal) -> String {
    let pct = pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if pct > Decimal::ZERO {
        format!("+{pct}%")
    } else {
        format!("{pct}%")
    }
}

pub fn bill_text(input: &BillingInput, bill: &BillingResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_bill(&mut out, input, bill)?;
    Ok(out)
}

pub fn compare_text(input: &BillingInput, comparison: &YearComparison) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_bill(&mut out, input, &comparison.current)?;
    writeln!(out)?;
    write_bill(
        &mut out,
        &input.with_year(comparison.historical.tariff.year),
        &comparison.historical,
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Difference: {} ({})",
        signed(comparison.delta),
        comparison
            .delta_percent
            .map(signed_percent)
            .unwrap_or_else(|| "n/a".to_string())
    )?;
    Ok(out)
}

fn write_section<'a>(
    out: &mut String,
    heading: &str,
    findings: impl Iterator<Item = &'a Finding>,
) -> fmt::Result {
    let mut findings = findings.peekable();
    if findings.peek().is_none() {
        return Ok(());
    }
    writeln!(out, "{heading}")?;
    for finding in findings {
        writeln!(out, "  [{}] {}", finding.severity, finding.title)?;
        writeln!(out, "    {}", finding.description)?;
        writeln!(out, "    Action: {}", finding.recommended_action)?;
    }
    Ok(())
}

pub fn check_text(
    input: &BillingInput,
    bill: &BillingResult,
    findings: &[Finding],
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_bill(&mut out, input, bill)?;
    writeln!(out)?;

    let report = DetectionReport::from(findings.to_vec());
    if report.is_clean() {
        writeln!(out, "No issues found.")?;
        return Ok(out);
    }
    write_section(&mut out, "Errors", report.errors())?;
    write_section(&mut out, "Warnings", report.warnings())?;
    write_section(&mut out, "Recommendations", report.recommendations())?;
    Ok(out)
}

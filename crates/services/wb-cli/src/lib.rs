#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! The `water-bill` command: parses raw arguments into validated billing
//! inputs, runs the calculator and the detector, and renders the result.

pub mod cli;
pub mod report;

use anyhow::{Context, Result};
use tracing::debug;
use wb_anomaly::{detect, Observations};
use wb_billing::{compare_years, compute_bill};
use wb_config::{OutputFormat, Settings};
use wb_domain::Money;

use crate::cli::{Cli, Command};
use crate::report::{BillOutput, CheckOutput, CompareOutput};

/// Executes the parsed command and returns what should be printed.
pub fn run(cli: &Cli, settings: &Settings) -> Result<String> {
    let format = cli
        .format
        .map(OutputFormat::from)
        .unwrap_or(settings.output.format);

    match &cli.command {
        Command::Bill { household } => {
            let input = household
                .to_input(&settings.billing)
                .context("invalid household details")?;
            let bill = compute_bill(&input);
            debug!("Computed bill of {} for {:?}", bill.total_price, input);
            match format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&BillOutput {
                    input: &input,
                    bill: &bill,
                })?),
                OutputFormat::Text => Ok(report::bill_text(&input, &bill)?),
            }
        }
        Command::Compare { household, against } => {
            let input = household
                .to_input(&settings.billing)
                .context("invalid household details")?;
            let comparison = compare_years(&input, *against);
            debug!(
                "Compared {} against {}: delta {}",
                input.year(),
                against,
                comparison.delta
            );
            match format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&CompareOutput {
                    input: &input,
                    comparison: &comparison,
                })?),
                OutputFormat::Text => Ok(report::compare_text(&input, &comparison)?),
            }
        }
        Command::Check {
            household,
            actual,
            previous,
            reading,
            basis,
        } => {
            let input = household
                .to_input(&settings.billing)
                .context("invalid household details")?;
            let bill = compute_bill(&input);
            let observations = Observations {
                actual_bill_amount: actual.map(Money::new),
                previous_consumption: *previous,
                current_meter_reading: *reading,
                billing_basis: *basis,
            };
            let findings = detect(&bill, &input, &observations);
            match format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&CheckOutput {
                    input: &input,
                    bill: &bill,
                    findings: &findings,
                })?),
                OutputFormat::Text => Ok(report::check_text(&input, &bill, &findings)?),
            }
        }
    }
}

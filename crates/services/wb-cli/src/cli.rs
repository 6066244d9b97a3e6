use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use wb_config::{BillingDefaults, DEFAULT_CONFIG_DIR, OutputFormat};
use wb_domain::{BillingBasis, BillingInput, BillingPeriod};
use wb_error::Result;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "water-bill", version, about = "Compute a tiered water bill and check it for errors")]
pub struct Cli {
    /// Settings directory
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_DIR)]
    pub config: String,

    /// Output format (defaults to the configured one)
    #[arg(long, global = true, value_enum)]
    pub format: Option<Format>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the bill for one period
    Bill {
        #[command(flatten)]
        household: Household,
    },
    /// Compute the bill under two years' tariffs and show the difference
    Compare {
        #[command(flatten)]
        household: Household,

        /// Year to compare against
        #[arg(long)]
        against: i32,
    },
    /// Compute the bill and look for billing errors
    Check {
        #[command(flatten)]
        household: Household,

        /// Amount on the bill you received, in ILS
        #[arg(long)]
        actual: Option<Decimal>,

        /// Consumption billed in the previous period, in m3
        #[arg(long)]
        previous: Option<Decimal>,

        /// Your own meter reading, in m3
        #[arg(long)]
        reading: Option<Decimal>,

        /// Whether the bill was measured or estimated
        #[arg(long)]
        basis: Option<BillingBasis>,
    },
}

#[derive(Args, Debug)]
pub struct Household {
    /// Consumption for the period, in m3
    #[arg(long, allow_negative_numbers = true)]
    pub consumption: Decimal,

    /// Number of residents
    #[arg(long)]
    pub persons: Option<u32>,

    /// Billing period length in months (1 or 2)
    #[arg(long)]
    pub period: Option<u8>,

    /// Someone in the household receives a disability benefit
    #[arg(long)]
    pub disability: bool,

    /// Tariff year
    #[arg(long)]
    pub year: Option<i32>,
}

impl Household {
    /// Validates the arguments, filling gaps from `defaults`.
    pub fn to_input(&self, defaults: &BillingDefaults) -> Result<BillingInput> {
        let period = match self.period {
            Some(months) => BillingPeriod::try_from(months)?,
            None => defaults.period()?,
        };
        BillingInput::new(
            self.consumption,
            self.persons.unwrap_or(defaults.persons),
            period,
            self.disability,
            self.year.unwrap_or(defaults.year),
        )
    }
}

use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use wb_domain::BillingPeriod;
use wb_error::{Error, Result};

/// Directory settings are read from when none is given.
pub const DEFAULT_CONFIG_DIR: &str = "config";

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Output {
    pub format: OutputFormat,
}

/// Household values assumed when the caller does not supply them.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingDefaults {
    pub persons: u32,
    pub period_months: u8,
    pub year: i32,
}

impl BillingDefaults {
    pub fn period(&self) -> Result<BillingPeriod> {
        BillingPeriod::try_from(self.period_months)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub log: Log,
    pub output: Output,
    pub billing: BillingDefaults,
}

impl Settings {
    /// Loads settings from `dir` using the run mode named by `RUN_MODE`.
    pub fn from_dir(dir: impl Into<Utf8PathBuf>) -> Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load(&dir.into(), &run_mode)
    }

    /// Layers, later winning: built-in defaults, `default`, `<run_mode>`,
    /// `local`, then `WB_`-prefixed environment variables such as
    /// `WB_LOG__LEVEL`. Every file is optional.
    pub fn load(dir: &Utf8Path, run_mode: &str) -> Result<Self> {
        let s = Config::builder()
            .set_default("log.level", "info")
            .and_then(|b| b.set_default("output.format", "text"))
            .and_then(|b| b.set_default("billing.persons", 2_i64))
            .and_then(|b| b.set_default("billing.period_months", 2_i64))
            .and_then(|b| b.set_default("billing.year", i64::from(wb_billing::DEFAULT_YEAR)))
            .map_err(|e| Error::Config(e.to_string()))?
            .add_source(File::with_name(dir.join("default").as_str()).required(false))
            .add_source(File::with_name(dir.join(run_mode).as_str()).required(false))
            .add_source(File::with_name(dir.join("local").as_str()).required(false))
            .add_source(
                Environment::with_prefix("wb")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        s.try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))
    }
}

use clap::Parser;
use wb_cli::cli::Cli;
use wb_cli::run;
use wb_config::{BillingDefaults, Log, Output, OutputFormat, Settings};

fn settings(format: OutputFormat) -> Settings {
    Settings {
        log: Log {
            level: "info".to_string(),
        },
        output: Output { format },
        billing: BillingDefaults {
            persons: 2,
            period_months: 2,
            year: 2026,
        },
    }
}

fn run_args(args: &[&str], format: OutputFormat) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(args).unwrap();
    run(&cli, &settings(format))
}

#[test]
fn test_bill_as_json() {
    let out = run_args(
        &["water-bill", "bill", "--consumption", "20", "--persons", "4"],
        OutputFormat::Json,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["bill"]["allocation"], "28.0");
    assert_eq!(value["bill"]["total_price"], "170.160");
    assert_eq!(value["bill"]["minimum_charge_applied"], false);
    assert_eq!(value["input"]["persons"], 4);
}

#[test]
fn test_format_flag_overrides_settings() {
    let out = run_args(
        &["water-bill", "--format", "text", "bill", "--consumption", "20"],
        OutputFormat::Json,
    )
    .unwrap();
    assert!(out.starts_with("Bill for 20 m3"));
}

#[test]
fn test_compare_as_json_with_zero_history() {
    let out = run_args(
        &[
            "water-bill", "compare", "--consumption", "0", "--period", "1", "--against", "2024",
        ],
        OutputFormat::Json,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(value["comparison"]["delta_percent"].is_null());
    assert_eq!(value["comparison"]["historical"]["tariff"]["year"], 2024);
}

#[test]
fn test_check_reports_overcharge() {
    let out = run_args(
        &[
            "water-bill", "check", "--consumption", "20", "--persons", "4", "--actual", "200",
        ],
        OutputFormat::Json,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let findings = value["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["category"], "overcharge");
    assert_eq!(findings[0]["severity"], "high");
    assert_eq!(findings[0]["figure"], "29.840");
}

#[test]
fn test_check_clean_text() {
    let out = run_args(
        &[
            "water-bill", "check", "--consumption", "20", "--persons", "3", "--disability",
            "--basis", "measured",
        ],
        OutputFormat::Text,
    )
    .unwrap();
    assert!(out.contains("No issues found."));
}

#[test]
fn test_invalid_household_is_an_error() {
    let err = run_args(
        &["water-bill", "bill", "--consumption", "5", "--persons", "0"],
        OutputFormat::Text,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("at least 1 person"));
}

//! End-to-end tests: command line → form coercion → calculator → output.

use std::ffi::OsStr;
use std::path::PathBuf;

use clap::Parser;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tax_cli::{Cli, CliConfig, run};

fn run_args(args: &[&str]) -> String {
    run_with_config(args, &CliConfig::default())
}

fn run_with_config(
    args: &[&str],
    config: &CliConfig,
) -> String {
    let cli = Cli::try_parse_from(std::iter::once("tax-estimator").chain(args.iter().copied()))
        .expect("arguments parse");
    run(&cli, config).expect("command runs")
}

fn json(args: &[&str]) -> Value {
    let mut with_json = args.to_vec();
    with_json.push("--json");
    serde_json::from_str(&run_args(&with_json)).expect("valid JSON")
}

fn decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .expect("decimals serialize as strings")
        .parse()
        .expect("valid decimal")
}

// =============================================================================
// Calculators
// =============================================================================

#[test]
fn self_employment_single_filer_regression() {
    let result = json(&["self-employment", "--net-income", "$100,000", "--state", "TX"]);

    assert_eq!(decimal(&result["federal_tax"]), dec!(17053));
    assert_eq!(
        decimal(&result["self_employment"]["total_se_tax"]),
        dec!(14129.55)
    );
    assert_eq!(decimal(&result["state_tax"]), dec!(0));
}

#[test]
fn creator_deducts_platform_fee() {
    let result = json(&[
        "creator",
        "--platform",
        "onlyfans",
        "--gross",
        "100000",
        "--state",
        "Texas",
    ]);

    assert_eq!(decimal(&result["platform_fee"]), dec!(20000));
    assert_eq!(decimal(&result["net_before_tax"]), dec!(80000));
}

#[test]
fn creator_custom_platform_takes_fee_as_percentage() {
    let result = json(&[
        "creator",
        "--platform",
        "custom",
        "--fee",
        "12.5%",
        "--gross",
        "10000",
        "--state",
        "TX",
    ]);

    assert_eq!(decimal(&result["platform_fee"]), dec!(1250));
}

#[test]
fn s_corp_savings_are_positive() {
    let result = json(&["s-corp", "--net-income", "150000", "--salary", "60000"]);

    assert_eq!(decimal(&result["payroll_tax_savings"]), dec!(12014.33));
    assert_eq!(result["election_worthwhile"], Value::Bool(true));
}

#[test]
fn prize_text_output_shows_withholding_refund() {
    let output = run_args(&[
        "prize",
        "--prize",
        "50,000",
        "--other-income",
        "60,000",
        "--state",
        "TX",
    ]);

    assert!(output.contains("Prize Winnings Tax Estimate"), "{output}");
    assert!(output.contains("$11,189.50"), "{output}");
    assert!(output.contains("Expected federal refund"), "{output}");
    assert!(output.contains("Recommendations"), "{output}");
    assert!(output.contains("Your estimated tax is $11,189.50"), "{output}");
}

#[test]
fn quarterly_lists_due_dates() {
    let output = run_args(&["quarterly", "--se-income", "100000", "--state", "TX"]);

    assert!(output.contains("Apr 15, 2024"), "{output}");
    assert!(output.contains("Jan 15, 2025"), "{output}");
    assert!(output.contains("$6,666.37"), "{output}");
}

#[test]
fn state_rate_override_is_a_percentage() {
    let result = json(&[
        "prize",
        "--prize",
        "10000",
        "--state",
        "CA",
        "--state-rate",
        "5",
    ]);

    assert_eq!(decimal(&result["state_tax"]), dec!(500));
}

// =============================================================================
// Incomplete forms
// =============================================================================

#[test]
fn incomplete_form_shows_placeholder() {
    let output = run_args(&["prize", "--prize", "not a number"]);

    assert_eq!(
        output,
        "Enter the missing details to see your estimate:\n  \
         - enter prize amount greater than zero\n  \
         - select a state\n"
    );
}

#[test]
fn incomplete_form_as_json_lists_missing_fields() {
    let result = json(&["creator", "--platform", "custom", "--gross", "5000"]);

    assert_eq!(
        result,
        serde_json::json!({
            "incomplete": [
                "enter the fee charged by your platform",
                "select a state",
            ]
        })
    );
}

#[test]
fn unknown_state_asks_for_a_listed_state() {
    let result = json(&["prize", "--prize", "10000", "--state", "Califronia"]);

    assert_eq!(
        result,
        serde_json::json!({
            "incomplete": ["select a listed state or enter its tax rate"]
        })
    );
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn config_supplies_state_and_filing_status() {
    let config = CliConfig {
        filing_status: Some("mfj".to_string()),
        state: Some("NY".to_string()),
        ..CliConfig::default()
    };

    let output = run_with_config(&["prize", "--prize", "10000", "--json"], &config);
    let result: Value = serde_json::from_str(&output).unwrap();

    // 10% bracket for joint filers
    assert_eq!(decimal(&result["federal_tax"]), dec!(1000));
    assert_eq!(decimal(&result["state_tax"]), dec!(1090));
}

#[test]
fn tables_dir_replaces_embedded_tables() {
    let tables = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../tax-data/test-data");
    let dir = tables.to_str().expect("utf-8 path");

    let result = json(&[
        "creator",
        "--platform",
        "kofi",
        "--gross",
        "1000",
        "--state",
        "TX",
        "--tables-dir",
        dir,
    ]);

    assert_eq!(decimal(&result["platform_fee"]), dec!(50));
}

#[test]
fn invalid_tables_dir_is_an_error() {
    let invalid = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../tax-data/test-data/invalid");
    let cli = Cli::try_parse_from([
        OsStr::new("tax-estimator"),
        OsStr::new("--tables-dir"),
        invalid.as_os_str(),
        OsStr::new("states"),
    ])
    .unwrap();

    let result = run(&cli, &CliConfig::default());

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("failed to load tax tables"), "got: {message}");
}

// =============================================================================
// Listings
// =============================================================================

#[test]
fn states_lists_every_jurisdiction() {
    let result = json(&["states"]);

    assert_eq!(result.as_array().map(Vec::len), Some(51));
}

#[test]
fn platforms_text_lists_fees() {
    let output = run_args(&["platforms"]);

    assert!(output.contains("OnlyFans"), "{output}");
    assert!(output.contains("20%"), "{output}");
}

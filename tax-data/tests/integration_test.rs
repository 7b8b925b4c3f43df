//! Integration tests for loading table directories and calculating with the
//! loaded tables.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::calculations::FederalIncomeTax;
use tax_core::calculators::PrizeInput;
use tax_core::{FilingStatus, TaxYearConfigError, tax_year_2024};
use tax_data::{LoadSummary, TablesLoader, TablesLoaderError};

fn test_data(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(path)
}

#[test]
fn test_load_all_2025_tables() {
    let (_, summary) = TablesLoader::load_dir(&test_data("")).expect("Failed to load tables");

    assert_eq!(
        summary,
        LoadSummary {
            tax_year: 2025,
            parameters_year: 2024,
            brackets: 28,
            state_rates: 2,
            platforms: 2,
        }
    );
}

#[test]
fn test_2025_brackets_keep_2024_parameters() {
    let (config, summary) = TablesLoader::load_dir(&test_data("")).expect("Failed to load tables");

    assert_eq!(config.tax_year, 2025);
    assert_eq!(summary.parameters_year, 2024);
    assert_eq!(
        config.estimated_payments.due_dates,
        tax_year_2024().estimated_payments.due_dates
    );
    assert_eq!(
        config.self_employment.ss_wage_base,
        tax_year_2024().self_employment.ss_wage_base
    );
}

#[test]
fn test_loaded_single_schedule() {
    let (config, _) = TablesLoader::load_dir(&test_data("")).expect("Failed to load tables");

    let brackets = config.federal.single.brackets();

    assert_eq!(brackets.len(), 7);
    assert_eq!(brackets[0].max_income, Some(dec!(11925)));
    assert_eq!(brackets[0].tax_rate, dec!(0.10));
    assert_eq!(brackets[5].max_income, Some(dec!(626350)));
    assert_eq!(brackets[6].max_income, None);
    assert_eq!(brackets[6].tax_rate, dec!(0.37));
}

#[test]
fn test_loaded_mfs_differs_from_single_at_35_percent() {
    let (config, _) = TablesLoader::load_dir(&test_data("")).expect("Failed to load tables");

    let bracket_35 = config
        .federal
        .married_separately
        .brackets()
        .iter()
        .find(|b| b.tax_rate == dec!(0.35))
        .unwrap();

    assert_eq!(bracket_35.max_income, Some(dec!(375800)));
}

#[test]
fn test_loaded_tables_keep_unlisted_rows() {
    let (config, _) = TablesLoader::load_dir(&test_data("")).expect("Failed to load tables");

    assert_eq!(config.state_rates.rate_for("NC"), Some(dec!(0.0425)));
    assert_eq!(config.state_rates.rate_for("CA"), Some(dec!(0.133)));
    assert_eq!(config.state_rates.rates().len(), 51);
    assert_eq!(
        config.platforms.get("patreon").map(|p| p.fee_percentage),
        Some(dec!(0.10))
    );
    assert_eq!(
        config.platforms.get("onlyfans").map(|p| p.fee_percentage),
        Some(dec!(0.20))
    );
    assert_eq!(config.self_employment, tax_year_2024().self_employment);
}

#[test]
fn test_federal_tax_uses_loaded_brackets() {
    let (config, _) = TablesLoader::load_dir(&test_data("")).expect("Failed to load tables");
    let federal = FederalIncomeTax::new(&config.federal);

    let tax = federal.compute_tax(dec!(100000), FilingStatus::Single);

    // 1,192.50 + 4,386 + 11,335.50
    assert_eq!(tax, dec!(16914.00));
}

#[test]
fn test_calculator_accepts_loaded_config() {
    let (config, _) = TablesLoader::load_dir(&test_data("")).expect("Failed to load tables");
    let input = PrizeInput {
        prize_amount: dec!(10000),
        other_income: dec!(0),
        filing_status: FilingStatus::Single,
        state: Some("IN".to_string()),
        state_rate_override: None,
    };

    let result = input.calculate(&config).expect("complete input");

    assert_eq!(result.state_tax, dec!(300.00));
}

#[test]
fn test_invalid_rate_is_rejected() {
    let result = TablesLoader::load_dir(&test_data("invalid"));

    let err = result.expect_err("Should fail for a rate above 100%");
    let TablesLoaderError::InvalidTables(TaxYearConfigError::StateRates(inner)) = err else {
        panic!("Expected InvalidTables error, got: {:?}", err);
    };
    assert!(
        inner.to_string().contains("CA"),
        "Expected the offending code in error, got: {}",
        inner
    );
}

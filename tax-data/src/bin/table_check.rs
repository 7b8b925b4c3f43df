use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tax_core::FilingStatus;
use tax_data::{FEDERAL_BRACKETS_FILE, PLATFORM_FEES_FILE, STATE_RATES_FILE, TablesLoader};

/// Validate a directory of tax table CSV files.
///
/// The directory may contain any of:
/// - federal_brackets.csv: tax_year,schedule,min_income,max_income,rate
/// - state_rates.csv: code,name,rate
/// - platform_fees.csv: id,name,fee_percentage,description,icon
///
/// Missing files keep the embedded 2024 tables.
#[derive(Parser, Debug)]
#[command(name = "tax-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory containing the table CSV files
    #[arg(short, long)]
    dir: PathBuf,

    /// Print every bracket of every schedule after loading
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking tax tables in: {}", args.dir.display());

    let (config, summary) = TablesLoader::load_dir(&args.dir)
        .with_context(|| format!("Failed to load tables from: {}", args.dir.display()))?;

    println!("Tax year: {}", summary.tax_year);
    if summary.parameters_year != summary.tax_year {
        println!(
            "  SE tax, withholding and estimated payment parameters: {}",
            summary.parameters_year
        );
    }
    println!("  {FEDERAL_BRACKETS_FILE}: {} brackets", summary.brackets);
    println!("  {STATE_RATES_FILE}: {} rows", summary.state_rates);
    println!("  {PLATFORM_FEES_FILE}: {} rows", summary.platforms);

    if args.verbose {
        for status in FilingStatus::all() {
            println!("{}:", status.label());
            let mut floor = Decimal::ZERO;
            for bracket in config.federal.for_status(*status).brackets() {
                match bracket.max_income {
                    Some(max) => {
                        println!("  {floor} - {max}: {}", bracket.tax_rate);
                        floor = max;
                    }
                    None => println!("  {floor}+: {}", bracket.tax_rate),
                }
            }
        }
    }

    println!("All tables are valid.");

    Ok(())
}

use std::borrow::Cow;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tax_core::calculators::IncompleteInput;
use tax_core::{TaxYearConfig, tax_year_2024};
use tax_data::TablesLoader;
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::forms::{CreatorForm, PrizeForm, QuarterlyForm, SCorpForm, SelfEmploymentForm};
use crate::render;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Educational tax estimates for prize winnings, creator income, S-Corp
/// elections, self-employment tax, and quarterly estimated payments.
///
/// Uses the embedded 2024 federal, state, and platform tables unless a
/// tables directory is given.
#[derive(Debug, Parser)]
#[command(name = "tax-estimator", version, about)]
pub struct Cli {
    /// Config file (default: tax-estimator.toml in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of replacement table CSV files
    #[arg(long, global = true)]
    pub tables_dir: Option<PathBuf>,

    /// Log level or filter directive (overrides the config file)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Tax on prize or gambling winnings
    Prize(PrizeForm),
    /// Tax on content-creator platform income
    Creator(CreatorForm),
    /// Compare a sole proprietorship with an S-Corp election
    SCorp(SCorpForm),
    /// Self-employment tax on one income stream
    SelfEmployment(SelfEmploymentForm),
    /// Quarterly estimated tax payments
    Quarterly(QuarterlyForm),
    /// List platforms and their fees
    Platforms,
    /// List state income tax rates
    States,
}

// ─── dispatch ────────────────────────────────────────────────────────────────

/// The tables named by `--tables-dir` or the config file, or the embedded
/// 2024 tables.
pub fn load_tables(
    cli: &Cli,
    config: &CliConfig,
) -> Result<Cow<'static, TaxYearConfig>> {
    match cli.tables_dir.as_ref().or(config.tables_dir.as_ref()) {
        Some(dir) => {
            let (tables, summary) = TablesLoader::load_dir(dir)
                .with_context(|| format!("failed to load tax tables from '{}'", dir.display()))?;
            info!(
                tax_year = summary.tax_year,
                parameters_year = summary.parameters_year,
                brackets = summary.brackets,
                state_rates = summary.state_rates,
                platforms = summary.platforms,
                "loaded tax tables"
            );
            Ok(Cow::Owned(tables))
        }
        None => Ok(Cow::Borrowed(tax_year_2024())),
    }
}

/// Runs the selected command and returns the text to print.
pub fn run(
    cli: &Cli,
    config: &CliConfig,
) -> Result<String> {
    let tables = load_tables(cli, config)?;
    debug!(command = ?cli.command, tax_year = tables.tax_year, "running command");

    match &cli.command {
        Command::Prize(form) => respond(
            form.to_input(config).calculate(&tables),
            cli.json,
            render::prize,
        ),
        Command::Creator(form) => respond(
            form.to_input(config).calculate(&tables),
            cli.json,
            render::creator,
        ),
        Command::SCorp(form) => respond(
            form.to_input(config).calculate(&tables),
            cli.json,
            render::s_corp,
        ),
        Command::SelfEmployment(form) => respond(
            form.to_input(config).calculate(&tables),
            cli.json,
            render::self_employment,
        ),
        Command::Quarterly(form) => respond(
            form.to_input(config).calculate(&tables),
            cli.json,
            render::quarterly,
        ),
        Command::Platforms if cli.json => to_json(tables.platforms.platforms()),
        Command::Platforms => Ok(render::platforms(&tables.platforms)),
        Command::States if cli.json => to_json(tables.state_rates.rates()),
        Command::States => Ok(render::states(&tables.state_rates)),
    }
}

/// Renders a breakdown, or the placeholder when the form is incomplete.
fn respond<T: Serialize>(
    result: Result<T, IncompleteInput>,
    json: bool,
    text: fn(&T) -> String,
) -> Result<String> {
    match result {
        Ok(breakdown) if json => to_json(&breakdown),
        Ok(breakdown) => Ok(text(&breakdown)),
        Err(incomplete) if json => {
            let missing: Vec<String> = incomplete.missing.iter().map(|m| m.to_string()).collect();
            to_json(&json!({ "incomplete": missing }))
        }
        Err(incomplete) => Ok(render::placeholder(&incomplete)),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize result")
}

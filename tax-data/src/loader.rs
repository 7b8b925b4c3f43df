use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tax_core::{
    BracketSchedule, BracketScheduleError, FilingStatus, PlatformConfig, StateRate, TaxBracket,
    TaxYearConfig, TaxYearConfigError, tax_year_2024,
};
use thiserror::Error;
use tracing::{debug, warn};

pub const FEDERAL_BRACKETS_FILE: &str = "federal_brackets.csv";
pub const STATE_RATES_FILE: &str = "state_rates.csv";
pub const PLATFORM_FEES_FILE: &str = "platform_fees.csv";

/// Errors that can occur when loading tax tables.
#[derive(Debug, Error)]
pub enum TablesLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Bracket file mixes tax years {first} and {other}")]
    MixedTaxYears { first: i32, other: i32 },

    #[error("Schedule {schedule}: bracket starting at {min_income} should start at {expected}")]
    BracketGap {
        schedule: String,
        min_income: Decimal,
        expected: Decimal,
    },

    #[error("Schedule {schedule}: {source}")]
    InvalidBrackets {
        schedule: String,
        source: BracketScheduleError,
    },

    #[error("Loaded tables are inconsistent: {0}")]
    InvalidTables(#[from] TaxYearConfigError),

    #[error("Failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl From<csv::Error> for TablesLoaderError {
    fn from(err: csv::Error) -> Self {
        TablesLoaderError::CsvParse(err.to_string())
    }
}

/// Maps IRS schedule codes to filing statuses.
///
/// - Schedule X → Single
/// - Schedule Y-1 → Married Filing Jointly
/// - Schedule Y-2 → Married Filing Separately
/// - Schedule Z → Head of Household
fn schedule_to_filing_status(schedule: &str) -> Result<FilingStatus, TablesLoaderError> {
    match schedule {
        "X" => Ok(FilingStatus::Single),
        "Y-1" => Ok(FilingStatus::MarriedFilingJointly),
        "Y-2" => Ok(FilingStatus::MarriedFilingSeparately),
        "Z" => Ok(FilingStatus::HeadOfHousehold),
        _ => Err(TablesLoaderError::InvalidSchedule(schedule.to_string())),
    }
}

/// A single record from `federal_brackets.csv`.
///
/// - `tax_year`: The tax year (e.g., 2025)
/// - `schedule`: The IRS schedule code (X, Y-1, Y-2, Z)
/// - `min_income`: Lower bound; must equal the previous bracket's `max_income`
/// - `max_income`: Upper bound (empty for unlimited)
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: Decimal,
}

/// A single record from `state_rates.csv`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StateRateRecord {
    pub code: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: Decimal,
}

/// A single record from `platform_fees.csv`. `description` and `icon` may
/// be left empty.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlatformRecord {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub fee_percentage: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<Decimal>().map_err(serde::de::Error::custom)
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// What a directory load replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Year of the federal brackets.
    pub tax_year: i32,
    /// Year of the parameters no CSV file replaces: SE tax, prize
    /// withholding, and estimated payment thresholds and due dates.
    pub parameters_year: i32,
    pub brackets: usize,
    pub state_rates: usize,
    pub platforms: usize,
}

/// Loader for tax tables from CSV files.
///
/// Loaded tables are layered over the embedded 2024 configuration: a
/// bracket schedule present in the file replaces that filing status's
/// schedule, and state and platform rows replace or extend the entries with
/// the same code or id. Everything else keeps its embedded value.
pub struct TablesLoader;

impl TablesLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, TablesLoaderError> {
        parse_records(reader)
    }

    pub fn parse_state_rates<R: Read>(
        reader: R
    ) -> Result<Vec<StateRateRecord>, TablesLoaderError> {
        parse_records(reader)
    }

    pub fn parse_platforms<R: Read>(reader: R) -> Result<Vec<PlatformRecord>, TablesLoaderError> {
        parse_records(reader)
    }

    /// Replaces the schedule of every filing status that appears in
    /// `records` and sets the tax year. Returns the number of brackets
    /// applied.
    ///
    /// Records of one schedule must be listed from the lowest bracket up,
    /// each starting where the previous one ended.
    pub fn apply_brackets(
        config: &mut TaxYearConfig,
        records: &[BracketRecord],
    ) -> Result<usize, TablesLoaderError> {
        let Some(first) = records.first() else {
            return Ok(0);
        };
        if let Some(other) = records.iter().find(|r| r.tax_year != first.tax_year) {
            return Err(TablesLoaderError::MixedTaxYears {
                first: first.tax_year,
                other: other.tax_year,
            });
        }

        // Group by schedule, preserving file order
        let mut groups: Vec<(&str, Vec<&BracketRecord>)> = Vec::new();
        for record in records {
            match groups.iter_mut().find(|(s, _)| *s == record.schedule) {
                Some((_, group)) => group.push(record),
                None => groups.push((record.schedule.as_str(), vec![record])),
            }
        }

        for (schedule, group) in &groups {
            let status = schedule_to_filing_status(schedule)?;

            let mut expected = Decimal::ZERO;
            let mut brackets = Vec::with_capacity(group.len());
            for record in group {
                if record.min_income != expected {
                    return Err(TablesLoaderError::BracketGap {
                        schedule: schedule.to_string(),
                        min_income: record.min_income,
                        expected,
                    });
                }
                brackets.push(TaxBracket {
                    max_income: record.max_income,
                    tax_rate: record.rate,
                });
                expected = record.max_income.unwrap_or(expected);
            }

            let parsed = BracketSchedule::new(brackets).map_err(|source| {
                TablesLoaderError::InvalidBrackets {
                    schedule: schedule.to_string(),
                    source,
                }
            })?;
            *config.federal.for_status_mut(status) = parsed;
            debug!(schedule = %schedule, %status, brackets = group.len(), "replaced bracket schedule");
        }

        if groups.len() < FilingStatus::all().len() {
            warn!(
                tax_year = first.tax_year,
                loaded = groups.len(),
                "bracket file does not cover every filing status; the rest keep embedded 2024 schedules"
            );
        }

        if first.tax_year != config.tax_year {
            warn!(
                tax_year = first.tax_year,
                parameters_year = config.tax_year,
                "brackets are for {} but SE tax, prize withholding and estimated payment \
                 parameters remain {}",
                first.tax_year,
                config.tax_year
            );
        }
        config.tax_year = first.tax_year;
        Ok(records.len())
    }

    /// Inserts or replaces state rates by postal code.
    pub fn apply_state_rates(
        config: &mut TaxYearConfig,
        records: &[StateRateRecord],
    ) -> usize {
        for record in records {
            config.state_rates.upsert(StateRate {
                code: record.code.to_uppercase(),
                name: record.name.clone(),
                rate: record.rate,
            });
        }
        records.len()
    }

    /// Inserts or replaces platforms by id.
    pub fn apply_platforms(
        config: &mut TaxYearConfig,
        records: &[PlatformRecord],
    ) -> usize {
        for record in records {
            config.platforms.upsert(PlatformConfig {
                id: record.id.to_lowercase(),
                name: record.name.clone(),
                fee_percentage: record.fee_percentage,
                description: record.description.clone(),
                icon: record.icon.clone(),
            });
        }
        records.len()
    }

    /// Loads whichever of the three table files exist in `dir` over the
    /// embedded 2024 configuration and validates the result.
    pub fn load_dir(dir: &Path) -> Result<(TaxYearConfig, LoadSummary), TablesLoaderError> {
        let mut config = tax_year_2024().clone();
        let mut summary = LoadSummary {
            parameters_year: config.tax_year,
            ..LoadSummary::default()
        };

        if let Some(file) = open_optional(&dir.join(FEDERAL_BRACKETS_FILE))? {
            let records = Self::parse_brackets(file)?;
            summary.brackets = Self::apply_brackets(&mut config, &records)?;
        }
        if let Some(file) = open_optional(&dir.join(STATE_RATES_FILE))? {
            let records = Self::parse_state_rates(file)?;
            summary.state_rates = Self::apply_state_rates(&mut config, &records);
        }
        if let Some(file) = open_optional(&dir.join(PLATFORM_FEES_FILE))? {
            let records = Self::parse_platforms(file)?;
            summary.platforms = Self::apply_platforms(&mut config, &records);
        }

        config.validate()?;
        summary.tax_year = config.tax_year;
        debug!(dir = %dir.display(), ?summary, "loaded tax tables");
        Ok((config, summary))
    }
}

fn parse_records<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>, TablesLoaderError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: T = result?;
        records.push(record);
    }

    Ok(records)
}

fn open_optional(path: &Path) -> Result<Option<File>, TablesLoaderError> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "table file absent; keeping embedded values");
            Ok(None)
        }
        Err(source) => Err(TablesLoaderError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

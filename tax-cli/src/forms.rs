//! Calculator forms: raw text fields as typed by the user, and their
//! conversion into calculator inputs.
//!
//! Numeric fields accept `$`, thousands separators, and `%`. A field that is
//! empty or not a number is treated as 0, so a half-filled form produces a
//! placeholder listing what is missing rather than an error.

use std::sync::LazyLock;

use clap::Args;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::FilingStatus;
use tax_core::calculators::{
    CreatorInput, PrizeInput, QuarterlyInput, SCorpInput, SelfEmploymentInput,
};
use tracing::warn;

use crate::config::CliConfig;

static NUMERIC_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s$,%]").expect("static pattern is valid"));

/// Strips currency symbols, thousands separators, percent signs, and
/// whitespace.
fn normalize_numeric_input(s: &str) -> String {
    NUMERIC_NOISE.replace_all(s, "").into_owned()
}

/// Parses a money field. Empty input is 0; unparseable input is logged and
/// treated as 0.
pub fn amount(
    field: &str,
    raw: &str,
) -> Decimal {
    let normalized = normalize_numeric_input(raw);
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    normalized.parse().unwrap_or_else(|e| {
        warn!(field, input = %raw, "invalid amount, using 0: {}", e);
        Decimal::ZERO
    })
}

/// Parses an optional percentage field (`"5.5"` or `"5.5%"` is 0.055).
/// Empty input is `None`; unparseable input is logged and treated as empty.
pub fn percent(
    field: &str,
    raw: Option<&str>,
) -> Option<Decimal> {
    let normalized = normalize_numeric_input(raw?);
    if normalized.is_empty() {
        return None;
    }
    match normalized.parse::<Decimal>() {
        Ok(value) => Some(value / dec!(100)),
        Err(e) => {
            warn!(field, input = ?raw, "invalid percentage, ignoring: {}", e);
            None
        }
    }
}

/// The flag value, else the configured default, else Single. An unknown
/// status is logged and treated as Single.
pub fn filing_status(
    raw: Option<&str>,
    config: &CliConfig,
) -> FilingStatus {
    let Some(raw) = raw.or(config.filing_status.as_deref()) else {
        return FilingStatus::default();
    };
    FilingStatus::parse(raw).unwrap_or_else(|| {
        warn!(input = %raw, "unknown filing status, using Single");
        FilingStatus::default()
    })
}

/// The flag value, else the configured default; blank means unselected.
pub fn selection(
    raw: Option<&str>,
    fallback: Option<&str>,
) -> Option<String> {
    raw.or(fallback)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Filing status and state fields shared by most calculators.
#[derive(Debug, Clone, Default, Args)]
pub struct HouseholdFields {
    /// Filing status: S, MFJ, MFS, or HOH
    #[arg(long)]
    pub status: Option<String>,

    /// State postal code or name
    #[arg(long)]
    pub state: Option<String>,

    /// Replace the table state rate, as a percentage
    #[arg(long, value_name = "PERCENT")]
    pub state_rate: Option<String>,
}

impl HouseholdFields {
    fn filing_status(
        &self,
        config: &CliConfig,
    ) -> FilingStatus {
        filing_status(self.status.as_deref(), config)
    }

    fn state(
        &self,
        config: &CliConfig,
    ) -> Option<String> {
        selection(self.state.as_deref(), config.state.as_deref())
    }

    fn state_rate(&self) -> Option<Decimal> {
        percent("state rate", self.state_rate.as_deref())
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct PrizeForm {
    /// Prize or gambling winnings
    #[arg(long, default_value = "")]
    pub prize: String,

    /// Other taxable income for the year
    #[arg(long, default_value = "")]
    pub other_income: String,

    #[command(flatten)]
    pub household: HouseholdFields,
}

impl PrizeForm {
    pub fn to_input(
        &self,
        config: &CliConfig,
    ) -> PrizeInput {
        PrizeInput {
            prize_amount: amount("prize", &self.prize),
            other_income: amount("other income", &self.other_income),
            filing_status: self.household.filing_status(config),
            state: self.household.state(config),
            state_rate_override: self.household.state_rate(),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct CreatorForm {
    /// Platform id (onlyfans, fansly, patreon, youtube, twitch, custom)
    #[arg(long, default_value = "")]
    pub platform: String,

    /// Gross revenue before platform fees
    #[arg(long, default_value = "")]
    pub gross: String,

    /// Platform fee as a percentage; required for the custom platform
    #[arg(long, value_name = "PERCENT")]
    pub fee: Option<String>,

    /// Deductible business expenses
    #[arg(long, default_value = "")]
    pub expenses: String,

    /// W-2 wages from other work
    #[arg(long, default_value = "")]
    pub other_income: String,

    #[command(flatten)]
    pub household: HouseholdFields,
}

impl CreatorForm {
    pub fn to_input(
        &self,
        config: &CliConfig,
    ) -> CreatorInput {
        CreatorInput {
            platform: self.platform.trim().to_lowercase(),
            gross_revenue: amount("gross revenue", &self.gross),
            custom_fee: percent("platform fee", self.fee.as_deref()),
            business_expenses: amount("business expenses", &self.expenses),
            other_income: amount("other income", &self.other_income),
            filing_status: self.household.filing_status(config),
            state: self.household.state(config),
            state_rate_override: self.household.state_rate(),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct SCorpForm {
    /// Net business income before owner pay
    #[arg(long, default_value = "")]
    pub net_income: String,

    /// Reasonable salary paid through payroll
    #[arg(long, default_value = "")]
    pub salary: String,

    /// Annual cost of running the S-Corp (payroll service, filings)
    #[arg(long, default_value = "")]
    pub admin_cost: String,

    /// W-2 wages from other work
    #[arg(long, default_value = "")]
    pub other_income: String,

    /// Filing status: S, MFJ, MFS, or HOH
    #[arg(long)]
    pub status: Option<String>,
}

impl SCorpForm {
    pub fn to_input(
        &self,
        config: &CliConfig,
    ) -> SCorpInput {
        SCorpInput {
            net_business_income: amount("net business income", &self.net_income),
            reasonable_salary: amount("reasonable salary", &self.salary),
            admin_cost: amount("administration cost", &self.admin_cost),
            other_income: amount("other income", &self.other_income),
            filing_status: filing_status(self.status.as_deref(), config),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct SelfEmploymentForm {
    /// Net income from this self-employment activity
    #[arg(long, default_value = "")]
    pub net_income: String,

    /// Net income from other self-employment
    #[arg(long, default_value = "")]
    pub other_se_income: String,

    /// W-2 wages
    #[arg(long, default_value = "")]
    pub w2_income: String,

    #[command(flatten)]
    pub household: HouseholdFields,
}

impl SelfEmploymentForm {
    pub fn to_input(
        &self,
        config: &CliConfig,
    ) -> SelfEmploymentInput {
        SelfEmploymentInput {
            net_se_income: amount("net self-employment income", &self.net_income),
            other_se_income: amount("other self-employment income", &self.other_se_income),
            w2_income: amount("W-2 income", &self.w2_income),
            filing_status: self.household.filing_status(config),
            state: self.household.state(config),
            state_rate_override: self.household.state_rate(),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct QuarterlyForm {
    /// Expected net self-employment income for the year
    #[arg(long, default_value = "")]
    pub se_income: String,

    /// Expected W-2 wages for the year
    #[arg(long, default_value = "")]
    pub w2_income: String,

    /// Federal tax expected to be withheld from wages
    #[arg(long, default_value = "")]
    pub withholding: String,

    /// Total tax on last year's return (leave empty if none)
    #[arg(long, default_value = "")]
    pub prior_year_tax: String,

    /// Adjusted gross income on last year's return
    #[arg(long, default_value = "")]
    pub prior_year_agi: String,

    #[command(flatten)]
    pub household: HouseholdFields,
}

impl QuarterlyForm {
    pub fn to_input(
        &self,
        config: &CliConfig,
    ) -> QuarterlyInput {
        QuarterlyInput {
            expected_se_income: amount("expected self-employment income", &self.se_income),
            expected_w2_income: amount("expected W-2 income", &self.w2_income),
            expected_withholding: amount("expected withholding", &self.withholding),
            prior_year_tax: amount("prior-year tax", &self.prior_year_tax),
            prior_year_agi: amount("prior-year AGI", &self.prior_year_agi),
            filing_status: self.household.filing_status(config),
            state: self.household.state(config),
            state_rate_override: self.household.state_rate(),
        }
    }
}

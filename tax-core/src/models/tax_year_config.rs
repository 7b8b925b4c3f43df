use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::SeTaxConfigError;
use crate::calculations::self_employment::SeTaxConfig;
use crate::{
    BracketScheduleError, FederalSchedules, FilingStatus, PlatformTable, RateTableError,
    StateRateTable,
};

/// A dollar amount that differs by filing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusAmounts {
    pub single: Decimal,
    pub married_jointly: Decimal,
    pub married_separately: Decimal,
    pub head_of_household: Decimal,
}

impl StatusAmounts {
    pub fn for_status(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        match status {
            FilingStatus::Single => self.single,
            FilingStatus::MarriedFilingJointly => self.married_jointly,
            FilingStatus::MarriedFilingSeparately => self.married_separately,
            FilingStatus::HeadOfHousehold => self.head_of_household,
        }
    }
}

/// Safe-harbor and scheduling parameters for Form 1040-ES payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatedPaymentConfig {
    /// Share of the current year's projected tax that satisfies safe harbor.
    pub current_year_factor: Decimal,
    /// Share of last year's tax that satisfies safe harbor.
    pub prior_year_factor: Decimal,
    /// Prior-year factor once prior AGI exceeds the high-income threshold.
    pub high_income_prior_year_factor: Decimal,
    pub high_income_agi_threshold: StatusAmounts,
    /// Balance due below which no estimated payments are required.
    pub required_payment_threshold: Decimal,
    pub due_dates: [NaiveDate; 4],
}

/// Errors raised when a tax year's tables are inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxYearConfigError {
    #[error("federal {status} schedule: {source}")]
    Federal {
        status: FilingStatus,
        source: BracketScheduleError,
    },

    #[error("state rate table: {0}")]
    StateRates(RateTableError),

    #[error("platform table: {0}")]
    Platforms(RateTableError),

    #[error("self-employment parameters: {0}")]
    SelfEmployment(#[from] SeTaxConfigError),

    #[error("prize withholding rate must be in [0, 1), got {0}")]
    InvalidWithholdingRate(Decimal),
}

/// Every table and constant the calculators read for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    pub federal: FederalSchedules,
    pub self_employment: SeTaxConfig,
    pub state_rates: StateRateTable,
    pub platforms: PlatformTable,
    pub estimated_payments: EstimatedPaymentConfig,
    /// Mandatory federal withholding on gambling and prize winnings.
    pub prize_withholding_rate: Decimal,
    /// Prizes above this amount are subject to mandatory withholding.
    pub prize_withholding_threshold: Decimal,
}

impl TaxYearConfig {
    pub fn validate(&self) -> Result<(), TaxYearConfigError> {
        self.federal
            .validate()
            .map_err(|(status, source)| TaxYearConfigError::Federal { status, source })?;
        self.self_employment.validate()?;
        self.state_rates
            .validate()
            .map_err(TaxYearConfigError::StateRates)?;
        self.platforms
            .validate()
            .map_err(TaxYearConfigError::Platforms)?;
        if self.prize_withholding_rate < Decimal::ZERO || self.prize_withholding_rate >= Decimal::ONE
        {
            return Err(TaxYearConfigError::InvalidWithholdingRate(
                self.prize_withholding_rate,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::tax_year_2024;

    #[test]
    fn embedded_2024_config_is_valid() {
        assert_eq!(tax_year_2024().validate(), Ok(()));
    }

    #[test]
    fn validate_reports_invalid_se_parameters() {
        let mut config = tax_year_2024().clone();
        config.self_employment.ss_wage_base = dec!(0);

        let result = config.validate();

        assert_eq!(
            result,
            Err(TaxYearConfigError::SelfEmployment(
                SeTaxConfigError::InvalidSsWageBase(dec!(0))
            ))
        );
    }

    #[test]
    fn validate_reports_invalid_withholding_rate() {
        let mut config = tax_year_2024().clone();
        config.prize_withholding_rate = dec!(1.5);

        let result = config.validate();

        assert_eq!(
            result,
            Err(TaxYearConfigError::InvalidWithholdingRate(dec!(1.5)))
        );
    }

    #[test]
    fn status_amounts_select_by_status() {
        let amounts = StatusAmounts {
            single: dec!(1),
            married_jointly: dec!(2),
            married_separately: dec!(3),
            head_of_household: dec!(4),
        };

        assert_eq!(amounts.for_status(FilingStatus::MarriedFilingSeparately), dec!(3));
        assert_eq!(amounts.for_status(FilingStatus::HeadOfHousehold), dec!(4));
    }
}

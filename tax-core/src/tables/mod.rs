//! Embedded 2024 tax tables.
//!
//! The tables are compile-time constants materialised once into an
//! immutable [`TaxYearConfig`] shared by the whole process.

pub mod federal_2024;
pub mod platforms;
pub mod states;

use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use crate::calculations::self_employment::SeTaxConfig;
use crate::{
    BracketSchedule, EstimatedPaymentConfig, FederalSchedules, PlatformConfig, PlatformTable,
    StateRate, StateRateTable, StatusAmounts, TaxYearConfig,
};

static TAX_YEAR_2024: LazyLock<TaxYearConfig> = LazyLock::new(build_2024);

/// Returns the embedded 2024 configuration.
pub fn tax_year_2024() -> &'static TaxYearConfig {
    &TAX_YEAR_2024
}

fn due_date(
    year: i32,
    month: u32,
    day: u32,
) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("embedded due date is a valid calendar date")
}

fn build_2024() -> TaxYearConfig {
    TaxYearConfig {
        tax_year: 2024,
        federal: FederalSchedules {
            single: BracketSchedule::from_static(&federal_2024::SINGLE),
            married_jointly: BracketSchedule::from_static(&federal_2024::MARRIED_JOINTLY),
            married_separately: BracketSchedule::from_static(&federal_2024::MARRIED_SEPARATELY),
            head_of_household: BracketSchedule::from_static(&federal_2024::HEAD_OF_HOUSEHOLD),
        },
        self_employment: SeTaxConfig {
            ss_wage_base: dec!(168600),
            ss_tax_rate: dec!(0.124),
            medicare_tax_rate: dec!(0.029),
            additional_medicare_rate: dec!(0.009),
            additional_medicare_thresholds: StatusAmounts {
                single: dec!(200000),
                married_jointly: dec!(250000),
                married_separately: dec!(125000),
                head_of_household: dec!(200000),
            },
            net_earnings_factor: dec!(0.9235),
            deduction_factor: dec!(0.50),
        },
        state_rates: StateRateTable::from_static(
            states::STATE_RATES
                .iter()
                .map(|(code, name, rate)| StateRate {
                    code: code.to_string(),
                    name: name.to_string(),
                    rate: *rate,
                })
                .collect(),
        ),
        platforms: PlatformTable::from_static(
            platforms::PLATFORMS
                .iter()
                .map(|(id, name, fee, description, icon)| PlatformConfig {
                    id: id.to_string(),
                    name: name.to_string(),
                    fee_percentage: *fee,
                    description: description.to_string(),
                    icon: icon.to_string(),
                })
                .collect(),
        ),
        estimated_payments: EstimatedPaymentConfig {
            current_year_factor: dec!(0.90),
            prior_year_factor: dec!(1.00),
            high_income_prior_year_factor: dec!(1.10),
            high_income_agi_threshold: StatusAmounts {
                single: dec!(150000),
                married_jointly: dec!(150000),
                married_separately: dec!(75000),
                head_of_household: dec!(150000),
            },
            required_payment_threshold: dec!(1000),
            due_dates: [
                due_date(2024, 4, 15),
                due_date(2024, 6, 17),
                due_date(2024, 9, 16),
                due_date(2025, 1, 15),
            ],
        },
        prize_withholding_rate: dec!(0.24),
        prize_withholding_threshold: dec!(5000),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::FilingStatus;

    #[test]
    fn state_table_covers_fifty_states_and_dc() {
        assert_eq!(tax_year_2024().state_rates.rates().len(), 51);
        assert!(tax_year_2024().state_rates.lookup("DC").is_some());
    }

    #[test]
    fn nine_states_have_no_income_tax() {
        let no_tax: Vec<&str> = tax_year_2024()
            .state_rates
            .rates()
            .iter()
            .filter(|s| !s.has_income_tax())
            .map(|s| s.code.as_str())
            .collect();

        assert_eq!(
            no_tax,
            vec!["AK", "FL", "NV", "NH", "SD", "TN", "TX", "WA", "WY"]
        );
    }

    #[test]
    fn platform_table_has_custom_sentinel_with_zero_fee() {
        let custom = tax_year_2024().platforms.get("custom").unwrap();

        assert!(custom.is_custom());
        assert_eq!(custom.fee_percentage, dec!(0));
        assert_eq!(tax_year_2024().platforms.platforms().len(), 6);
    }

    #[test]
    fn every_schedule_tops_out_at_37_percent() {
        for status in FilingStatus::all() {
            let brackets = tax_year_2024().federal.for_status(*status).brackets();
            let last = brackets.last().unwrap();

            assert_eq!(last.max_income, None);
            assert_eq!(last.tax_rate, dec!(0.37));
        }
    }

    #[test]
    fn due_dates_follow_2024_calendar() {
        let dates = tax_year_2024().estimated_payments.due_dates;

        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
        assert_eq!(dates[3], NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }
}

//! Tax on one self-employment income stream.
//!
//! The stream is treated as the last dollars earned: SE tax is what it adds
//! on top of any other SE income, and federal tax is what it adds on top of
//! W-2 wages plus that other SE income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{effective_rate, round_half_up, round_rate};
use crate::calculations::{
    FederalIncomeTax, RecommendationEngine, SeTaxBreakdown, SelfEmploymentTax, StateIncomeTax,
};
use crate::calculators::{IncompleteInput, Preconditions};
use crate::{FilingStatus, Recommendation, RecommendationInput, TaxYearConfig};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelfEmploymentInput {
    pub net_se_income: Decimal,
    pub other_se_income: Decimal,
    pub w2_income: Decimal,
    pub filing_status: FilingStatus,
    pub state: Option<String>,
    pub state_rate_override: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmploymentBreakdown {
    pub net_se_income: Decimal,
    /// SE tax attributable to this stream.
    pub self_employment: SeTaxBreakdown,
    pub federal_tax: Decimal,
    pub marginal_rate: Decimal,
    pub deductible_se_tax: Decimal,
    pub state_rate: Decimal,
    pub state_tax: Decimal,
    pub total_tax: Decimal,
    pub take_home: Decimal,
    pub effective_rate: Decimal,
    pub recommendations: Vec<Recommendation>,
}

impl SelfEmploymentInput {
    pub fn validate(
        &self,
        config: &TaxYearConfig,
    ) -> Result<(), IncompleteInput> {
        Preconditions::default()
            .positive("net self-employment income", self.net_se_income)
            .non_negative("other self-employment income", self.other_se_income)
            .non_negative("W-2 income", self.w2_income)
            .state(
                &config.state_rates,
                self.state.as_deref(),
                self.state_rate_override,
            )
            .rate("state rate", self.state_rate_override)
            .finish()
    }

    pub fn calculate(
        &self,
        config: &TaxYearConfig,
    ) -> Result<SelfEmploymentBreakdown, IncompleteInput> {
        self.validate(config)?;
        debug!(net_se = %self.net_se_income, status = ?self.filing_status, "calculating SE tax");

        let federal = FederalIncomeTax::new(&config.federal);
        let state = StateIncomeTax::new(&config.state_rates);
        let jurisdiction = self.state.as_deref().unwrap_or_default();

        let se_tax = SelfEmploymentTax::new(&config.self_employment).compute_incremental(
            self.net_se_income,
            self.other_se_income,
            self.w2_income,
            self.filing_status,
        );

        let base_income = self.w2_income + self.other_se_income;
        let federal_tax =
            federal.tax_on_increment(self.net_se_income, base_income, self.filing_status);
        let marginal_rate =
            federal.marginal_rate(base_income + self.net_se_income, self.filing_status);
        let state_rate = state.effective_rate(jurisdiction, self.state_rate_override);
        let state_tax = state.state_tax(self.net_se_income, jurisdiction, self.state_rate_override);

        let total_tax = se_tax.total_se_tax + federal_tax + state_tax;
        let effective = effective_rate(total_tax, self.net_se_income);

        let recommendations =
            RecommendationEngine::new(&config.self_employment).generate(&RecommendationInput {
                filing_status: self.filing_status,
                gross_income: self.net_se_income,
                net_income: self.net_se_income,
                other_income: base_income,
                platform_fees: Decimal::ZERO,
                federal_tax,
                state_tax,
                self_employment_tax: se_tax.total_se_tax,
                total_tax,
                effective_rate: effective,
                marginal_rate,
                state_rate: Some(state_rate),
                is_s_corp: false,
                quarterly_payment: None,
            });

        Ok(SelfEmploymentBreakdown {
            net_se_income: round_half_up(self.net_se_income),
            self_employment: se_tax.rounded(),
            federal_tax: round_half_up(federal_tax),
            marginal_rate,
            deductible_se_tax: round_half_up(se_tax.deductible_se_tax),
            state_rate,
            state_tax: round_half_up(state_tax),
            total_tax: round_half_up(total_tax),
            take_home: round_half_up(self.net_se_income - total_tax),
            effective_rate: round_rate(effective),
            recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculators::MissingField;
    use crate::tax_year_2024;

    fn input() -> SelfEmploymentInput {
        SelfEmploymentInput {
            net_se_income: dec!(100000),
            other_se_income: dec!(0),
            w2_income: dec!(0),
            filing_status: FilingStatus::Single,
            state: Some("TX".to_string()),
            state_rate_override: None,
        }
    }

    #[test]
    fn calculate_single_filer_regression() {
        let result = input().calculate(tax_year_2024()).unwrap();

        assert_eq!(result.federal_tax, dec!(17053.00));
        assert_eq!(result.marginal_rate, dec!(0.22));
        assert_eq!(result.self_employment.total_se_tax, dec!(14129.55));
        assert_eq!(result.deductible_se_tax, dec!(7064.78));
        assert_eq!(result.state_tax, dec!(0));
        assert_eq!(result.total_tax, dec!(31182.55));
        assert_eq!(result.take_home, dec!(68817.45));
        assert_eq!(result.effective_rate, dec!(0.3118));
    }

    #[test]
    fn calculate_stacks_stream_on_other_se_income() {
        let side = SelfEmploymentInput {
            net_se_income: dec!(50000),
            other_se_income: dec!(150000),
            ..input()
        };

        let result = side.calculate(tax_year_2024()).unwrap();

        assert_eq!(result.self_employment.total_se_tax, dec!(5068.38));
        assert_eq!(result.federal_tax, dec!(12644.00));
        assert_eq!(result.marginal_rate, dec!(0.32));
    }

    #[test]
    fn calculate_applies_state_rate_to_stream() {
        let california = SelfEmploymentInput {
            state: Some("California".to_string()),
            ..input()
        };

        let result = california.calculate(tax_year_2024()).unwrap();

        assert_eq!(result.state_rate, dec!(0.133));
        assert_eq!(result.state_tax, dec!(13300.00));
    }

    #[test]
    fn calculate_requires_income_and_state() {
        let empty = SelfEmploymentInput::default();

        let result = empty.calculate(tax_year_2024());

        assert_eq!(
            result.unwrap_err().missing,
            vec![
                MissingField::MustBePositive("net self-employment income"),
                MissingField::NotSelected("state"),
            ]
        );
    }

    #[test]
    fn calculate_rejects_out_of_range_override() {
        let bad = SelfEmploymentInput {
            state_rate_override: Some(dec!(1.5)),
            ..input()
        };

        let result = bad.calculate(tax_year_2024());

        assert_eq!(
            result.unwrap_err().missing,
            vec![MissingField::RateOutOfRange("state rate")]
        );
    }

    #[test]
    fn calculate_recommends_additional_medicare_from_other_se_income() {
        let side = SelfEmploymentInput {
            net_se_income: dec!(50000),
            other_se_income: dec!(200000),
            ..input()
        };

        let result = side.calculate(tax_year_2024()).unwrap();

        assert!(result.self_employment.additional_medicare_tax > dec!(0));
        assert!(
            result
                .recommendations
                .iter()
                .any(|r| r.id == "additional-medicare")
        );
    }

    #[test]
    fn calculate_rejects_unknown_state() {
        let typo = SelfEmploymentInput {
            state: Some("Califronia".to_string()),
            ..input()
        };

        let result = typo.calculate(tax_year_2024());

        assert_eq!(
            result.unwrap_err().missing,
            vec![MissingField::UnknownState]
        );
    }

    #[test]
    fn calculate_taxes_unlisted_state_at_override_rate() {
        let unlisted = SelfEmploymentInput {
            state: Some("Guam".to_string()),
            state_rate_override: Some(dec!(0.05)),
            ..input()
        };

        let result = unlisted.calculate(tax_year_2024()).unwrap();

        assert_eq!(result.state_rate, dec!(0.05));
    }
}

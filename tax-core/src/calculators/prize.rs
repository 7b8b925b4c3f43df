//! Prize and gambling winnings.
//!
//! Federal tax stacks the prize on top of the winner's other income; state
//! tax applies the flat state rate to the prize alone. Prizes above the
//! withholding threshold have mandatory federal withholding, which is shown
//! so the winner can see how much more (or less) is owed at filing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{effective_rate, round_half_up, round_rate};
use crate::calculations::{FederalIncomeTax, RecommendationEngine, StateIncomeTax};
use crate::calculators::{IncompleteInput, Preconditions};
use crate::{FilingStatus, Recommendation, RecommendationInput, TaxYearConfig};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrizeInput {
    pub prize_amount: Decimal,
    pub other_income: Decimal,
    pub filing_status: FilingStatus,
    pub state: Option<String>,
    pub state_rate_override: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeBreakdown {
    pub gross_prize: Decimal,
    pub federal_tax: Decimal,
    /// Bracket rate at other income + prize.
    pub marginal_rate: Decimal,
    pub state_rate: Decimal,
    pub state_tax: Decimal,
    pub federal_withholding: Decimal,
    /// Federal tax minus withholding; negative when withholding exceeds the tax.
    pub federal_balance_due: Decimal,
    pub total_tax: Decimal,
    pub net_prize: Decimal,
    pub effective_rate: Decimal,
    pub recommendations: Vec<Recommendation>,
}

impl PrizeInput {
    pub fn validate(
        &self,
        config: &TaxYearConfig,
    ) -> Result<(), IncompleteInput> {
        Preconditions::default()
            .positive("prize amount", self.prize_amount)
            .non_negative("other income", self.other_income)
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
    ) -> Result<PrizeBreakdown, IncompleteInput> {
        self.validate(config)?;
        debug!(prize = %self.prize_amount, status = ?self.filing_status, "calculating prize tax");

        let federal = FederalIncomeTax::new(&config.federal);
        let state = StateIncomeTax::new(&config.state_rates);
        let jurisdiction = self.state.as_deref().unwrap_or_default();

        let federal_tax =
            federal.tax_on_increment(self.prize_amount, self.other_income, self.filing_status);
        let marginal_rate = federal.marginal_rate(
            self.other_income + self.prize_amount,
            self.filing_status,
        );
        let state_rate = state.effective_rate(jurisdiction, self.state_rate_override);
        let state_tax = state.state_tax(self.prize_amount, jurisdiction, self.state_rate_override);

        let federal_withholding = if self.prize_amount > config.prize_withholding_threshold {
            self.prize_amount * config.prize_withholding_rate
        } else {
            Decimal::ZERO
        };

        let total_tax = federal_tax + state_tax;
        let effective = effective_rate(total_tax, self.prize_amount);

        let recommendations =
            RecommendationEngine::new(&config.self_employment).generate(&RecommendationInput {
                filing_status: self.filing_status,
                gross_income: self.prize_amount,
                net_income: Decimal::ZERO,
                other_income: self.other_income,
                platform_fees: Decimal::ZERO,
                federal_tax,
                state_tax,
                self_employment_tax: Decimal::ZERO,
                total_tax,
                effective_rate: effective,
                marginal_rate,
                state_rate: Some(state_rate),
                is_s_corp: false,
                quarterly_payment: None,
            });

        Ok(PrizeBreakdown {
            gross_prize: round_half_up(self.prize_amount),
            federal_tax: round_half_up(federal_tax),
            marginal_rate,
            state_rate,
            state_tax: round_half_up(state_tax),
            federal_withholding: round_half_up(federal_withholding),
            federal_balance_due: round_half_up(federal_tax - federal_withholding),
            total_tax: round_half_up(total_tax),
            net_prize: round_half_up(self.prize_amount - total_tax),
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

    fn input() -> PrizeInput {
        PrizeInput {
            prize_amount: dec!(50000),
            other_income: dec!(60000),
            filing_status: FilingStatus::Single,
            state: Some("TX".to_string()),
            state_rate_override: None,
        }
    }

    #[test]
    fn calculate_stacks_prize_on_other_income() {
        let result = input().calculate(tax_year_2024()).unwrap();

        // 40,525 at 22% + 9,475 at 24%
        assert_eq!(result.federal_tax, dec!(11189.50));
        assert_eq!(result.marginal_rate, dec!(0.24));
        assert_eq!(result.state_tax, dec!(0));
        assert_eq!(result.total_tax, dec!(11189.50));
        assert_eq!(result.net_prize, dec!(38810.50));
        assert_eq!(result.effective_rate, dec!(0.2238));
    }

    #[test]
    fn calculate_reports_mandatory_withholding_above_threshold() {
        let result = input().calculate(tax_year_2024()).unwrap();

        assert_eq!(result.federal_withholding, dec!(12000.00));
        assert_eq!(result.federal_balance_due, dec!(-810.50));
    }

    #[test]
    fn calculate_skips_withholding_at_threshold() {
        let small = PrizeInput {
            prize_amount: dec!(5000),
            ..input()
        };

        let result = small.calculate(tax_year_2024()).unwrap();

        assert_eq!(result.federal_withholding, dec!(0));
        assert_eq!(result.federal_balance_due, result.federal_tax);
    }

    #[test]
    fn calculate_applies_flat_state_rate_to_prize_only() {
        let california = PrizeInput {
            state: Some("CA".to_string()),
            ..input()
        };

        let result = california.calculate(tax_year_2024()).unwrap();

        assert_eq!(result.state_rate, dec!(0.133));
        assert_eq!(result.state_tax, dec!(6650.00));
    }

    #[test]
    fn calculate_honors_state_override() {
        let overridden = PrizeInput {
            state_rate_override: Some(dec!(0.05)),
            ..input()
        };

        let result = overridden.calculate(tax_year_2024()).unwrap();

        assert_eq!(result.state_tax, dec!(2500.00));
    }

    #[test]
    fn calculate_suppresses_result_without_prize_or_state() {
        let empty = PrizeInput::default();

        let result = empty.calculate(tax_year_2024());

        assert_eq!(
            result,
            Err(IncompleteInput {
                missing: vec![
                    MissingField::MustBePositive("prize amount"),
                    MissingField::NotSelected("state"),
                ],
            })
        );
    }

    #[test]
    fn calculate_rejects_negative_other_income() {
        let negative = PrizeInput {
            other_income: dec!(-1),
            ..input()
        };

        let result = negative.calculate(tax_year_2024());

        assert_eq!(
            result.unwrap_err().missing,
            vec![MissingField::MustNotBeNegative("other income")]
        );
    }

    #[test]
    fn calculate_includes_recommendations() {
        let result = input().calculate(tax_year_2024()).unwrap();

        assert!(result.recommendations.iter().any(|r| r.id == "set-aside"));
        assert!(result.recommendations.len() <= 8);
    }

    #[test]
    fn calculate_rejects_unknown_state() {
        let typo = PrizeInput {
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
        let unlisted = PrizeInput {
            state: Some("Guam".to_string()),
            state_rate_override: Some(dec!(0.05)),
            ..input()
        };

        let result = unlisted.calculate(tax_year_2024()).unwrap();

        assert_eq!(result.state_rate, dec!(0.05));
    }
}

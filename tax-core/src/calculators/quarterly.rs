//! Quarterly estimated tax (Form 1040-ES).
//!
//! Projects the year's federal liability (income tax on SE-adjusted income
//! plus SE tax), applies the safe-harbor rules to find the smallest annual
//! payment that avoids an underpayment penalty, and spreads what
//! withholding does not cover across the four due dates.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{effective_rate, max, round_half_up, round_rate};
use crate::calculations::{
    FederalIncomeTax, RecommendationEngine, SeTaxBreakdown, SelfEmploymentTax, StateIncomeTax,
};
use crate::calculators::{IncompleteInput, Preconditions};
use crate::{
    EstimatedPaymentConfig, FilingStatus, Recommendation, RecommendationInput, TaxYearConfig,
};

const QUARTERS: Decimal = dec!(4);

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuarterlyInput {
    pub expected_se_income: Decimal,
    pub expected_w2_income: Decimal,
    /// Federal tax already withheld from W-2 pay over the year.
    pub expected_withholding: Decimal,
    /// Total tax on last year's return; zero when there was no return.
    pub prior_year_tax: Decimal,
    pub prior_year_agi: Decimal,
    pub filing_status: FilingStatus,
    pub state: Option<String>,
    pub state_rate_override: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyPayment {
    pub quarter: u8,
    pub due_date: NaiveDate,
    pub federal: Decimal,
    pub state: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyBreakdown {
    pub self_employment: SeTaxBreakdown,
    /// W-2 + SE income − deductible SE tax.
    pub adjusted_income: Decimal,
    pub federal_income_tax: Decimal,
    /// Federal income tax + SE tax.
    pub federal_total: Decimal,
    pub state_rate: Decimal,
    pub state_tax: Decimal,
    pub total_projected_tax: Decimal,
    pub current_year_safe_harbor: Decimal,
    /// `None` when there is no prior-year return.
    pub prior_year_safe_harbor: Option<Decimal>,
    pub required_annual_payment: Decimal,
    pub expected_withholding: Decimal,
    pub remaining_after_withholding: Decimal,
    pub payments_required: bool,
    pub quarterly_federal: Decimal,
    pub quarterly_state: Decimal,
    pub payments: Vec<QuarterlyPayment>,
    pub effective_rate: Decimal,
    pub recommendations: Vec<Recommendation>,
}

impl QuarterlyInput {
    pub fn validate(
        &self,
        config: &TaxYearConfig,
    ) -> Result<(), IncompleteInput> {
        Preconditions::default()
            .positive("expected self-employment income", self.expected_se_income)
            .non_negative("expected W-2 income", self.expected_w2_income)
            .non_negative("expected withholding", self.expected_withholding)
            .non_negative("prior-year tax", self.prior_year_tax)
            .non_negative("prior-year AGI", self.prior_year_agi)
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
    ) -> Result<QuarterlyBreakdown, IncompleteInput> {
        self.validate(config)?;
        debug!(
            se_income = %self.expected_se_income,
            w2_income = %self.expected_w2_income,
            "calculating quarterly estimates"
        );

        let federal = FederalIncomeTax::new(&config.federal);
        let state = StateIncomeTax::new(&config.state_rates);
        let jurisdiction = self.state.as_deref().unwrap_or_default();
        let schedule = &config.estimated_payments;

        let se_tax = SelfEmploymentTax::new(&config.self_employment).compute(
            self.expected_se_income,
            Decimal::ZERO,
            self.expected_w2_income,
            self.filing_status,
        );

        let gross_income = self.expected_w2_income + self.expected_se_income;
        let adjusted_income = max(gross_income - se_tax.deductible_se_tax, Decimal::ZERO);
        let federal_income_tax = federal.compute_tax(adjusted_income, self.filing_status);
        let federal_total = federal_income_tax + se_tax.total_se_tax;

        let state_rate = state.effective_rate(jurisdiction, self.state_rate_override);
        let state_tax = state.state_tax(gross_income, jurisdiction, self.state_rate_override);
        let total_projected_tax = federal_total + state_tax;

        let current_year_safe_harbor = federal_total * schedule.current_year_factor;
        let prior_year_safe_harbor = self.prior_year_safe_harbor(schedule);
        let required_annual_payment = match prior_year_safe_harbor {
            Some(prior) => current_year_safe_harbor.min(prior),
            None => current_year_safe_harbor,
        };
        let remaining = max(
            required_annual_payment - self.expected_withholding,
            Decimal::ZERO,
        );
        let payments_required = remaining >= schedule.required_payment_threshold;

        let quarterly_federal = round_half_up(remaining / QUARTERS);
        let quarterly_state = round_half_up(state_tax / QUARTERS);
        let payments = schedule
            .due_dates
            .iter()
            .zip(1u8..)
            .map(|(due_date, quarter)| QuarterlyPayment {
                quarter,
                due_date: *due_date,
                federal: quarterly_federal,
                state: quarterly_state,
            })
            .collect();

        let effective = effective_rate(total_projected_tax, gross_income);
        let recommendations =
            RecommendationEngine::new(&config.self_employment).generate(&RecommendationInput {
                filing_status: self.filing_status,
                gross_income,
                net_income: self.expected_se_income,
                other_income: self.expected_w2_income,
                platform_fees: Decimal::ZERO,
                federal_tax: federal_income_tax,
                state_tax,
                self_employment_tax: se_tax.total_se_tax,
                total_tax: total_projected_tax,
                effective_rate: effective,
                marginal_rate: federal.marginal_rate(adjusted_income, self.filing_status),
                state_rate: Some(state_rate),
                is_s_corp: false,
                quarterly_payment: Some(quarterly_federal + quarterly_state),
            });

        Ok(QuarterlyBreakdown {
            self_employment: se_tax.rounded(),
            adjusted_income: round_half_up(adjusted_income),
            federal_income_tax: round_half_up(federal_income_tax),
            federal_total: round_half_up(federal_total),
            state_rate,
            state_tax: round_half_up(state_tax),
            total_projected_tax: round_half_up(total_projected_tax),
            current_year_safe_harbor: round_half_up(current_year_safe_harbor),
            prior_year_safe_harbor: prior_year_safe_harbor.map(round_half_up),
            required_annual_payment: round_half_up(required_annual_payment),
            expected_withholding: round_half_up(self.expected_withholding),
            remaining_after_withholding: round_half_up(remaining),
            payments_required,
            quarterly_federal,
            quarterly_state,
            payments,
            effective_rate: round_rate(effective),
            recommendations,
        })
    }

    fn prior_year_safe_harbor(
        &self,
        schedule: &EstimatedPaymentConfig,
    ) -> Option<Decimal> {
        if self.prior_year_tax.is_zero() {
            return None;
        }
        let threshold = schedule
            .high_income_agi_threshold
            .for_status(self.filing_status);
        let factor = if self.prior_year_agi > threshold {
            schedule.high_income_prior_year_factor
        } else {
            schedule.prior_year_factor
        };
        Some(self.prior_year_tax * factor)
    }
}

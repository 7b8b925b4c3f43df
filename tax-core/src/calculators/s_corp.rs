//! Sole proprietorship versus S-Corp election.
//!
//! A sole proprietor owes SE tax on all net business income. An S-Corp
//! owner pays payroll FICA only on a reasonable salary; the rest leaves
//! the business as distributions that carry no payroll tax. Income tax is
//! the same either way, so the comparison is payroll tax against the cost
//! of running the S-Corp.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{effective_rate, max, round_half_up, round_rate};
use crate::calculations::{FederalIncomeTax, RecommendationEngine, SelfEmploymentTax};
use crate::calculators::{IncompleteInput, MissingField, Preconditions};
use crate::{FilingStatus, Recommendation, RecommendationInput, TaxYearConfig};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SCorpInput {
    pub net_business_income: Decimal,
    pub reasonable_salary: Decimal,
    /// Annual payroll, bookkeeping, and filing cost of the S-Corp.
    pub admin_cost: Decimal,
    pub other_income: Decimal,
    pub filing_status: FilingStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SCorpBreakdown {
    pub net_business_income: Decimal,
    pub sole_prop_se_tax: Decimal,
    pub reasonable_salary: Decimal,
    pub payroll_social_security: Decimal,
    pub payroll_medicare: Decimal,
    pub payroll_fica: Decimal,
    pub distributions: Decimal,
    pub federal_tax_on_salary: Decimal,
    pub federal_tax_on_distributions: Decimal,
    pub payroll_tax_savings: Decimal,
    pub admin_cost: Decimal,
    /// Payroll tax savings minus administration cost; may be negative.
    pub net_savings: Decimal,
    pub election_worthwhile: bool,
    pub recommendations: Vec<Recommendation>,
}

impl SCorpInput {
    pub fn validate(&self) -> Result<(), IncompleteInput> {
        Preconditions::default()
            .positive("net business income", self.net_business_income)
            .positive("reasonable salary", self.reasonable_salary)
            .require(
                self.reasonable_salary <= self.net_business_income,
                MissingField::SalaryExceedsIncome,
            )
            .non_negative("administration cost", self.admin_cost)
            .non_negative("other income", self.other_income)
            .finish()
    }

    pub fn calculate(
        &self,
        config: &TaxYearConfig,
    ) -> Result<SCorpBreakdown, IncompleteInput> {
        self.validate()?;
        debug!(
            net = %self.net_business_income,
            salary = %self.reasonable_salary,
            "comparing S-Corp election"
        );

        let se = &config.self_employment;
        let federal = FederalIncomeTax::new(&config.federal);

        let sole_prop = SelfEmploymentTax::new(se).compute(
            self.net_business_income,
            Decimal::ZERO,
            self.other_income,
            self.filing_status,
        );

        let remaining_wage_base = max(se.ss_wage_base - self.other_income, Decimal::ZERO);
        let payroll_social_security =
            self.reasonable_salary.min(remaining_wage_base) * se.ss_tax_rate;
        let payroll_medicare = self.reasonable_salary * se.medicare_tax_rate;
        let payroll_fica = payroll_social_security + payroll_medicare;

        let distributions = self.net_business_income - self.reasonable_salary;
        let federal_tax_on_salary = federal.tax_on_increment(
            self.reasonable_salary,
            self.other_income,
            self.filing_status,
        );
        let federal_tax_on_distributions = federal.tax_on_increment(
            distributions,
            self.other_income + self.reasonable_salary,
            self.filing_status,
        );

        let payroll_tax_savings = sole_prop.total_se_tax - payroll_fica;
        let net_savings = payroll_tax_savings - self.admin_cost;

        let federal_tax = federal_tax_on_salary + federal_tax_on_distributions;
        let total_tax = federal_tax + payroll_fica;
        let recommendations = RecommendationEngine::new(se).generate(&RecommendationInput {
            filing_status: self.filing_status,
            gross_income: self.net_business_income,
            net_income: self.net_business_income,
            other_income: self.other_income,
            platform_fees: Decimal::ZERO,
            federal_tax,
            state_tax: Decimal::ZERO,
            self_employment_tax: payroll_fica,
            total_tax,
            effective_rate: round_rate(effective_rate(total_tax, self.net_business_income)),
            marginal_rate: federal.marginal_rate(
                self.other_income + self.net_business_income,
                self.filing_status,
            ),
            state_rate: None,
            is_s_corp: true,
            quarterly_payment: None,
        });

        Ok(SCorpBreakdown {
            net_business_income: round_half_up(self.net_business_income),
            sole_prop_se_tax: round_half_up(sole_prop.total_se_tax),
            reasonable_salary: round_half_up(self.reasonable_salary),
            payroll_social_security: round_half_up(payroll_social_security),
            payroll_medicare: round_half_up(payroll_medicare),
            payroll_fica: round_half_up(payroll_fica),
            distributions: round_half_up(distributions),
            federal_tax_on_salary: round_half_up(federal_tax_on_salary),
            federal_tax_on_distributions: round_half_up(federal_tax_on_distributions),
            payroll_tax_savings: round_half_up(payroll_tax_savings),
            admin_cost: round_half_up(self.admin_cost),
            net_savings: round_half_up(net_savings),
            election_worthwhile: net_savings > Decimal::ZERO,
            recommendations,
        })
    }
}

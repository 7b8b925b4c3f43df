//! Content-creator income: platform fees, business expenses, then SE,
//! federal, and state tax on what remains.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{effective_rate, max, round_half_up, round_rate};
use crate::calculations::{
    FederalIncomeTax, PlatformFees, RecommendationEngine, SeTaxBreakdown, SelfEmploymentTax,
    StateIncomeTax,
};
use crate::calculators::{IncompleteInput, MissingField, Preconditions};
use crate::{FilingStatus, Recommendation, RecommendationInput, TaxYearConfig};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreatorInput {
    pub platform: String,
    pub gross_revenue: Decimal,
    /// Fee charged by the platform; required for the custom platform and
    /// overrides the table fee otherwise.
    pub custom_fee: Option<Decimal>,
    pub business_expenses: Decimal,
    /// W-2 wages from other work.
    pub other_income: Decimal,
    pub filing_status: FilingStatus,
    pub state: Option<String>,
    pub state_rate_override: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorBreakdown {
    pub platform_name: String,
    pub fee_percentage: Decimal,
    pub gross_revenue: Decimal,
    pub platform_fee: Decimal,
    pub net_before_tax: Decimal,
    pub business_expenses: Decimal,
    pub net_profit: Decimal,
    pub self_employment: SeTaxBreakdown,
    pub federal_tax: Decimal,
    pub marginal_rate: Decimal,
    pub state_rate: Decimal,
    pub state_tax: Decimal,
    pub total_tax: Decimal,
    pub take_home: Decimal,
    pub effective_rate: Decimal,
    pub recommendations: Vec<Recommendation>,
}

impl CreatorInput {
    pub fn validate(
        &self,
        config: &TaxYearConfig,
    ) -> Result<(), IncompleteInput> {
        let platform = config.platforms.get(&self.platform);
        let needs_fee = platform.is_some_and(|p| p.is_custom());

        Preconditions::default()
            .require(
                platform.is_some(),
                MissingField::NotSelected("platform"),
            )
            .positive("gross revenue", self.gross_revenue)
            .non_negative("business expenses", self.business_expenses)
            .non_negative("other income", self.other_income)
            .require(
                !needs_fee || self.custom_fee.is_some(),
                MissingField::CustomFeeRequired,
            )
            .rate("platform fee", self.custom_fee)
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
    ) -> Result<CreatorBreakdown, IncompleteInput> {
        self.validate(config)?;
        debug!(platform = %self.platform, gross = %self.gross_revenue, "calculating creator tax");

        let fees = PlatformFees::new(&config.platforms);
        let federal = FederalIncomeTax::new(&config.federal);
        let state = StateIncomeTax::new(&config.state_rates);
        let jurisdiction = self.state.as_deref().unwrap_or_default();

        let platform_name = config
            .platforms
            .get(&self.platform)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| self.platform.clone());
        let fee_percentage = fees.fee_percentage(&self.platform, self.custom_fee);
        let platform_fee = fees.platform_fee(self.gross_revenue, &self.platform, self.custom_fee);
        let net_before_tax = self.gross_revenue - platform_fee;
        let net_profit = max(net_before_tax - self.business_expenses, Decimal::ZERO);

        let se_tax = SelfEmploymentTax::new(&config.self_employment).compute(
            net_profit,
            Decimal::ZERO,
            self.other_income,
            self.filing_status,
        );
        let federal_tax =
            federal.tax_on_increment(net_profit, self.other_income, self.filing_status);
        let marginal_rate =
            federal.marginal_rate(self.other_income + net_profit, self.filing_status);
        let state_rate = state.effective_rate(jurisdiction, self.state_rate_override);
        let state_tax = state.state_tax(net_profit, jurisdiction, self.state_rate_override);

        let total_tax = se_tax.total_se_tax + federal_tax + state_tax;
        let effective = effective_rate(total_tax, self.gross_revenue);

        let recommendations =
            RecommendationEngine::new(&config.self_employment).generate(&RecommendationInput {
                filing_status: self.filing_status,
                gross_income: self.gross_revenue,
                net_income: net_profit,
                other_income: self.other_income,
                platform_fees: platform_fee,
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

        Ok(CreatorBreakdown {
            platform_name,
            fee_percentage,
            gross_revenue: round_half_up(self.gross_revenue),
            platform_fee: round_half_up(platform_fee),
            net_before_tax: round_half_up(net_before_tax),
            business_expenses: round_half_up(self.business_expenses),
            net_profit: round_half_up(net_profit),
            self_employment: se_tax.rounded(),
            federal_tax: round_half_up(federal_tax),
            marginal_rate,
            state_rate,
            state_tax: round_half_up(state_tax),
            total_tax: round_half_up(total_tax),
            take_home: round_half_up(net_profit - total_tax),
            effective_rate: round_rate(effective),
            recommendations,
        })
    }
}

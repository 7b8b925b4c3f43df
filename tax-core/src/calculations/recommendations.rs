//! Rule-based educational recommendations.
//!
//! Each rule is a plain function that inspects a [`RecommendationInput`]
//! and either produces a [`Recommendation`] or declines. Every rule runs on
//! every call; the results are stably sorted by priority and capped at
//! [`MAX_RECOMMENDATIONS`]. Adding a rule means writing one more function
//! and appending it to [`RULES`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::common::format_money;
use crate::calculations::self_employment::SeTaxConfig;
use crate::{Impact, Recommendation, RecommendationCategory, RecommendationInput};

pub const MAX_RECOMMENDATIONS: usize = 8;

/// A rule sees the calculation snapshot and the year's SE parameters.
pub type Rule = fn(&RecommendationInput, &SeTaxConfig) -> Option<Recommendation>;

/// Evaluated in this order; equal priorities keep this order after sorting.
pub const RULES: &[Rule] = &[
    set_aside,
    quarterly_payments,
    professional_review,
    s_corp_election,
    retirement_plan,
    track_platform_fees,
    income_timing,
    additional_medicare,
    wage_base_reached,
    high_state_tax,
    modest_income_deductions,
    no_income_tax_state,
    health_insurance,
    recordkeeping,
];

#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine<'a> {
    se_config: &'a SeTaxConfig,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(se_config: &'a SeTaxConfig) -> Self {
        Self { se_config }
    }

    /// Runs every rule and returns at most [`MAX_RECOMMENDATIONS`] results
    /// ordered by ascending priority.
    pub fn generate(
        &self,
        input: &RecommendationInput,
    ) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = RULES
            .iter()
            .filter_map(|rule| rule(input, self.se_config))
            .collect();

        debug!(matched = recommendations.len(), "recommendation rules evaluated");

        // sort_by_key is stable
        recommendations.sort_by_key(|r| r.priority);
        recommendations.truncate(MAX_RECOMMENDATIONS);
        recommendations
    }
}

fn recommendation(
    id: &str,
    title: &str,
    explanation: String,
    impact: Impact,
    category: RecommendationCategory,
    priority: u8,
) -> Option<Recommendation> {
    Some(Recommendation {
        id: id.to_string(),
        title: title.to_string(),
        explanation,
        impact,
        category,
        priority,
    })
}

fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * dec!(100)).round_dp(1).normalize())
}

fn set_aside(
    input: &RecommendationInput,
    _: &SeTaxConfig,
) -> Option<Recommendation> {
    if input.total_tax <= Decimal::ZERO {
        return None;
    }
    let share = (input.effective_rate * dec!(100)).ceil().normalize();
    recommendation(
        "set-aside",
        "Set aside money for taxes as you earn it",
        format!(
            "Your estimated tax is {} this year. Moving about {}% of every payment into a \
             separate account keeps the bill from arriving as a surprise.",
            format_money(input.total_tax),
            share
        ),
        Impact::High,
        RecommendationCategory::Immediate,
        1,
    )
}

fn quarterly_payments(
    input: &RecommendationInput,
    _: &SeTaxConfig,
) -> Option<Recommendation> {
    if input.total_tax < dec!(1000) || input.quarterly_payment.is_some() {
        return None;
    }
    recommendation(
        "quarterly-payments",
        "Make quarterly estimated payments",
        format!(
            "With {} in expected tax, the IRS expects payments during the year. Paying about \
             {} each quarter helps avoid underpayment penalties.",
            format_money(input.total_tax),
            format_money(input.total_tax / dec!(4))
        ),
        Impact::High,
        RecommendationCategory::Immediate,
        2,
    )
}

fn professional_review(
    input: &RecommendationInput,
    _: &SeTaxConfig,
) -> Option<Recommendation> {
    if input.effective_rate < dec!(0.30) {
        return None;
    }
    recommendation(
        "professional-review",
        "Have a professional review your tax plan",
        format!(
            "An effective rate of {} is high enough that entity choice, deductions, and \
             timing can change the outcome by thousands of dollars.",
            percent(input.effective_rate)
        ),
        Impact::High,
        RecommendationCategory::Planning,
        3,
    )
}

fn s_corp_election(
    input: &RecommendationInput,
    _: &SeTaxConfig,
) -> Option<Recommendation> {
    if input.is_s_corp || input.net_income < dec!(80000) {
        return None;
    }
    recommendation(
        "s-corp-election",
        "Evaluate an S-Corp election",
        format!(
            "At {} of net income, paying yourself a reasonable salary through an S-Corp and \
             taking the rest as distributions can reduce self-employment tax.",
            format_money(input.net_income)
        ),
        Impact::High,
        RecommendationCategory::Planning,
        3,
    )
}

fn retirement_plan(
    input: &RecommendationInput,
    _: &SeTaxConfig,
) -> Option<Recommendation> {
    if input.net_income < dec!(50000) {
        return None;
    }
    recommendation(
        "retirement-plan",
        "Open a Solo 401(k) or SEP-IRA",
        format!(
            "Contributions reduce taxable income at your {} marginal rate while building \
             retirement savings.",
            percent(input.marginal_rate)
        ),
        Impact::High,
        RecommendationCategory::LongTerm,
        4,
    )
}

fn track_platform_fees(
    input: &RecommendationInput,
    _: &SeTaxConfig,
) -> Option<Recommendation> {
    if input.platform_fees <= Decimal::ZERO {
        return None;
    }
    recommendation(
        "track-platform-fees",
        "Keep records of platform fees",
        format!(
            "Platforms kept {} of your revenue. Make sure the income you report matches what \
             the platform reports, with fees accounted for.",
            format_money(input.platform_fees)
        ),
        Impact::Medium,
        RecommendationCategory::Immediate,
        5,
    )
}

fn income_timing(
    input: &RecommendationInput,
    _: &SeTaxConfig,
) -> Option<Recommendation> {
    if input.marginal_rate < dec!(0.32) {
        return None;
    }
    recommendation(
        "income-timing",
        "Time income and deductions",
        format!(
            "Your top dollars are taxed at {}. Accelerating deductions or deferring income \
             into a lower-income year can reduce the total.",
            percent(input.marginal_rate)
        ),
        Impact::Medium,
        RecommendationCategory::Planning,
        5,
    )
}

fn additional_medicare(
    input: &RecommendationInput,
    config: &SeTaxConfig,
) -> Option<Recommendation> {
    let threshold = config
        .additional_medicare_thresholds
        .for_status(input.filing_status);
    if input.net_income + input.other_income <= threshold {
        return None;
    }
    recommendation(
        "additional-medicare",
        "Plan for the Additional Medicare Tax",
        format!(
            "Combined earnings above {} for your filing status owe an extra 0.9% Medicare \
             tax, and that portion is not deductible.",
            format_money(threshold)
        ),
        Impact::Medium,
        RecommendationCategory::Planning,
        6,
    )
}

fn wage_base_reached(
    input: &RecommendationInput,
    config: &SeTaxConfig,
) -> Option<Recommendation> {
    if input.other_income < config.ss_wage_base {
        return None;
    }
    recommendation(
        "wage-base-reached",
        "Your wages already max out Social Security",
        format!(
            "W-2 wages of {} reach the {} wage base, so side income owes only the Medicare \
             part of self-employment tax.",
            format_money(input.other_income),
            format_money(config.ss_wage_base)
        ),
        Impact::Medium,
        RecommendationCategory::Planning,
        6,
    )
}

fn high_state_tax(
    input: &RecommendationInput,
    _: &SeTaxConfig,
) -> Option<Recommendation> {
    let rate = input.state_rate?;
    if rate < dec!(0.09) {
        return None;
    }
    recommendation(
        "high-state-tax",
        "Account for high state income tax",
        format!(
            "Your state's top rate of {} adds significantly to the bill. Ask about state \
             pass-through entity elections and residency planning.",
            percent(rate)
        ),
        Impact::Medium,
        RecommendationCategory::LongTerm,
        7,
    )
}

fn modest_income_deductions(
    input: &RecommendationInput,
    _: &SeTaxConfig,
) -> Option<Recommendation> {
    if input.net_income <= Decimal::ZERO || input.net_income >= dec!(40000) {
        return None;
    }
    recommendation(
        "modest-income-deductions",
        "Capture every business deduction",
        "At this income level each deductible expense (equipment, software, a home office, \
         mileage) reduces both income tax and self-employment tax."
            .to_string(),
        Impact::Foundational,
        RecommendationCategory::Immediate,
        8,
    )
}

fn no_income_tax_state(
    input: &RecommendationInput,
    _: &SeTaxConfig,
) -> Option<Recommendation> {
    if input.state_rate != Some(Decimal::ZERO) {
        return None;
    }
    recommendation(
        "no-income-tax-state",
        "Keep proof of residency",
        "Your state has no income tax. Keep records that document residency in case \
         another state claims you."
            .to_string(),
        Impact::Foundational,
        RecommendationCategory::LongTerm,
        9,
    )
}

fn health_insurance(
    input: &RecommendationInput,
    _: &SeTaxConfig,
) -> Option<Recommendation> {
    if input.net_income <= Decimal::ZERO {
        return None;
    }
    recommendation(
        "health-insurance",
        "Deduct self-employed health insurance",
        "Premiums you pay for yourself and your family can be deducted when you are not \
         eligible for an employer plan."
            .to_string(),
        Impact::Foundational,
        RecommendationCategory::LongTerm,
        10,
    )
}

fn recordkeeping(
    input: &RecommendationInput,
    _: &SeTaxConfig,
) -> Option<Recommendation> {
    if input.gross_income <= Decimal::ZERO {
        return None;
    }
    recommendation(
        "recordkeeping",
        "Keep organized records",
        "Save receipts, 1099s, and bank statements throughout the year. Good records make \
         deductions defensible and filing faster."
            .to_string(),
        Impact::Foundational,
        RecommendationCategory::Immediate,
        11,
    )
}

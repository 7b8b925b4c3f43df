//! Plain-text rendering of calculator results.

use std::fmt::Write;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::calculations::common::format_money as money;
use tax_core::calculators::{
    CreatorBreakdown, IncompleteInput, PrizeBreakdown, QuarterlyBreakdown, SCorpBreakdown,
    SelfEmploymentBreakdown,
};
use tax_core::{PlatformTable, Recommendation, StateRateTable};

const LABEL_WIDTH: usize = 34;

/// `22.38%`
pub fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * dec!(100)).round_dp(2).normalize())
}

fn row(
    out: &mut String,
    label: &str,
    value: impl std::fmt::Display,
) {
    let _ = writeln!(out, "  {label:<LABEL_WIDTH$}{value:>14}");
}

fn heading(
    out: &mut String,
    title: &str,
) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.len()));
}

fn recommendations(
    out: &mut String,
    recommendations: &[Recommendation],
) {
    if recommendations.is_empty() {
        return;
    }
    let _ = writeln!(out);
    heading(out, "Recommendations");
    for (number, r) in recommendations.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} [{} impact, {}]",
            number + 1,
            r.title,
            r.impact,
            r.category
        );
        let _ = writeln!(out, "   {}", r.explanation);
    }
}

/// Shown instead of a result when the form is incomplete.
pub fn placeholder(incomplete: &IncompleteInput) -> String {
    let mut out = String::from("Enter the missing details to see your estimate:\n");
    for missing in &incomplete.missing {
        let _ = writeln!(out, "  - {missing}");
    }
    out
}

pub fn prize(result: &PrizeBreakdown) -> String {
    let mut out = String::new();
    heading(&mut out, "Prize Winnings Tax Estimate");
    row(&mut out, "Gross prize", money(result.gross_prize));
    row(&mut out, "Federal income tax", money(result.federal_tax));
    row(&mut out, "Marginal federal rate", percent(result.marginal_rate));
    row(
        &mut out,
        &format!("State tax ({})", percent(result.state_rate)),
        money(result.state_tax),
    );
    row(&mut out, "Total tax", money(result.total_tax));
    row(&mut out, "Net prize", money(result.net_prize));
    row(&mut out, "Effective rate", percent(result.effective_rate));
    if !result.federal_withholding.is_zero() {
        let _ = writeln!(out);
        row(&mut out, "Mandatory federal withholding", money(result.federal_withholding));
        let label = if result.federal_balance_due.is_sign_negative() {
            "Expected federal refund"
        } else {
            "Federal tax due at filing"
        };
        row(&mut out, label, money(result.federal_balance_due.abs()));
    }
    recommendations(&mut out, &result.recommendations);
    out
}

pub fn creator(result: &CreatorBreakdown) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("{} Creator Tax Estimate", result.platform_name));
    row(&mut out, "Gross revenue", money(result.gross_revenue));
    row(
        &mut out,
        &format!("Platform fee ({})", percent(result.fee_percentage)),
        money(result.platform_fee),
    );
    row(&mut out, "Net before tax", money(result.net_before_tax));
    row(&mut out, "Business expenses", money(result.business_expenses));
    row(&mut out, "Net profit", money(result.net_profit));
    let _ = writeln!(out);
    row(&mut out, "Social Security tax", money(result.self_employment.social_security_tax));
    row(&mut out, "Medicare tax", money(result.self_employment.medicare_tax));
    row(
        &mut out,
        "Additional Medicare tax",
        money(result.self_employment.additional_medicare_tax),
    );
    row(&mut out, "Self-employment tax", money(result.self_employment.total_se_tax));
    row(&mut out, "Federal income tax", money(result.federal_tax));
    row(
        &mut out,
        &format!("State tax ({})", percent(result.state_rate)),
        money(result.state_tax),
    );
    row(&mut out, "Total tax", money(result.total_tax));
    row(&mut out, "Take-home", money(result.take_home));
    row(&mut out, "Effective rate (of gross)", percent(result.effective_rate));
    recommendations(&mut out, &result.recommendations);
    out
}

pub fn s_corp(result: &SCorpBreakdown) -> String {
    let mut out = String::new();
    heading(&mut out, "S-Corp Election Comparison");
    row(&mut out, "Net business income", money(result.net_business_income));
    row(&mut out, "Sole proprietor SE tax", money(result.sole_prop_se_tax));
    let _ = writeln!(out);
    row(&mut out, "Reasonable salary", money(result.reasonable_salary));
    row(&mut out, "Payroll Social Security", money(result.payroll_social_security));
    row(&mut out, "Payroll Medicare", money(result.payroll_medicare));
    row(&mut out, "Payroll FICA", money(result.payroll_fica));
    row(&mut out, "Distributions", money(result.distributions));
    row(&mut out, "Federal tax on salary", money(result.federal_tax_on_salary));
    row(
        &mut out,
        "Federal tax on distributions",
        money(result.federal_tax_on_distributions),
    );
    let _ = writeln!(out);
    row(&mut out, "Payroll tax savings", money(result.payroll_tax_savings));
    row(&mut out, "S-Corp administration cost", money(result.admin_cost));
    row(&mut out, "Net savings", money(result.net_savings));
    let verdict = if result.election_worthwhile {
        "An S-Corp election is likely to save money."
    } else {
        "An S-Corp election is unlikely to pay for itself."
    };
    let _ = writeln!(out, "\n{verdict}");
    recommendations(&mut out, &result.recommendations);
    out
}

pub fn self_employment(result: &SelfEmploymentBreakdown) -> String {
    let mut out = String::new();
    let se = &result.self_employment;
    heading(&mut out, "Self-Employment Tax Estimate");
    row(&mut out, "Net self-employment income", money(result.net_se_income));
    row(&mut out, "Net earnings (92.35%)", money(se.net_earnings));
    row(&mut out, "Social Security tax", money(se.social_security_tax));
    row(&mut out, "Medicare tax", money(se.medicare_tax));
    row(&mut out, "Additional Medicare tax", money(se.additional_medicare_tax));
    row(&mut out, "Self-employment tax", money(se.total_se_tax));
    row(&mut out, "Deductible half", money(result.deductible_se_tax));
    let _ = writeln!(out);
    row(&mut out, "Federal income tax", money(result.federal_tax));
    row(&mut out, "Marginal federal rate", percent(result.marginal_rate));
    row(
        &mut out,
        &format!("State tax ({})", percent(result.state_rate)),
        money(result.state_tax),
    );
    row(&mut out, "Total tax", money(result.total_tax));
    row(&mut out, "Take-home", money(result.take_home));
    row(&mut out, "Effective rate", percent(result.effective_rate));
    recommendations(&mut out, &result.recommendations);
    out
}

pub fn quarterly(result: &QuarterlyBreakdown) -> String {
    let mut out = String::new();
    heading(&mut out, "Quarterly Estimated Tax");
    row(&mut out, "Self-employment tax", money(result.self_employment.total_se_tax));
    row(&mut out, "Adjusted income", money(result.adjusted_income));
    row(&mut out, "Federal income tax", money(result.federal_income_tax));
    row(&mut out, "Federal total", money(result.federal_total));
    row(
        &mut out,
        &format!("State tax ({})", percent(result.state_rate)),
        money(result.state_tax),
    );
    row(&mut out, "Total projected tax", money(result.total_projected_tax));
    let _ = writeln!(out);
    row(&mut out, "90% of this year", money(result.current_year_safe_harbor));
    if let Some(prior) = result.prior_year_safe_harbor {
        row(&mut out, "Prior-year safe harbor", money(prior));
    }
    row(&mut out, "Required annual payment", money(result.required_annual_payment));
    row(&mut out, "Expected withholding", money(result.expected_withholding));
    row(&mut out, "Remaining after withholding", money(result.remaining_after_withholding));
    let _ = writeln!(out);
    if result.payments_required {
        let _ = writeln!(out, "  {:<14}{:>14}{:>14}", "Due", "Federal", "State");
        for payment in &result.payments {
            let _ = writeln!(
                out,
                "  {:<14}{:>14}{:>14}",
                payment.due_date.format("%b %-d, %Y").to_string(),
                money(payment.federal),
                money(payment.state)
            );
        }
    } else {
        let _ = writeln!(
            out,
            "Federal estimated payments are not required; withholding covers the safe harbor."
        );
        if !result.quarterly_state.is_zero() {
            row(&mut out, "State payment each quarter", money(result.quarterly_state));
        }
    }
    recommendations(&mut out, &result.recommendations);
    out
}

pub fn platforms(table: &PlatformTable) -> String {
    let mut out = String::new();
    heading(&mut out, "Platforms");
    for p in table.platforms() {
        let _ = writeln!(
            out,
            "  {} {:<10}{:<16}{:>8}  {}",
            p.icon,
            p.id,
            p.name,
            percent(p.fee_percentage),
            p.description
        );
    }
    out
}

pub fn states(table: &StateRateTable) -> String {
    let mut out = String::new();
    heading(&mut out, "State Rates");
    for s in table.rates() {
        let rate = if s.has_income_tax() {
            percent(s.rate)
        } else {
            "none".to_string()
        };
        let _ = writeln!(out, "  {}  {:<22}{:>8}", s.code, s.name, rate);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tax_core::calculators::MissingField;

    use super::*;

    #[test]
    fn percent_trims_trailing_zeros() {
        assert_eq!(percent(dec!(0.2238)), "22.38%");
        assert_eq!(percent(dec!(0.24)), "24%");
        assert_eq!(percent(dec!(0)), "0%");
    }

    #[test]
    fn placeholder_lists_missing_fields() {
        let incomplete = IncompleteInput {
            missing: vec![
                MissingField::MustBePositive("prize amount"),
                MissingField::NotSelected("state"),
            ],
        };

        let text = placeholder(&incomplete);

        assert_eq!(
            text,
            "Enter the missing details to see your estimate:\n  \
             - enter prize amount greater than zero\n  \
             - select a state\n"
        );
    }
}

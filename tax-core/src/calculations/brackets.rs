//! Progressive federal income tax over marginal bracket schedules.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::FederalIncomeTax;
//! use tax_core::{FilingStatus, tax_year_2024};
//!
//! let federal = FederalIncomeTax::new(&tax_year_2024().federal);
//!
//! // 10% of 11,600 + 12% of 35,550 + 22% of 52,850
//! assert_eq!(federal.compute_tax(dec!(100000), FilingStatus::Single), dec!(17053.00));
//! assert_eq!(federal.marginal_rate(dec!(100000), FilingStatus::Single), dec!(0.22));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::increment_of;
use crate::{FederalSchedules, FilingStatus};

/// Evaluates the federal schedules for one tax year.
#[derive(Debug, Clone, Copy)]
pub struct FederalIncomeTax<'a> {
    schedules: &'a FederalSchedules,
}

impl<'a> FederalIncomeTax<'a> {
    pub fn new(schedules: &'a FederalSchedules) -> Self {
        Self { schedules }
    }

    /// Tax on `income` under marginal-bracket semantics: each bracket taxes
    /// only the slice of income above the previous bound and at or below its
    /// own bound. Non-positive income owes nothing.
    pub fn compute_tax(
        &self,
        income: Decimal,
        status: FilingStatus,
    ) -> Decimal {
        if income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let mut tax = Decimal::ZERO;
        let mut lower = Decimal::ZERO;

        for bracket in self.schedules.for_status(status).brackets() {
            let upper = bracket.max_income.unwrap_or(income);
            let portion = income.min(upper) - lower;
            if portion > Decimal::ZERO {
                tax += portion * bracket.tax_rate;
            }
            if income <= upper {
                break;
            }
            lower = upper;
        }

        tax
    }

    /// Additional tax generated by `increment` when it sits on top of
    /// `base_income`. Zero when the increment is not positive.
    pub fn tax_on_increment(
        &self,
        increment: Decimal,
        base_income: Decimal,
        status: FilingStatus,
    ) -> Decimal {
        increment_of(
            |income| self.compute_tax(income, status),
            base_income,
            increment,
        )
    }

    /// Rate of the bracket `income` falls into. An income exactly on a
    /// bracket's upper bound belongs to that (lower) bracket.
    pub fn marginal_rate(
        &self,
        income: Decimal,
        status: FilingStatus,
    ) -> Decimal {
        let brackets = self.schedules.for_status(status).brackets();
        brackets
            .iter()
            .find(|b| b.max_income.is_none_or(|bound| income <= bound))
            .or(brackets.last())
            .map(|b| b.tax_rate)
            .unwrap_or(Decimal::ZERO)
    }
}

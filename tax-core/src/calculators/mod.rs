//! The five estimate calculators.
//!
//! Each calculator takes plain numeric input, checks its preconditions, and
//! composes the pure calculations into a breakdown rounded for display.
//! When a precondition fails no breakdown is produced; the caller shows a
//! placeholder listing the [`MissingField`]s instead.

pub mod creator;
pub mod prize;
pub mod quarterly;
pub mod s_corp;
pub mod self_employment;

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::StateRateTable;

pub use creator::{CreatorBreakdown, CreatorInput};
pub use prize::{PrizeBreakdown, PrizeInput};
pub use quarterly::{QuarterlyBreakdown, QuarterlyInput, QuarterlyPayment};
pub use s_corp::{SCorpBreakdown, SCorpInput};
pub use self_employment::{SelfEmploymentBreakdown, SelfEmploymentInput};

/// A precondition a calculator's input failed to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MissingField {
    MustBePositive(&'static str),
    MustNotBeNegative(&'static str),
    NotSelected(&'static str),
    /// A rate or fee outside `[0, 1)`.
    RateOutOfRange(&'static str),
    CustomFeeRequired,
    SalaryExceedsIncome,
    /// A state that is not in the rate table and has no override rate.
    UnknownState,
}

impl fmt::Display for MissingField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::MustBePositive(field) => write!(f, "enter {field} greater than zero"),
            Self::MustNotBeNegative(field) => write!(f, "{field} cannot be negative"),
            Self::NotSelected(field) => write!(f, "select a {field}"),
            Self::RateOutOfRange(field) => write!(f, "{field} must be between 0% and 100%"),
            Self::CustomFeeRequired => write!(f, "enter the fee charged by your platform"),
            Self::UnknownState => write!(f, "select a listed state or enter its tax rate"),
            Self::SalaryExceedsIncome => {
                write!(f, "reasonable salary cannot exceed net business income")
            }
        }
    }
}

/// The input did not satisfy the calculator's preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{}", describe(.missing))]
pub struct IncompleteInput {
    pub missing: Vec<MissingField>,
}

fn describe(missing: &[MissingField]) -> String {
    missing
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Accumulates failed preconditions so every problem is reported at once.
#[derive(Debug, Default)]
pub(crate) struct Preconditions {
    missing: Vec<MissingField>,
}

impl Preconditions {
    pub(crate) fn positive(
        mut self,
        field: &'static str,
        value: Decimal,
    ) -> Self {
        if value <= Decimal::ZERO {
            self.missing.push(MissingField::MustBePositive(field));
        }
        self
    }

    pub(crate) fn non_negative(
        mut self,
        field: &'static str,
        value: Decimal,
    ) -> Self {
        if value < Decimal::ZERO {
            self.missing.push(MissingField::MustNotBeNegative(field));
        }
        self
    }

    pub(crate) fn selected(
        mut self,
        field: &'static str,
        value: Option<&str>,
    ) -> Self {
        if value.is_none_or(|v| v.trim().is_empty()) {
            self.missing.push(MissingField::NotSelected(field));
        }
        self
    }

    /// A state must be selected, and must be in `table` unless an override
    /// rate is given.
    pub(crate) fn state(
        self,
        table: &StateRateTable,
        value: Option<&str>,
        override_rate: Option<Decimal>,
    ) -> Self {
        let unknown = override_rate.is_none()
            && value.is_some_and(|v| !v.trim().is_empty() && table.lookup(v).is_none());
        self.selected("state", value).require(!unknown, MissingField::UnknownState)
    }

    pub(crate) fn rate(
        mut self,
        field: &'static str,
        value: Option<Decimal>,
    ) -> Self {
        if value.is_some_and(|r| r < Decimal::ZERO || r >= Decimal::ONE) {
            self.missing.push(MissingField::RateOutOfRange(field));
        }
        self
    }

    pub(crate) fn require(
        mut self,
        condition: bool,
        missing: MissingField,
    ) -> Self {
        if !condition {
            self.missing.push(missing);
        }
        self
    }

    pub(crate) fn finish(self) -> Result<(), IncompleteInput> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(IncompleteInput {
                missing: self.missing,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn finish_succeeds_when_everything_holds() {
        let result = Preconditions::default()
            .positive("income", dec!(1))
            .non_negative("expenses", dec!(0))
            .selected("state", Some("TX"))
            .rate("fee", Some(dec!(0.2)))
            .finish();

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn finish_collects_every_failure_in_order() {
        let result = Preconditions::default()
            .positive("income", dec!(0))
            .non_negative("expenses", dec!(-1))
            .selected("state", Some("  "))
            .rate("fee", Some(dec!(1)))
            .require(false, MissingField::CustomFeeRequired)
            .finish();

        assert_eq!(
            result,
            Err(IncompleteInput {
                missing: vec![
                    MissingField::MustBePositive("income"),
                    MissingField::MustNotBeNegative("expenses"),
                    MissingField::NotSelected("state"),
                    MissingField::RateOutOfRange("fee"),
                    MissingField::CustomFeeRequired,
                ],
            })
        );
    }

    #[test]
    fn unselected_when_none() {
        let result = Preconditions::default().selected("state", None).finish();

        assert_eq!(
            result,
            Err(IncompleteInput {
                missing: vec![MissingField::NotSelected("state")],
            })
        );
    }

    #[test]
    fn state_accepts_code_or_name() {
        let table = &crate::tax_year_2024().state_rates;

        let by_code = Preconditions::default().state(table, Some("ny"), None).finish();
        let by_name = Preconditions::default().state(table, Some("New York"), None).finish();

        assert_eq!(by_code, Ok(()));
        assert_eq!(by_name, Ok(()));
    }

    #[test]
    fn state_rejects_unknown_jurisdiction() {
        let table = &crate::tax_year_2024().state_rates;

        let result = Preconditions::default().state(table, Some("Califronia"), None).finish();

        assert_eq!(
            result,
            Err(IncompleteInput {
                missing: vec![MissingField::UnknownState],
            })
        );
    }

    #[test]
    fn state_override_allows_unlisted_jurisdiction() {
        let table = &crate::tax_year_2024().state_rates;

        let result = Preconditions::default()
            .state(table, Some("Ontario"), Some(dec!(0.05)))
            .finish();

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn state_blank_is_only_unselected() {
        let table = &crate::tax_year_2024().state_rates;

        let result = Preconditions::default().state(table, Some(" "), None).finish();

        assert_eq!(
            result,
            Err(IncompleteInput {
                missing: vec![MissingField::NotSelected("state")],
            })
        );
    }

    #[test]
    fn incomplete_input_lists_fields_in_message() {
        let error = IncompleteInput {
            missing: vec![
                MissingField::MustBePositive("prize amount"),
                MissingField::NotSelected("state"),
            ],
        };

        assert_eq!(
            error.to_string(),
            "enter prize amount greater than zero; select a state"
        );
    }
}

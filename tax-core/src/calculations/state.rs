//! Flat-rate state income tax.
//!
//! The whole amount is taxed at the jurisdiction's single rate. Unlike the
//! federal calculation nothing is stacked on other income; this is a
//! deliberate simplification that the calculators disclose to the user.

use rust_decimal::Decimal;
use tracing::warn;

use crate::StateRateTable;

#[derive(Debug, Clone, Copy)]
pub struct StateIncomeTax<'a> {
    table: &'a StateRateTable,
}

impl<'a> StateIncomeTax<'a> {
    pub fn new(table: &'a StateRateTable) -> Self {
        Self { table }
    }

    /// The rate that applies: the override when given, otherwise the table
    /// entry, otherwise zero.
    pub fn effective_rate(
        &self,
        jurisdiction: &str,
        override_rate: Option<Decimal>,
    ) -> Decimal {
        if let Some(rate) = override_rate {
            return rate;
        }
        self.table.rate_for(jurisdiction).unwrap_or_else(|| {
            warn!(jurisdiction, "unknown jurisdiction; assuming no state income tax");
            Decimal::ZERO
        })
    }

    /// `amount × (override ?? table[jurisdiction] ?? 0)`.
    pub fn state_tax(
        &self,
        amount: Decimal,
        jurisdiction: &str,
        override_rate: Option<Decimal>,
    ) -> Decimal {
        amount * self.effective_rate(jurisdiction, override_rate)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::tax_year_2024;

    fn state() -> StateIncomeTax<'static> {
        StateIncomeTax::new(&tax_year_2024().state_rates)
    }

    #[test]
    fn state_tax_is_amount_times_table_rate() {
        let result = state().state_tax(dec!(80000), "CA", None);

        assert_eq!(result, dec!(80000) * dec!(0.133));
    }

    #[test]
    fn state_tax_is_linear_in_amount() {
        let single = state().state_tax(dec!(12345.67), "New York", None);
        let triple = state().state_tax(dec!(37037.01), "New York", None);

        assert_eq!(triple, single * dec!(3));
    }

    #[test]
    fn no_income_tax_states_always_return_zero() {
        for code in ["AK", "FL", "NV", "NH", "SD", "TN", "TX", "WA", "WY"] {
            for amount in [dec!(1), dec!(100000), dec!(99999999)] {
                assert_eq!(state().state_tax(amount, code, None), Decimal::ZERO);
            }
        }
    }

    #[test]
    fn override_rate_replaces_table_rate() {
        let result = state().state_tax(dec!(50000), "TX", Some(dec!(0.05)));

        assert_eq!(result, dec!(2500.00));
    }

    #[test]
    fn unknown_jurisdiction_is_taxed_at_zero() {
        let result = state().state_tax(dec!(50000), "Atlantis", None);

        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn effective_rate_prefers_override() {
        assert_eq!(state().effective_rate("CA", Some(dec!(0.01))), dec!(0.01));
        assert_eq!(state().effective_rate("ca", None), dec!(0.133));
    }
}

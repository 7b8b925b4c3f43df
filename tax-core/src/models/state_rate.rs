use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors found while validating a flat-rate lookup table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateTableError {
    #[error("rate table is empty")]
    Empty,

    #[error("rate for '{key}' must be in [0, 1), got {rate}")]
    InvalidRate { key: String, rate: Decimal },

    #[error("duplicate entry '{0}'")]
    DuplicateKey(String),
}

/// A jurisdiction and its flat marginal income tax rate.
///
/// Zero means the jurisdiction has no income tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRate {
    pub code: String,
    pub name: String,
    pub rate: Decimal,
}

impl StateRate {
    pub fn has_income_tax(&self) -> bool {
        self.rate > Decimal::ZERO
    }
}

/// Flat-rate approximation of state income tax for every jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRateTable {
    rates: Vec<StateRate>,
}

impl StateRateTable {
    pub fn new(rates: Vec<StateRate>) -> Result<Self, RateTableError> {
        let table = Self { rates };
        table.validate()?;
        Ok(table)
    }

    pub(crate) fn from_static(rates: Vec<StateRate>) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &[StateRate] {
        &self.rates
    }

    /// Finds a jurisdiction by its postal code (`TX`) or full name
    /// (`Texas`), ignoring case and surrounding whitespace.
    pub fn lookup(
        &self,
        jurisdiction: &str,
    ) -> Option<&StateRate> {
        let key = jurisdiction.trim();
        self.rates
            .iter()
            .find(|s| s.code.eq_ignore_ascii_case(key) || s.name.eq_ignore_ascii_case(key))
    }

    pub fn rate_for(
        &self,
        jurisdiction: &str,
    ) -> Option<Decimal> {
        self.lookup(jurisdiction).map(|s| s.rate)
    }

    /// Inserts or replaces the entry with the same code.
    pub fn upsert(
        &mut self,
        rate: StateRate,
    ) {
        match self
            .rates
            .iter_mut()
            .find(|s| s.code.eq_ignore_ascii_case(&rate.code))
        {
            Some(existing) => *existing = rate,
            None => self.rates.push(rate),
        }
    }

    pub fn validate(&self) -> Result<(), RateTableError> {
        if self.rates.is_empty() {
            return Err(RateTableError::Empty);
        }
        for (index, state) in self.rates.iter().enumerate() {
            if state.rate < Decimal::ZERO || state.rate >= Decimal::ONE {
                return Err(RateTableError::InvalidRate {
                    key: state.code.clone(),
                    rate: state.rate,
                });
            }
            if self.rates[..index]
                .iter()
                .any(|s| s.code.eq_ignore_ascii_case(&state.code))
            {
                return Err(RateTableError::DuplicateKey(state.code.clone()));
            }
        }
        Ok(())
    }
}

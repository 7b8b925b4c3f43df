use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::FilingStatus;

/// One marginal bracket: income up to and including `max_income` (above the
/// previous bracket's bound) is taxed at `tax_rate`. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

/// Errors found while validating a bracket schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketScheduleError {
    #[error("bracket schedule is empty")]
    Empty,

    #[error("bracket {index} upper bound {bound} must be positive")]
    NonPositiveBound { index: usize, bound: Decimal },

    #[error("bracket {index} upper bound {bound} does not exceed the previous bound {previous}")]
    BoundsNotIncreasing {
        index: usize,
        bound: Decimal,
        previous: Decimal,
    },

    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedBeforeLast { index: usize },

    #[error("last bracket must be unbounded")]
    LastBracketBounded,

    #[error("bracket {index} rate {rate} must be in [0, 1)")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("bracket {index} rate {rate} is lower than the previous rate {previous}")]
    RatesDecreasing {
        index: usize,
        rate: Decimal,
        previous: Decimal,
    },
}

/// An ordered bracket sequence partitioning `[0, ∞)` for one filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSchedule {
    brackets: Vec<TaxBracket>,
}

impl BracketSchedule {
    /// Builds a schedule after checking that bounds strictly increase, only
    /// the last bracket is unbounded, and rates never decrease.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, BracketScheduleError> {
        let schedule = Self { brackets };
        schedule.validate()?;
        Ok(schedule)
    }

    pub(crate) fn from_static(brackets: &[TaxBracket]) -> Self {
        Self {
            brackets: brackets.to_vec(),
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn validate(&self) -> Result<(), BracketScheduleError> {
        let last_index = self
            .brackets
            .len()
            .checked_sub(1)
            .ok_or(BracketScheduleError::Empty)?;

        let mut previous_bound = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;

        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate >= Decimal::ONE {
                return Err(BracketScheduleError::InvalidRate {
                    index,
                    rate: bracket.tax_rate,
                });
            }
            if bracket.tax_rate < previous_rate {
                return Err(BracketScheduleError::RatesDecreasing {
                    index,
                    rate: bracket.tax_rate,
                    previous: previous_rate,
                });
            }
            previous_rate = bracket.tax_rate;

            match bracket.max_income {
                Some(bound) if bound <= Decimal::ZERO => {
                    return Err(BracketScheduleError::NonPositiveBound { index, bound });
                }
                Some(bound) if bound <= previous_bound => {
                    return Err(BracketScheduleError::BoundsNotIncreasing {
                        index,
                        bound,
                        previous: previous_bound,
                    });
                }
                Some(_) if index == last_index => {
                    return Err(BracketScheduleError::LastBracketBounded);
                }
                Some(bound) => previous_bound = bound,
                None if index != last_index => {
                    return Err(BracketScheduleError::UnboundedBeforeLast { index });
                }
                None => {}
            }
        }

        Ok(())
    }
}

/// Federal bracket schedules for every filing status in one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalSchedules {
    pub single: BracketSchedule,
    pub married_jointly: BracketSchedule,
    pub married_separately: BracketSchedule,
    pub head_of_household: BracketSchedule,
}

impl FederalSchedules {
    pub fn for_status(
        &self,
        status: FilingStatus,
    ) -> &BracketSchedule {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_jointly,
            FilingStatus::MarriedFilingSeparately => &self.married_separately,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
        }
    }

    pub fn for_status_mut(
        &mut self,
        status: FilingStatus,
    ) -> &mut BracketSchedule {
        match status {
            FilingStatus::Single => &mut self.single,
            FilingStatus::MarriedFilingJointly => &mut self.married_jointly,
            FilingStatus::MarriedFilingSeparately => &mut self.married_separately,
            FilingStatus::HeadOfHousehold => &mut self.head_of_household,
        }
    }

    /// Validates every schedule, reporting the first failing status.
    pub fn validate(&self) -> Result<(), (FilingStatus, BracketScheduleError)> {
        for status in FilingStatus::all() {
            self.for_status(*status)
                .validate()
                .map_err(|e| (*status, e))?;
        }
        Ok(())
    }
}

//! Self-employment tax: Social Security, Medicare, and Additional Medicare
//! Tax on net earnings from self-employment.
//!
//! # Calculation
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Combined SE income (this stream + other SE income) |
//! | 2    | Net earnings: combined × 92.35%, floored at zero |
//! | 3    | Medicare tax: net earnings × 2.9% (uncapped) |
//! | 4    | Remaining wage base: SS wage base − W-2 wages, floored at zero |
//! | 5    | Social Security tax: smaller of net earnings or step 4, × 12.4% |
//! | 6    | Remaining threshold: Additional Medicare threshold − W-2 wages, floored at zero |
//! | 7    | Additional Medicare Tax: net earnings above step 6, × 0.9% |
//! | 8    | Total SE tax: steps 3 + 5 + 7 |
//! | 9    | Deductible SE tax: (steps 3 + 5) × 50%; step 7 is never deductible |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::SelfEmploymentTax;
//! use tax_core::{FilingStatus, tax_year_2024};
//!
//! let se = SelfEmploymentTax::new(&tax_year_2024().self_employment);
//! let result = se.compute(dec!(100000), dec!(0), dec!(0), FilingStatus::Single);
//!
//! assert_eq!(result.net_earnings, dec!(92350.00));
//! assert_eq!(result.total_se_tax, dec!(14129.550));
//! ```

use std::ops::Sub;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::{increment_of, max, round_half_up};
use crate::{FilingStatus, StatusAmounts};

/// Errors that can occur when validating SE tax parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeTaxConfigError {
    /// The net earnings factor must be between 0 and 1 (exclusive of 0).
    #[error("net earnings factor must be between 0 and 1, got {0}")]
    InvalidNetEarningsFactor(Decimal),

    #[error("social security tax rate must be between 0 and 1, got {0}")]
    InvalidSocialSecurityRate(Decimal),

    #[error("medicare tax rate must be between 0 and 1, got {0}")]
    InvalidMedicareRate(Decimal),

    #[error("additional medicare tax rate must be between 0 and 1, got {0}")]
    InvalidAdditionalMedicareRate(Decimal),

    #[error("deduction factor must be between 0 and 1, got {0}")]
    InvalidDeductionFactor(Decimal),

    #[error("social security wage base must be positive, got {0}")]
    InvalidSsWageBase(Decimal),

    #[error("additional medicare threshold for {status} must be positive, got {amount}")]
    InvalidAdditionalMedicareThreshold {
        status: FilingStatus,
        amount: Decimal,
    },
}

/// Statutory SE tax parameters for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeTaxConfig {
    /// Maximum combined earnings subject to Social Security tax.
    ///
    /// For 2024, this is $168,600.
    pub ss_wage_base: Decimal,

    /// Combined employer and employee Social Security rate, typically 12.4%.
    pub ss_tax_rate: Decimal,

    /// Combined employer and employee Medicare rate, typically 2.9%.
    pub medicare_tax_rate: Decimal,

    /// Additional Medicare Tax rate, typically 0.9%.
    pub additional_medicare_rate: Decimal,

    /// Combined wages and SE earnings above which Additional Medicare Tax applies.
    pub additional_medicare_thresholds: StatusAmounts,

    /// Share of SE income subject to SE tax, typically 92.35%.
    pub net_earnings_factor: Decimal,

    /// Deductible share of Social Security and Medicare SE tax, typically 50%.
    pub deduction_factor: Decimal,
}

impl SeTaxConfig {
    /// Returns an error if any parameter is outside its valid range.
    pub fn validate(&self) -> Result<(), SeTaxConfigError> {
        let in_unit_range = |v: Decimal| v >= Decimal::ZERO && v <= Decimal::ONE;

        if self.net_earnings_factor <= Decimal::ZERO || self.net_earnings_factor > Decimal::ONE {
            return Err(SeTaxConfigError::InvalidNetEarningsFactor(
                self.net_earnings_factor,
            ));
        }
        if !in_unit_range(self.ss_tax_rate) {
            return Err(SeTaxConfigError::InvalidSocialSecurityRate(
                self.ss_tax_rate,
            ));
        }
        if !in_unit_range(self.medicare_tax_rate) {
            return Err(SeTaxConfigError::InvalidMedicareRate(
                self.medicare_tax_rate,
            ));
        }
        if !in_unit_range(self.additional_medicare_rate) {
            return Err(SeTaxConfigError::InvalidAdditionalMedicareRate(
                self.additional_medicare_rate,
            ));
        }
        if !in_unit_range(self.deduction_factor) {
            return Err(SeTaxConfigError::InvalidDeductionFactor(
                self.deduction_factor,
            ));
        }
        if self.ss_wage_base <= Decimal::ZERO {
            return Err(SeTaxConfigError::InvalidSsWageBase(self.ss_wage_base));
        }
        for status in FilingStatus::all() {
            let amount = self.additional_medicare_thresholds.for_status(*status);
            if amount <= Decimal::ZERO {
                return Err(SeTaxConfigError::InvalidAdditionalMedicareThreshold {
                    status: *status,
                    amount,
                });
            }
        }
        Ok(())
    }
}

/// Component-by-component SE tax. Values are exact (unrounded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeTaxBreakdown {
    /// SE income before the net earnings factor.
    pub combined_se_income: Decimal,

    /// Combined SE income × net earnings factor, floored at zero.
    pub net_earnings: Decimal,

    /// Net earnings that fit under the remaining Social Security wage base.
    pub ss_taxable_earnings: Decimal,

    pub social_security_tax: Decimal,

    pub medicare_tax: Decimal,

    /// Net earnings above the remaining Additional Medicare threshold.
    pub additional_medicare_taxable: Decimal,

    pub additional_medicare_tax: Decimal,

    /// Social Security + Medicare + Additional Medicare.
    pub total_se_tax: Decimal,

    /// Half of Social Security + Medicare. Additional Medicare Tax is
    /// never deductible.
    pub deductible_se_tax: Decimal,
}

impl SeTaxBreakdown {
    /// Copy with every field rounded to cents for display.
    pub fn rounded(&self) -> Self {
        Self {
            combined_se_income: round_half_up(self.combined_se_income),
            net_earnings: round_half_up(self.net_earnings),
            ss_taxable_earnings: round_half_up(self.ss_taxable_earnings),
            social_security_tax: round_half_up(self.social_security_tax),
            medicare_tax: round_half_up(self.medicare_tax),
            additional_medicare_taxable: round_half_up(self.additional_medicare_taxable),
            additional_medicare_tax: round_half_up(self.additional_medicare_tax),
            total_se_tax: round_half_up(self.total_se_tax),
            deductible_se_tax: round_half_up(self.deductible_se_tax),
        }
    }
}

impl Sub for SeTaxBreakdown {
    type Output = Self;

    fn sub(
        self,
        rhs: Self,
    ) -> Self {
        Self {
            combined_se_income: self.combined_se_income - rhs.combined_se_income,
            net_earnings: self.net_earnings - rhs.net_earnings,
            ss_taxable_earnings: self.ss_taxable_earnings - rhs.ss_taxable_earnings,
            social_security_tax: self.social_security_tax - rhs.social_security_tax,
            medicare_tax: self.medicare_tax - rhs.medicare_tax,
            additional_medicare_taxable: self.additional_medicare_taxable
                - rhs.additional_medicare_taxable,
            additional_medicare_tax: self.additional_medicare_tax - rhs.additional_medicare_tax,
            total_se_tax: self.total_se_tax - rhs.total_se_tax,
            deductible_se_tax: self.deductible_se_tax - rhs.deductible_se_tax,
        }
    }
}

/// Calculator for self-employment tax.
#[derive(Debug, Clone, Copy)]
pub struct SelfEmploymentTax<'a> {
    config: &'a SeTaxConfig,
}

impl<'a> SelfEmploymentTax<'a> {
    pub fn new(config: &'a SeTaxConfig) -> Self {
        Self { config }
    }

    /// Computes SE tax on all SE income (`net_se_income + other_se_income`)
    /// for a taxpayer who also earns `w2_wages`.
    ///
    /// W-2 wages use up Social Security wage base and Additional Medicare
    /// threshold before any SE earnings do.
    pub fn compute(
        &self,
        net_se_income: Decimal,
        other_se_income: Decimal,
        w2_wages: Decimal,
        status: FilingStatus,
    ) -> SeTaxBreakdown {
        let combined_se_income = self.combined_se_income(net_se_income, other_se_income);
        let net_earnings = self.net_earnings(combined_se_income);

        let medicare_tax = net_earnings * self.config.medicare_tax_rate;

        let remaining_wage_base = max(self.config.ss_wage_base - w2_wages, Decimal::ZERO);
        let ss_taxable_earnings = net_earnings.min(remaining_wage_base);
        let social_security_tax = ss_taxable_earnings * self.config.ss_tax_rate;

        let threshold = self.config.additional_medicare_thresholds.for_status(status);
        let remaining_threshold = max(threshold - w2_wages, Decimal::ZERO);
        let additional_medicare_taxable = max(net_earnings - remaining_threshold, Decimal::ZERO);
        let additional_medicare_tax =
            additional_medicare_taxable * self.config.additional_medicare_rate;

        let deductible_se_tax = (social_security_tax + medicare_tax) * self.config.deduction_factor;

        SeTaxBreakdown {
            combined_se_income,
            net_earnings,
            ss_taxable_earnings,
            social_security_tax,
            medicare_tax,
            additional_medicare_taxable,
            additional_medicare_tax,
            total_se_tax: social_security_tax + medicare_tax + additional_medicare_tax,
            deductible_se_tax,
        }
    }

    /// SE tax attributable to `stream` alone when `other_se_income` also
    /// exists: the total with the stream minus the total without it.
    ///
    /// With no other SE income the full result is returned directly, which
    /// equals the general subtraction because SE tax on zero income is zero.
    pub fn compute_incremental(
        &self,
        stream: Decimal,
        other_se_income: Decimal,
        w2_wages: Decimal,
        status: FilingStatus,
    ) -> SeTaxBreakdown {
        if other_se_income.is_zero() {
            return self.compute(stream, Decimal::ZERO, w2_wages, status);
        }
        increment_of(
            |se_income| self.compute(se_income, Decimal::ZERO, w2_wages, status),
            other_se_income,
            stream,
        )
    }

    fn combined_se_income(
        &self,
        net_se_income: Decimal,
        other_se_income: Decimal,
    ) -> Decimal {
        let combined = net_se_income + other_se_income;
        if combined < Decimal::ZERO {
            warn!(
                net_se_income = %net_se_income,
                other_se_income = %other_se_income,
                combined = %combined,
                "Combined SE income is negative; SE tax will be zero"
            );
        }
        combined
    }

    fn net_earnings(
        &self,
        combined_se_income: Decimal,
    ) -> Decimal {
        max(
            combined_se_income * self.config.net_earnings_factor,
            Decimal::ZERO,
        )
    }
}

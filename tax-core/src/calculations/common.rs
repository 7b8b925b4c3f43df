//! Common utility functions for tax calculations.
//!
//! Rounding, rate helpers, and the "stacking" helper shared by the federal
//! and self-employment calculations.

use std::ops::Sub;

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a rate to four decimal places (hundredths of a percent).
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as dollars and cents with thousands separators.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::format_money;
///
/// assert_eq!(format_money(dec!(182560)), "$182,560.00");
/// assert_eq!(format_money(dec!(-810.5)), "-$810.50");
/// ```
pub fn format_money(amount: Decimal) -> String {
    let mut cents_scale = round_half_up(amount.abs());
    cents_scale.rescale(2);
    let rounded = cents_scale.to_string();
    let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !round_half_up(amount).is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

/// Returns the maximum of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// `tax / base`, or zero when the base is not positive.
pub fn effective_rate(
    tax: Decimal,
    base: Decimal,
) -> Decimal {
    if base <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        tax / base
    }
}

/// Isolates the share of a calculation attributable to `increment` when it
/// is stacked on top of `base`: `calculate(base + increment) - calculate(base)`.
///
/// A non-positive increment contributes nothing and yields `T::default()`.
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::increment_of;
///
/// // 10% up to 100, 20% above.
/// let tax = |income: Decimal| {
///     income.min(dec!(100)) * dec!(0.10) + (income - dec!(100)).max(Decimal::ZERO) * dec!(0.20)
/// };
///
/// assert_eq!(increment_of(tax, dec!(80), dec!(40)), dec!(6.00));
/// assert_eq!(increment_of(tax, dec!(80), dec!(-5)), Decimal::ZERO);
/// ```
pub fn increment_of<T, F>(
    calculate: F,
    base: Decimal,
    increment: Decimal,
) -> T
where
    F: Fn(Decimal) -> T,
    T: Sub<Output = T> + Default,
{
    if increment <= Decimal::ZERO {
        return T::default();
    }
    calculate(base + increment) - calculate(base)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(123.455));

        assert_eq!(result, dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        let result = round_half_up(dec!(999999.999));

        assert_eq!(result, dec!(1000000.00));
    }

    // =========================================================================
    // format_money tests
    // =========================================================================

    #[test]
    fn format_money_groups_thousands() {
        assert_eq!(format_money(dec!(0)), "$0.00");
        assert_eq!(format_money(dec!(999.5)), "$999.50");
        assert_eq!(format_money(dec!(1234.56)), "$1,234.56");
        assert_eq!(format_money(dec!(1234567)), "$1,234,567.00");
    }

    #[test]
    fn format_money_rounds_to_cents() {
        assert_eq!(format_money(dec!(17053.775)), "$17,053.78");
    }

    #[test]
    fn format_money_shows_negative_sign() {
        assert_eq!(format_money(dec!(-810.50)), "-$810.50");
        assert_eq!(format_money(dec!(-0.001)), "$0.00");
    }

    // =========================================================================
    // round_rate tests
    // =========================================================================

    #[test]
    fn round_rate_keeps_four_places() {
        let result = round_rate(dec!(0.170537749));

        assert_eq!(result, dec!(0.1705));
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_handles_equal_values() {
        let result = max(dec!(150.00), dec!(150.00));

        assert_eq!(result, dec!(150.00));
    }

    #[test]
    fn max_handles_negative_and_positive() {
        let result = max(dec!(-50.00), dec!(50.00));

        assert_eq!(result, dec!(50.00));
    }

    // =========================================================================
    // effective_rate tests
    // =========================================================================

    #[test]
    fn effective_rate_divides_tax_by_base() {
        let result = effective_rate(dec!(25), dec!(100));

        assert_eq!(result, dec!(0.25));
    }

    #[test]
    fn effective_rate_is_zero_for_zero_base() {
        let result = effective_rate(dec!(25), dec!(0));

        assert_eq!(result, Decimal::ZERO);
    }

    // =========================================================================
    // increment_of tests
    // =========================================================================

    #[test]
    fn increment_of_subtracts_base_result() {
        let result = increment_of(|x: Decimal| x * dec!(2), dec!(10), dec!(5));

        assert_eq!(result, dec!(10));
    }

    #[test]
    fn increment_of_returns_default_for_zero_increment() {
        let result = increment_of(|x: Decimal| x + dec!(1000), dec!(10), dec!(0));

        assert_eq!(result, Decimal::ZERO);
    }
}

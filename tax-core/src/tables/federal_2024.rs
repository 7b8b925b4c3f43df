//! 2024 federal income tax rate schedules (Rev. Proc. 2023-34).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::TaxBracket;

const fn bracket(
    max_income: Decimal,
    tax_rate: Decimal,
) -> TaxBracket {
    TaxBracket {
        max_income: Some(max_income),
        tax_rate,
    }
}

const fn top(tax_rate: Decimal) -> TaxBracket {
    TaxBracket {
        max_income: None,
        tax_rate,
    }
}

/// Schedule X.
pub const SINGLE: [TaxBracket; 7] = [
    bracket(dec!(11600), dec!(0.10)),
    bracket(dec!(47150), dec!(0.12)),
    bracket(dec!(100525), dec!(0.22)),
    bracket(dec!(191950), dec!(0.24)),
    bracket(dec!(243725), dec!(0.32)),
    bracket(dec!(609350), dec!(0.35)),
    top(dec!(0.37)),
];

/// Schedule Y-1.
pub const MARRIED_JOINTLY: [TaxBracket; 7] = [
    bracket(dec!(23200), dec!(0.10)),
    bracket(dec!(94300), dec!(0.12)),
    bracket(dec!(201050), dec!(0.22)),
    bracket(dec!(383900), dec!(0.24)),
    bracket(dec!(487450), dec!(0.32)),
    bracket(dec!(731200), dec!(0.35)),
    top(dec!(0.37)),
];

/// Schedule Y-2.
pub const MARRIED_SEPARATELY: [TaxBracket; 7] = [
    bracket(dec!(11600), dec!(0.10)),
    bracket(dec!(47150), dec!(0.12)),
    bracket(dec!(100525), dec!(0.22)),
    bracket(dec!(191950), dec!(0.24)),
    bracket(dec!(243725), dec!(0.32)),
    bracket(dec!(365600), dec!(0.35)),
    top(dec!(0.37)),
];

/// Schedule Z.
pub const HEAD_OF_HOUSEHOLD: [TaxBracket; 7] = [
    bracket(dec!(16550), dec!(0.10)),
    bracket(dec!(63100), dec!(0.12)),
    bracket(dec!(100500), dec!(0.22)),
    bracket(dec!(191950), dec!(0.24)),
    bracket(dec!(243700), dec!(0.32)),
    bracket(dec!(609350), dec!(0.35)),
    top(dec!(0.37)),
];

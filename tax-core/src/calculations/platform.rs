//! Platform fee deduction from creator gross revenue.

use rust_decimal::Decimal;
use tracing::warn;

use crate::PlatformTable;

#[derive(Debug, Clone, Copy)]
pub struct PlatformFees<'a> {
    table: &'a PlatformTable,
}

impl<'a> PlatformFees<'a> {
    pub fn new(table: &'a PlatformTable) -> Self {
        Self { table }
    }

    pub fn fee_percentage(
        &self,
        platform_id: &str,
        override_fee: Option<Decimal>,
    ) -> Decimal {
        if let Some(fee) = override_fee {
            return fee;
        }
        match self.table.get(platform_id) {
            Some(platform) => platform.fee_percentage,
            None => {
                warn!(platform_id, "unknown platform; assuming no platform fee");
                Decimal::ZERO
            }
        }
    }

    /// `gross × (override ?? table[platform].fee ?? 0)`.
    ///
    /// The custom platform's table fee is zero, so callers must supply an
    /// override for it; that requirement is enforced by the creator
    /// calculator, not here.
    pub fn platform_fee(
        &self,
        gross_revenue: Decimal,
        platform_id: &str,
        override_fee: Option<Decimal>,
    ) -> Decimal {
        gross_revenue * self.fee_percentage(platform_id, override_fee)
    }
}

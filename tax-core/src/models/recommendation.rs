use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::FilingStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Foundational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationCategory {
    Immediate,
    Planning,
    #[serde(rename = "Long-term")]
    LongTerm,
}

impl fmt::Display for Impact {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Foundational => "Foundational",
        })
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::Immediate => "Immediate",
            Self::Planning => "Planning",
            Self::LongTerm => "Long-term",
        })
    }
}

/// An educational suggestion produced for one calculation. Lower
/// `priority` values are shown first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub explanation: String,
    pub impact: Impact,
    pub category: RecommendationCategory,
    pub priority: u8,
}

/// Snapshot of a calculator's results that the recommendation rules read.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecommendationInput {
    pub filing_status: FilingStatus,
    pub gross_income: Decimal,
    pub net_income: Decimal,
    /// W-2 or other non-self-employment income.
    pub other_income: Decimal,
    pub platform_fees: Decimal,
    pub federal_tax: Decimal,
    pub state_tax: Decimal,
    pub self_employment_tax: Decimal,
    pub total_tax: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
    /// `None` when no jurisdiction was selected.
    pub state_rate: Option<Decimal>,
    pub is_s_corp: bool,
    /// Quarterly estimated payment already planned, if any.
    pub quarterly_payment: Option<Decimal>,
}

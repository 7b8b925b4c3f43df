mod filing_status;
mod platform;
mod recommendation;
mod state_rate;
mod tax_bracket;
mod tax_year_config;

pub use filing_status::FilingStatus;
pub use platform::{CUSTOM_PLATFORM_ID, PlatformConfig, PlatformTable};
pub use recommendation::{Impact, Recommendation, RecommendationCategory, RecommendationInput};
pub use state_rate::{RateTableError, StateRate, StateRateTable};
pub use tax_bracket::{BracketSchedule, BracketScheduleError, FederalSchedules, TaxBracket};
pub use tax_year_config::{
    EstimatedPaymentConfig, StatusAmounts, TaxYearConfig, TaxYearConfigError,
};

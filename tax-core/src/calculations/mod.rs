//! Pure tax calculations.
//!
//! Every function here is synchronous and infallible: invalid input is
//! rejected by the calculators in [`crate::calculators`] before it gets here.

pub mod brackets;
pub mod common;
pub mod platform;
pub mod recommendations;
pub mod self_employment;
pub mod state;

pub use brackets::FederalIncomeTax;
pub use platform::PlatformFees;
pub use recommendations::{MAX_RECOMMENDATIONS, RecommendationEngine};
pub use self_employment::{SeTaxBreakdown, SeTaxConfig, SeTaxConfigError, SelfEmploymentTax};
pub use state::StateIncomeTax;

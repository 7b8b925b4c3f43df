pub mod calculations;
pub mod calculators;
pub mod models;
pub mod tables;

pub use models::*;
pub use tables::tax_year_2024;

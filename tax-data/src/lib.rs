//! Loads replacement tax tables from CSV files.

mod loader;

pub use loader::{
    BracketRecord, FEDERAL_BRACKETS_FILE, LoadSummary, PLATFORM_FEES_FILE, PlatformRecord,
    STATE_RATES_FILE, StateRateRecord, TablesLoader, TablesLoaderError,
};

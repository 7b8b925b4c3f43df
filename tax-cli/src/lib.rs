pub mod commands;
pub mod config;
pub mod forms;
pub mod logging;
pub mod render;

pub use commands::{Cli, Command, run};
pub use config::{CliConfig, ConfigError, LoggingConfig};

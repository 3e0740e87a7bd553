pub mod cli;
pub mod common;
pub mod config;

pub use cli::{build_cli_command, Cli, Commands};
pub use common::OutputFormat;
pub use config::load_config;

use crate::common::OutputFormat;
use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "edgepower", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a controller configuration and list its limitations
    Check {
        /// Controller configuration (TOML)
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: PathBuf,
    },
    /// Print the feasible P/Q region
    Envelope {
        /// Controller configuration (TOML)
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Evaluate the characteristic at a voltage ratio
    Curve {
        /// Controller configuration (TOML)
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: PathBuf,
        /// Grid voltage divided by nominal voltage
        #[arg(long, allow_negative_numbers = true)]
        ratio: f64,
    },
    /// Clip an operating point into the envelope
    Clip {
        /// Controller configuration (TOML)
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: PathBuf,
        /// Active power in W
        #[arg(long, allow_negative_numbers = true)]
        p: f64,
        /// Reactive power in var
        #[arg(long, allow_negative_numbers = true)]
        q: f64,
    },
    /// Run one control cycle
    Cycle {
        /// Controller configuration (TOML)
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: PathBuf,
        /// Requested active power in W
        #[arg(long, allow_negative_numbers = true)]
        active_power: f64,
        /// Measured grid voltage in V
        #[arg(long)]
        voltage: f64,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli_command().debug_assert();
    }

    #[test]
    fn test_parses_negative_values() {
        let cli = Cli::try_parse_from([
            "edgepower",
            "clip",
            "--config",
            "controller.toml",
            "--p",
            "-3000",
            "--q",
            "-1500.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Clip { p, q, .. } => {
                assert_eq!(p, -3000.0);
                assert_eq!(q, -1500.5);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.log_level, tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_after_subcommand() {
        let cli = Cli::try_parse_from([
            "edgepower",
            "curve",
            "--config",
            "controller.toml",
            "--ratio",
            "1.02",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, tracing::Level::DEBUG);
    }
}

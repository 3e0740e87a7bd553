use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

use edgepower_cli::{Cli, Commands};

mod commands;

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Check { config } => commands::check::handle(config),
        Commands::Envelope { config, format } => commands::envelope::handle(config, *format),
        Commands::Curve { config, ratio } => commands::curve::handle(config, *ratio),
        Commands::Clip { config, p, q } => commands::clip::handle(config, *p, *q),
        Commands::Cycle {
            config,
            active_power,
            voltage,
            format,
        } => commands::cycle::handle(config, *active_power, *voltage, *format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {err}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

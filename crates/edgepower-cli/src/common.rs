//! Output helpers shared across commands.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};

/// Output format for tabular/structured data.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tab-aligned text (default for interactive use)
    #[default]
    Plain,
    /// JSON object (pipe-friendly, structured)
    Json,
}

/// Pretty-print `value` as JSON on stdout.
pub fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("serializing output to JSON")?;
    writeln!(stdout)?;
    Ok(())
}

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use edgepower_core::{ConvexRegion, Point};
use serde::Serialize;
use tabwriter::TabWriter;
use tracing::info;

use edgepower_cli::{common::write_json, load_config, OutputFormat};

#[derive(Serialize)]
struct EnvelopeReport {
    max_apparent_power: i64,
    area: f64,
    limitations: Vec<String>,
    /// Closed ring: the first vertex is repeated last
    ring: Vec<Point>,
}

pub fn handle(config_path: &Path, format: OutputFormat) -> Result<()> {
    let config = load_config(config_path)?;
    let envelope = config.build_envelope(Arc::new(config.capability()))?;
    let region = envelope.feasible_region()?;
    info!(
        vertices = region.vertices().len(),
        area = region.area(),
        "feasible region computed"
    );

    match format {
        OutputFormat::Plain => print_region_table(&region),
        OutputFormat::Json => write_json(&EnvelopeReport {
            max_apparent_power: envelope.max_apparent_power(),
            area: region.area(),
            limitations: envelope.describe(),
            ring: region.ring(),
        }),
    }
}

fn print_region_table(region: &ConvexRegion) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "VERTEX\tP (W)\tQ (var)")?;
    for (idx, vertex) in region.ring().iter().enumerate() {
        writeln!(writer, "{}\t{:.1}\t{:.1}", idx, vertex.p, vertex.q)?;
    }
    writer.flush()?;
    println!("area: {:.1} W·var", region.area());
    Ok(())
}

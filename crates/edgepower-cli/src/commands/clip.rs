use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use edgepower_core::Point;

use edgepower_cli::load_config;

pub fn handle(config_path: &Path, p: f64, q: f64) -> Result<()> {
    let config = load_config(config_path)?;
    let envelope = config.build_envelope(Arc::new(config.capability()))?;

    let requested = Point::new(p, q);
    let clipped = envelope
        .clip_point(requested)
        .with_context(|| format!("clipping {requested}"))?;

    println!(
        "{}\t{}",
        clipped.active_power(),
        clipped.reactive_power()
    );
    if clipped != requested {
        println!("clipped from {requested}");
    }
    Ok(())
}

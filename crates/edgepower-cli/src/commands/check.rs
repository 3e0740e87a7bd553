use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use edgepower_cli::load_config;

pub fn handle(config_path: &Path) -> Result<()> {
    info!("Checking controller config {}", config_path.display());
    let config = load_config(config_path)?;
    let envelope = config.build_envelope(Arc::new(config.capability()))?;

    println!(
        "Configuration OK: {} VA, {} limitation(s), {} breakpoint(s)",
        config.max_apparent_power,
        envelope.len(),
        config.characteristic.len()
    );
    for line in envelope.describe() {
        println!("  {line}");
    }
    Ok(())
}

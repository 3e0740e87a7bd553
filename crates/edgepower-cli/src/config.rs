//! Loading controller configuration from TOML or JSON files.

use anyhow::{Context, Result};
use edgepower_core::ControllerConfig;
use std::path::Path;
use tracing::debug;

/// Read and validate a controller configuration.
///
/// Files ending in `.json` are read as JSON, anything else as TOML.
pub fn load_config(path: &Path) -> Result<ControllerConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading controller config {}", path.display()))?;
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => ControllerConfig::from_json(&contents)
            .with_context(|| format!("invalid controller config {}", path.display()))?,
        _ => {
            let config: ControllerConfig = toml::from_str(&contents)
                .with_context(|| format!("parsing controller config {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("invalid controller config {}", path.display()))?;
            config
        }
    };
    debug!(
        path = %path.display(),
        limitations = config.limitations.len(),
        breakpoints = config.characteristic.len(),
        "controller config loaded"
    );
    Ok(config)
}

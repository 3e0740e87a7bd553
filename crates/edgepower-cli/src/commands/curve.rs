use std::path::Path;

use anyhow::Result;
use tracing::info;

use edgepower_cli::load_config;

pub fn handle(config_path: &Path, ratio: f64) -> Result<()> {
    let table = load_config(config_path)?.build_characteristic()?;
    let value = table.evaluate(ratio)?;
    info!(ratio, value, "characteristic evaluated");
    println!("{value}");
    Ok(())
}

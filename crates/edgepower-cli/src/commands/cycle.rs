use std::path::Path;

use anyhow::Result;
use edgepower_core::{CycleOutcome, Point, Telemetry, Volts, Watts};
use serde::Serialize;
use tracing::info;

use edgepower_cli::{common::write_json, load_config, OutputFormat};

#[derive(Serialize)]
struct CycleReport {
    status: &'static str,
    setpoint: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl From<&CycleOutcome> for CycleReport {
    fn from(outcome: &CycleOutcome) -> Self {
        match outcome {
            CycleOutcome::Applied(point) => Self {
                status: "applied",
                setpoint: Some(*point),
                reason: None,
            },
            CycleOutcome::Held { setpoint, reason } => Self {
                status: "held",
                setpoint: *setpoint,
                reason: Some(reason.to_string()),
            },
        }
    }
}

pub fn handle(
    config_path: &Path,
    active_power: f64,
    voltage: f64,
    format: OutputFormat,
) -> Result<()> {
    let mut controller = load_config(config_path)?.build_controller()?;
    let outcome = controller.run_cycle(&Telemetry {
        requested_active_power: Watts(active_power),
        grid_voltage: Volts(voltage),
    });
    info!(applied = outcome.is_applied(), "cycle finished");

    let report = CycleReport::from(&outcome);
    match format {
        OutputFormat::Plain => {
            match report.setpoint {
                Some(point) => println!(
                    "{}\t{}\t{}",
                    report.status,
                    point.active_power(),
                    point.reactive_power()
                ),
                None => println!("{}\t-\t-", report.status),
            }
            if let Some(reason) = &report.reason {
                println!("reason: {reason}");
            }
            Ok(())
        }
        OutputFormat::Json => write_json(&report),
    }
}

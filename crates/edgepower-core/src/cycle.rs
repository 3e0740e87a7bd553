//! One control cycle of a voltage-characteristic controller.
//!
//! Each cycle reads the envelope and the characteristic once, turns the grid
//! voltage into a reactive-power target and clips the resulting operating point
//! into the envelope. When nothing is feasible the previous setpoint is held and
//! the next cycle tries again; there is no retry inside a cycle.

use crate::error::{ConfigurationError, PowerError};
use crate::geometry::Point;
use crate::shared::{SharedCharacteristic, SharedEnvelope};
use crate::units::{Vars, VoltAmperes, Volts, Watts};
use tracing::{debug, warn};

/// Measurements and requests available at the start of a cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    /// Active power asked for by the scheduler or an upstream controller.
    pub requested_active_power: Watts,
    pub grid_voltage: Volts,
}

/// Why a cycle kept the previous setpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum HoldReason {
    Power(PowerError),
    Configuration(ConfigurationError),
    InvalidTelemetry(Telemetry),
}

impl std::fmt::Display for HoldReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoldReason::Power(err) => write!(f, "{err}"),
            HoldReason::Configuration(err) => write!(f, "{err}"),
            HoldReason::InvalidTelemetry(t) => write!(
                f,
                "telemetry is not finite (P={}, U={})",
                t.requested_active_power, t.grid_voltage
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// A feasible setpoint to write out.
    Applied(Point),
    /// Nothing new to write; `setpoint` is the last known-good one, if any.
    Held {
        setpoint: Option<Point>,
        reason: HoldReason,
    },
}

impl CycleOutcome {
    /// The point the device should run at after this cycle.
    pub fn setpoint(&self) -> Option<Point> {
        match self {
            CycleOutcome::Applied(point) => Some(*point),
            CycleOutcome::Held { setpoint, .. } => *setpoint,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, CycleOutcome::Applied(_))
    }
}

/// Reactive power follows a Q(U) characteristic whose values are percent of the
/// apparent-power rating.
#[derive(Debug, Clone)]
pub struct VoltageCharacteristicController {
    envelope: SharedEnvelope,
    characteristic: SharedCharacteristic,
    nominal_voltage: Volts,
    last_setpoint: Option<Point>,
}

impl VoltageCharacteristicController {
    pub fn new(
        envelope: SharedEnvelope,
        characteristic: SharedCharacteristic,
        nominal_voltage: Volts,
    ) -> Result<Self, ConfigurationError> {
        if !nominal_voltage.is_finite() || nominal_voltage.value() <= 0.0 {
            return Err(ConfigurationError::InvalidNominalVoltage(
                nominal_voltage.value(),
            ));
        }
        Ok(Self {
            envelope,
            characteristic,
            nominal_voltage,
            last_setpoint: None,
        })
    }

    pub fn envelope(&self) -> &SharedEnvelope {
        &self.envelope
    }

    pub fn characteristic(&self) -> &SharedCharacteristic {
        &self.characteristic
    }

    pub fn nominal_voltage(&self) -> Volts {
        self.nominal_voltage
    }

    pub fn last_setpoint(&self) -> Option<Point> {
        self.last_setpoint
    }

    pub fn run_cycle(&mut self, telemetry: &Telemetry) -> CycleOutcome {
        if !telemetry.requested_active_power.is_finite() || !telemetry.grid_voltage.is_finite() {
            return self.hold(HoldReason::InvalidTelemetry(*telemetry));
        }

        let envelope = self.envelope.snapshot();
        let table = self.characteristic.load();

        let ratio = telemetry.grid_voltage.ratio_to(self.nominal_voltage);
        let percent = match table.evaluate(ratio.value()) {
            Ok(value) => value,
            Err(err) => return self.hold(HoldReason::Configuration(err)),
        };
        let rating = VoltAmperes(envelope.max_apparent_power() as f64);
        let target = Point::from_units(
            telemetry.requested_active_power,
            Vars(rating.percent(percent)),
        );
        debug!(ratio = ratio.value(), percent, %target, "characteristic evaluated");

        match envelope.clip_point(target) {
            Ok(point) => {
                self.last_setpoint = Some(point);
                CycleOutcome::Applied(point)
            }
            Err(err) => self.hold(HoldReason::Power(err)),
        }
    }

    fn hold(&self, reason: HoldReason) -> CycleOutcome {
        warn!(previous = ?self.last_setpoint, "holding setpoint: {reason}");
        CycleOutcome::Held {
            setpoint: self.last_setpoint,
            reason,
        }
    }
}

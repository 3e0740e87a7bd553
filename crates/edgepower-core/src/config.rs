//! Controller configuration.
//!
//! One [`ControllerConfig`] describes one voltage-characteristic controller: the
//! device rating, the ordered limitations and the characteristic breakpoints.
//! [`ControllerConfig::validate`] catches every setup-time error before a cycle
//! runs; the `build_*` methods then construct the runtime objects.
//!
//! In TOML:
//!
//! ```toml
//! max_apparent_power = 10000
//! nominal_voltage = 230.0
//!
//! [[limitation]]
//! kind = "active-power-upper-bound"
//! value = 5000.0
//!
//! [[limitation]]
//! kind = "cos-phi-bound"
//! value = 0.9
//! side = "discharge"
//!
//! [[characteristic]]
//! ratio = 0.9
//! value = 60.0
//!
//! [[characteristic]]
//! ratio = 1.1
//! value = -60.0
//! ```

use crate::capability::{ApparentPowerCapability, FixedCapability};
use crate::characteristic::{Breakpoint, CharacteristicTable};
use crate::cycle::VoltageCharacteristicController;
use crate::envelope::PowerEnvelope;
use crate::error::{ConfigurationError, EdgeResult};
use crate::limitation::{LimitationKind, PowerSide};
use crate::shared::{SharedCharacteristic, SharedEnvelope};
use crate::units::Volts;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Apparent-power rating in VA
    pub max_apparent_power: i64,
    /// Voltage the characteristic ratio is measured against (V)
    #[serde(default = "default_nominal_voltage")]
    pub nominal_voltage: f64,
    /// Limitations in application order
    #[serde(default, rename = "limitation")]
    pub limitations: Vec<LimitationConfig>,
    /// Q(U) breakpoints; values are percent of `max_apparent_power`
    #[serde(default)]
    pub characteristic: Vec<Breakpoint>,
}

fn default_nominal_voltage() -> f64 {
    230.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitationConfig {
    /// Key as listed by `LimitationKind::available()`
    pub kind: String,
    /// Parameter in force; absent leaves the limitation inactive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Only read for `cos-phi-bound`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<PowerSide>,
}

impl LimitationConfig {
    pub fn new(kind: LimitationKind, value: Option<f64>) -> Self {
        let side = match kind {
            LimitationKind::CosPhiBound(side) => Some(side),
            _ => None,
        };
        Self {
            kind: kind.as_str().to_string(),
            value,
            side,
        }
    }

    pub fn limitation_kind(&self) -> Result<LimitationKind, ConfigurationError> {
        LimitationKind::parse(&self.kind, self.side)
    }

    fn validate(&self) -> Result<LimitationKind, ConfigurationError> {
        let kind = self.limitation_kind()?;
        if let Some(value) = self.value {
            kind.validate_parameter(value)?;
        }
        Ok(kind)
    }
}

impl ControllerConfig {
    pub fn new(max_apparent_power: i64) -> Self {
        Self {
            max_apparent_power,
            nominal_voltage: default_nominal_voltage(),
            limitations: Vec::new(),
            characteristic: Vec::new(),
        }
    }

    pub fn with_limitation(mut self, kind: LimitationKind, value: Option<f64>) -> Self {
        self.limitations.push(LimitationConfig::new(kind, value));
        self
    }

    pub fn with_breakpoint(mut self, ratio: f64, value: f64) -> Self {
        self.characteristic.push(Breakpoint::new(ratio, value));
        self
    }

    /// Parse a JSON document and validate it.
    pub fn from_json(input: &str) -> EdgeResult<Self> {
        let config: ControllerConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Fail on the first setup-time error.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.max_apparent_power <= 0 {
            return Err(ConfigurationError::InvalidCapability(
                self.max_apparent_power,
            ));
        }
        if !self.nominal_voltage.is_finite() || self.nominal_voltage <= 0.0 {
            return Err(ConfigurationError::InvalidNominalVoltage(
                self.nominal_voltage,
            ));
        }
        for limitation in &self.limitations {
            limitation.validate()?;
        }
        self.build_characteristic()?;
        Ok(())
    }

    pub fn capability(&self) -> FixedCapability {
        FixedCapability(self.max_apparent_power)
    }

    /// Build the envelope against `capability`, in configuration order.
    pub fn build_envelope(
        &self,
        capability: Arc<dyn ApparentPowerCapability>,
    ) -> Result<PowerEnvelope, ConfigurationError> {
        let mut envelope = PowerEnvelope::new(capability);
        for limitation in &self.limitations {
            let kind = limitation.validate()?;
            let id = envelope.add(kind);
            envelope.set_parameter(id, limitation.value);
        }
        info!(
            limitations = envelope.len(),
            max_apparent_power = envelope.max_apparent_power(),
            "envelope configured"
        );
        Ok(envelope)
    }

    /// Sorted, evaluable characteristic table.
    pub fn build_characteristic(&self) -> Result<CharacteristicTable, ConfigurationError> {
        let table = CharacteristicTable::new(self.characteristic.clone())?;
        table.validate()?;
        Ok(table)
    }

    /// Validate and wire a controller around a fixed capability.
    pub fn build_controller(&self) -> Result<VoltageCharacteristicController, ConfigurationError> {
        self.validate()?;
        let envelope = self.build_envelope(Arc::new(self.capability()))?;
        let characteristic = self.build_characteristic()?;
        info!(
            breakpoints = characteristic.len(),
            nominal_voltage = self.nominal_voltage,
            "controller configured"
        );
        VoltageCharacteristicController::new(
            SharedEnvelope::new(envelope),
            SharedCharacteristic::new(characteristic)?,
            Volts(self.nominal_voltage),
        )
    }
}

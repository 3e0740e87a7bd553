//! Unit-safe wrappers for inverter-side electrical quantities.
//!
//! The controller works at device scale: active power in watts, reactive power in
//! VAr, apparent power in volt-amperes and grid voltage in volts. Keeping them as
//! distinct newtypes stops a reactive setpoint from being handed to something that
//! expects an active one.
//!
//! All types are `#[repr(transparent)]` over `f64`.
//!
//! ```
//! use edgepower_core::units::{Vars, Volts, Watts};
//!
//! let p = Watts(3000.0);
//! let q = Vars(4000.0);
//! assert_eq!(p.apparent_power(q).value(), 5000.0);
//!
//! let ratio = Volts(241.5).ratio_to(Volts(230.0));
//! assert!((ratio.value() - 1.05).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

macro_rules! impl_unit {
    ($type:ty, $unit_name:literal) => {
        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.1} {}", self.0, $unit_name)
            }
        }

        impl $type {
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }
    };
}

// =============================================================================
// Power Units
// =============================================================================

/// Active power in watts (W). Positive discharges into the grid, negative charges.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Watts(pub f64);

impl_unit!(Watts, "W");

/// Reactive power in volt-amperes reactive (VAr).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Vars(pub f64);

impl_unit!(Vars, "var");

/// Apparent power in volt-amperes (VA), the inverter's hardware ceiling.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct VoltAmperes(pub f64);

impl_unit!(VoltAmperes, "VA");

impl Watts {
    /// S = √(P² + Q²)
    #[inline]
    pub fn apparent_power(self, q: Vars) -> VoltAmperes {
        VoltAmperes(self.0.hypot(q.0))
    }
}

impl VoltAmperes {
    /// Percentage of this rating, e.g. `percent(50.0)` of 10 kVA is 5 kVA.
    #[inline]
    pub fn percent(self, percent: f64) -> f64 {
        self.0 * percent / 100.0
    }
}

// =============================================================================
// Voltage Units
// =============================================================================

/// Voltage magnitude in volts (V).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Volts(pub f64);

impl_unit!(Volts, "V");

/// Dimensionless ratio to a nominal value (pu). The characteristic curve input.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PerUnit(pub f64);

impl_unit!(PerUnit, "pu");

impl Volts {
    /// Ratio of this voltage to `nominal`.
    #[inline]
    pub fn ratio_to(self, nominal: Volts) -> PerUnit {
        PerUnit(self.0 / nominal.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apparent_power() {
        let s = Watts(3000.0).apparent_power(Vars(4000.0));
        assert!((s.value() - 5000.0).abs() < 1e-9);
        assert_eq!(Watts(-6000.0).apparent_power(Vars(0.0)).value(), 6000.0);
    }

    #[test]
    fn test_percent_of_rating() {
        assert_eq!(VoltAmperes(10_000.0).percent(60.0), 6000.0);
        assert_eq!(VoltAmperes(10_000.0).percent(-44.0), -4400.0);
    }

    #[test]
    fn test_voltage_ratio() {
        let ratio = Volts(207.0).ratio_to(Volts(230.0));
        assert!((ratio.value() - 0.9).abs() < 1e-12);
        assert!(!Volts(207.0).ratio_to(Volts(0.0)).is_finite());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Watts(5000.0)), "5000.0 W");
        assert_eq!(format!("{}", Vars(-1500.5)), "-1500.5 var");
        assert_eq!(format!("{}", PerUnit(1.0)), "1.0 pu");
    }
}

//! Error types for the envelope engine and the characteristic evaluator.
//!
//! Two domain errors exist and they fail at different times:
//!
//! - [`PowerError`] is cycle-local. An envelope application emptied the region; the
//!   caller keeps the previous setpoint and tries again next cycle.
//! - [`ConfigurationError`] is a setup-time error. It should surface while the
//!   controller is being configured, before any cycle runs.
//!
//! [`EdgeError`] adds document parsing on top of [`ConfigurationError`]; it is what
//! [`ControllerConfig::from_json`](crate::ControllerConfig::from_json) returns.
//!
//! ```
//! use edgepower_core::{ControllerConfig, EdgeError};
//!
//! let err = ControllerConfig::from_json(r#"{"max_apparent_power": 0}"#).unwrap_err();
//! assert!(matches!(err, EdgeError::Configuration(_)));
//! ```

use thiserror::Error;

/// An envelope application left no feasible operating point.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PowerError {
    /// The named limitation's region did not overlap the candidate.
    #[error(
        "The {name} limitation is too small! There needs to be at least one point after the limitation. (bound: {bound})"
    )]
    LimitationTooSmall { name: &'static str, bound: f64 },
}

impl PowerError {
    /// Display name of the limitation that was blamed.
    pub fn limitation_name(&self) -> &'static str {
        match self {
            PowerError::LimitationTooSmall { name, .. } => name,
        }
    }

    /// The numeric bound that emptied the region.
    pub fn bound(&self) -> f64 {
        match self {
            PowerError::LimitationTooSmall { bound, .. } => *bound,
        }
    }
}

/// Invalid controller configuration. Requires operator correction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("characteristic needs at least two breakpoints, found {found}")]
    TooFewBreakpoints { found: usize },

    #[error("characteristic contains duplicate ratio {ratio}")]
    DuplicateRatio { ratio: f64 },

    #[error("characteristic breakpoint ({ratio}, {value}) is not finite")]
    NonFiniteBreakpoint { ratio: f64, value: f64 },

    #[error("maximum apparent power must be positive, got {0} VA")]
    InvalidCapability(i64),

    #[error("nominal voltage must be positive and finite, got {0} V")]
    InvalidNominalVoltage(f64),

    #[error("invalid parameter for {kind}: {reason}")]
    InvalidParameter { kind: String, reason: String },

    #[error("unknown limitation kind '{0}'")]
    UnknownLimitation(String),
}

/// Errors from loading a configuration document.
#[derive(Error, Debug)]
pub enum EdgeError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type EdgeResult<T> = Result<T, EdgeError>;

impl From<serde_json::Error> for EdgeError {
    fn from(err: serde_json::Error) -> Self {
        EdgeError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_error_message_is_stable() {
        let err = PowerError::LimitationTooSmall {
            name: "ActivePower",
            bound: -20000.0,
        };
        assert_eq!(
            err.to_string(),
            "The ActivePower limitation is too small! There needs to be at least one point after the limitation. (bound: -20000)"
        );
        assert_eq!(err.limitation_name(), "ActivePower");
        assert_eq!(err.bound(), -20000.0);
    }

    #[test]
    fn test_configuration_error_display() {
        let err = ConfigurationError::TooFewBreakpoints { found: 1 };
        assert!(err.to_string().contains("at least two breakpoints"));
    }

    #[test]
    fn test_edge_error_conversions() {
        let edge: EdgeError = ConfigurationError::TooFewBreakpoints { found: 0 }.into();
        assert!(matches!(edge, EdgeError::Configuration(_)));
        assert!(edge.to_string().starts_with("Configuration error:"));

        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(EdgeError::from(json_err), EdgeError::Parse(_)));
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> Result<(), ConfigurationError> {
            Err(ConfigurationError::UnknownLimitation("frequency".into()))
        }

        fn outer() -> EdgeResult<()> {
            inner()?;
            Ok(())
        }

        assert!(matches!(outer(), Err(EdgeError::Configuration(_))));
    }
}

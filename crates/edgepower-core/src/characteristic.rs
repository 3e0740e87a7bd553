//! Piecewise-linear characteristic curves.
//!
//! A [`CharacteristicTable`] maps a voltage ratio to a setpoint value through a
//! small, sorted breakpoint table:
//!
//! - an exact ratio match returns the stored value,
//! - a ratio between two breakpoints interpolates linearly,
//! - a ratio outside the table extrapolates along the outermost pair.
//!
//! ```
//! use edgepower_core::characteristic::CharacteristicTable;
//!
//! let table = CharacteristicTable::from_pairs([(0.9, 100.0), (1.0, 0.0), (1.1, -100.0)]).unwrap();
//! assert_eq!(table.evaluate(1.0).unwrap(), 0.0);
//! assert!((table.evaluate(0.8).unwrap() - 200.0).abs() < 1e-9);
//! ```

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// One `(ratio, value)` sample of a characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub ratio: f64,
    pub value: f64,
}

impl Breakpoint {
    pub const fn new(ratio: f64, value: f64) -> Self {
        Self { ratio, value }
    }
}

impl From<(f64, f64)> for Breakpoint {
    fn from((ratio, value): (f64, f64)) -> Self {
        Self { ratio, value }
    }
}

/// Breakpoints sorted ascending by ratio, ratios unique and finite.
///
/// Construction does not insist on two breakpoints; [`validate`](Self::validate)
/// and [`evaluate`](Self::evaluate) do.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Breakpoint>", into = "Vec<Breakpoint>")]
pub struct CharacteristicTable {
    points: Vec<Breakpoint>,
}

impl CharacteristicTable {
    /// Sort `points` by ratio, rejecting non-finite samples and duplicate ratios.
    pub fn new(mut points: Vec<Breakpoint>) -> Result<Self, ConfigurationError> {
        if let Some(bad) = points
            .iter()
            .find(|bp| !bp.ratio.is_finite() || !bp.value.is_finite())
        {
            return Err(ConfigurationError::NonFiniteBreakpoint {
                ratio: bad.ratio,
                value: bad.value,
            });
        }
        points.sort_by(|a, b| a.ratio.total_cmp(&b.ratio));
        if let Some(pair) = points.windows(2).find(|pair| pair[0].ratio == pair[1].ratio) {
            return Err(ConfigurationError::DuplicateRatio {
                ratio: pair[0].ratio,
            });
        }
        Ok(Self { points })
    }

    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(pairs.into_iter().map(Breakpoint::from).collect())
    }

    /// Check that the table can be evaluated.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.points.len() < 2 {
            return Err(ConfigurationError::TooFewBreakpoints {
                found: self.points.len(),
            });
        }
        Ok(())
    }

    pub fn points(&self) -> &[Breakpoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value of the curve at `ratio`.
    ///
    /// A NaN ratio yields NaN.
    pub fn evaluate(&self, ratio: f64) -> Result<f64, ConfigurationError> {
        self.validate()?;
        let points = &self.points;
        let last = points.len() - 1;

        // first breakpoint with ratio >= input
        let idx = points.partition_point(|bp| bp.ratio < ratio);
        if let Some(hit) = points.get(idx) {
            if hit.ratio == ratio {
                return Ok(hit.value);
            }
        }

        let (lower, upper) = match idx {
            0 => (points[0], points[1]),
            i if i > last => (points[last - 1], points[last]),
            i => (points[i - 1], points[i]),
        };
        if lower.ratio == upper.ratio {
            return Ok(lower.value);
        }

        let m = (upper.value - lower.value) / (upper.ratio - lower.ratio);
        let t = lower.value - m * lower.ratio;
        Ok(m * ratio + t)
    }
}

impl TryFrom<Vec<Breakpoint>> for CharacteristicTable {
    type Error = ConfigurationError;

    fn try_from(points: Vec<Breakpoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<CharacteristicTable> for Vec<Breakpoint> {
    fn from(table: CharacteristicTable) -> Self {
        table.points
    }
}

/// Free-function form of [`CharacteristicTable::evaluate`].
pub fn evaluate(table: &CharacteristicTable, ratio: f64) -> Result<f64, ConfigurationError> {
    table.evaluate(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volt_var() -> CharacteristicTable {
        CharacteristicTable::from_pairs([(0.9, 100.0), (1.0, 0.0), (1.1, -100.0)]).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_interpolates_between_breakpoints() {
        let table = volt_var();
        assert!(close(table.evaluate(0.95).unwrap(), 50.0));
        assert!(close(table.evaluate(1.05).unwrap(), -50.0));
    }

    #[test]
    fn test_exact_match_returns_stored_value() {
        let table = volt_var();
        assert_eq!(table.evaluate(1.0).unwrap(), 0.0);
        assert_eq!(table.evaluate(0.9).unwrap(), 100.0);
        assert_eq!(table.evaluate(1.1).unwrap(), -100.0);
    }

    #[test]
    fn test_exact_match_keeps_fraction() {
        let table = CharacteristicTable::from_pairs([(0.9, 43.7), (1.0, 0.0)]).unwrap();
        assert_eq!(table.evaluate(0.9).unwrap(), 43.7);
    }

    #[test]
    fn test_extrapolates_along_outer_pairs() {
        let table = volt_var();
        assert!(close(table.evaluate(0.8).unwrap(), 200.0));
        assert!(close(table.evaluate(1.2).unwrap(), -200.0));
    }

    #[test]
    fn test_two_point_table() {
        let table = CharacteristicTable::from_pairs([(0.9, 60.0), (1.1, -60.0)]).unwrap();
        assert!(close(table.evaluate(1.0).unwrap(), 0.0));
        assert!(close(table.evaluate(0.8).unwrap(), 120.0));
        assert!(close(table.evaluate(1.2).unwrap(), -120.0));
    }

    #[test]
    fn test_evaluate_leaves_table_untouched() {
        let table = volt_var();
        let before = table.clone();
        for ratio in [0.8, 0.9, 0.95, 1.0, 1.05, 1.1, 1.2] {
            table.evaluate(ratio).unwrap();
        }
        assert_eq!(table, before);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let table =
            CharacteristicTable::from_pairs([(1.1, -100.0), (0.9, 100.0), (1.0, 0.0)]).unwrap();
        let ratios: Vec<f64> = table.points().iter().map(|bp| bp.ratio).collect();
        assert_eq!(ratios, vec![0.9, 1.0, 1.1]);
        assert!(close(evaluate(&table, 0.95).unwrap(), 50.0));
    }

    #[test]
    fn test_single_breakpoint_is_configuration_error() {
        let table = CharacteristicTable::from_pairs([(1.0, 0.0)]).unwrap();
        assert_eq!(
            table.evaluate(1.0),
            Err(ConfigurationError::TooFewBreakpoints { found: 1 })
        );
        assert!(CharacteristicTable::default().validate().is_err());
    }

    #[test]
    fn test_duplicate_ratio_rejected() {
        let err = CharacteristicTable::from_pairs([(1.0, 0.0), (0.9, 10.0), (1.0, 5.0)]).unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateRatio { ratio: 1.0 });
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = CharacteristicTable::from_pairs([(f64::NAN, 0.0), (1.0, 0.0)]).unwrap_err();
        assert!(matches!(err, ConfigurationError::NonFiniteBreakpoint { .. }));
        assert!(CharacteristicTable::from_pairs([(0.9, f64::INFINITY), (1.0, 0.0)]).is_err());
    }

    #[test]
    fn test_serde_validates_on_deserialize() {
        let table: CharacteristicTable =
            serde_json::from_str(r#"[{"ratio":1.1,"value":-100},{"ratio":0.9,"value":100}]"#)
                .unwrap();
        assert_eq!(table.points()[0].ratio, 0.9);

        let dup = serde_json::from_str::<CharacteristicTable>(
            r#"[{"ratio":1.0,"value":0},{"ratio":1.0,"value":1}]"#,
        );
        assert!(dup.is_err());

        let json = serde_json::to_string(&table).unwrap();
        assert!(json.starts_with(r#"[{"ratio":0.9"#));
    }
}

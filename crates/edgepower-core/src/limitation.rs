//! Operating-limit constraints in the P/Q plane.
//!
//! A [`Limitation`] turns one numeric parameter into a convex region. The set of
//! kinds is closed ([`LimitationKind`]); every kind shares the same two operations:
//!
//! - [`Limitation::set_parameter`] stores a new parameter and recomputes the region.
//!   Setting the value already in force is a no-op and notifies nobody.
//! - [`Limitation::apply_limit`] intersects a candidate region with the derived
//!   region and fails with [`PowerError`] when nothing is left.
//!
//! | Kind | Parameter | Region |
//! |------|-----------|--------|
//! | `ActivePowerUpperBound` | `p` (W) | `[-S, p] × [-S, S]` |
//! | `ActivePowerLowerBound` | `p` (W) | `[p, S] × [-S, S]` |
//! | `ReactivePowerUpperBound` | `q` (var) | `[-S, S] × [-S, q]` |
//! | `ReactivePowerLowerBound` | `q` (var) | `[-S, S] × [q, S]` |
//! | `ApparentPowerUpperBound` | `s` (VA) | 32-gon inscribed in the circle of radius `s` |
//! | `CosPhiBound(side)` | `cos φ` | `|Q| ≤ |P|·tan φ` on one side of the Q axis, within the square |
//!
//! `S` is the apparent-power capability, read when the region is recomputed.

use crate::capability::ApparentPowerCapability;
use crate::error::{ConfigurationError, PowerError};
use crate::geometry::{ConvexRegion, Point};
use crate::notify::{Listeners, RegionChanged, SubscriptionId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Vertices used to approximate the apparent-power circle.
pub const APPARENT_POWER_SEGMENTS: usize = 32;

/// Which half of the P axis a cos φ bound applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerSide {
    /// P ≥ 0, feeding into the grid.
    #[default]
    Discharge,
    /// P ≤ 0, drawing from the grid.
    Charge,
}

impl std::fmt::Display for PowerSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowerSide::Discharge => f.write_str("discharge"),
            PowerSide::Charge => f.write_str("charge"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitationKind {
    ActivePowerUpperBound,
    ActivePowerLowerBound,
    ReactivePowerUpperBound,
    ReactivePowerLowerBound,
    ApparentPowerUpperBound,
    CosPhiBound(PowerSide),
}

impl LimitationKind {
    /// Parse a configuration key such as `active-power-upper-bound`.
    ///
    /// `side` is only meaningful for `cos-phi-bound` and defaults to discharge.
    pub fn parse(input: &str, side: Option<PowerSide>) -> Result<Self, ConfigurationError> {
        match input.to_ascii_lowercase().as_str() {
            "active-power-upper-bound" => Ok(LimitationKind::ActivePowerUpperBound),
            "active-power-lower-bound" => Ok(LimitationKind::ActivePowerLowerBound),
            "reactive-power-upper-bound" => Ok(LimitationKind::ReactivePowerUpperBound),
            "reactive-power-lower-bound" => Ok(LimitationKind::ReactivePowerLowerBound),
            "apparent-power-upper-bound" => Ok(LimitationKind::ApparentPowerUpperBound),
            "cos-phi-bound" => Ok(LimitationKind::CosPhiBound(side.unwrap_or_default())),
            other => Err(ConfigurationError::UnknownLimitation(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LimitationKind::ActivePowerUpperBound => "active-power-upper-bound",
            LimitationKind::ActivePowerLowerBound => "active-power-lower-bound",
            LimitationKind::ReactivePowerUpperBound => "reactive-power-upper-bound",
            LimitationKind::ReactivePowerLowerBound => "reactive-power-lower-bound",
            LimitationKind::ApparentPowerUpperBound => "apparent-power-upper-bound",
            LimitationKind::CosPhiBound(_) => "cos-phi-bound",
        }
    }

    pub fn available() -> &'static [&'static str] {
        &[
            "active-power-upper-bound",
            "active-power-lower-bound",
            "reactive-power-upper-bound",
            "reactive-power-lower-bound",
            "apparent-power-upper-bound",
            "cos-phi-bound",
        ]
    }

    /// Name used in [`PowerError`] messages.
    pub fn name(&self) -> &'static str {
        match self {
            LimitationKind::ActivePowerUpperBound => "ActivePower",
            LimitationKind::ActivePowerLowerBound => "MinActivePower",
            LimitationKind::ReactivePowerUpperBound => "ReactivePower",
            LimitationKind::ReactivePowerLowerBound => "MinReactivePower",
            LimitationKind::ApparentPowerUpperBound => "ApparentPower",
            LimitationKind::CosPhiBound(_) => "CosPhi",
        }
    }

    /// Check a parameter before it is accepted from configuration.
    pub fn validate_parameter(&self, value: f64) -> Result<(), ConfigurationError> {
        let reason = if !value.is_finite() {
            Some("value must be finite".to_string())
        } else {
            match self {
                LimitationKind::ApparentPowerUpperBound if value < 0.0 => {
                    Some(format!("apparent power {value} must not be negative"))
                }
                LimitationKind::CosPhiBound(_) if !(value > 0.0 && value <= 1.0) => {
                    Some(format!("cos phi {value} must lie in (0, 1]"))
                }
                _ => None,
            }
        };
        match reason {
            Some(reason) => Err(ConfigurationError::InvalidParameter {
                kind: self.as_str().to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// The region admitted by `parameter` for a device rated at `max_apparent_power` VA.
    pub fn region(&self, parameter: f64, max_apparent_power: f64) -> ConvexRegion {
        let s = max_apparent_power;
        match self {
            LimitationKind::ActivePowerUpperBound => ConvexRegion::rectangle(-s, parameter, -s, s),
            LimitationKind::ActivePowerLowerBound => ConvexRegion::rectangle(parameter, s, -s, s),
            LimitationKind::ReactivePowerUpperBound => {
                ConvexRegion::rectangle(-s, s, -s, parameter)
            }
            LimitationKind::ReactivePowerLowerBound => ConvexRegion::rectangle(-s, s, parameter, s),
            LimitationKind::ApparentPowerUpperBound => {
                ConvexRegion::regular_polygon(parameter, APPARENT_POWER_SEGMENTS)
            }
            LimitationKind::CosPhiBound(side) => cos_phi_wedge(parameter, *side, s),
        }
    }

    /// Stable human-readable summary.
    pub fn describe(&self, parameter: Option<f64>) -> String {
        let noun = match self {
            LimitationKind::ActivePowerUpperBound | LimitationKind::ActivePowerLowerBound => {
                "activepower"
            }
            LimitationKind::ReactivePowerUpperBound | LimitationKind::ReactivePowerLowerBound => {
                "reactivepower"
            }
            LimitationKind::ApparentPowerUpperBound => "apparentpower",
            LimitationKind::CosPhiBound(_) => "cosphi",
        };
        let Some(value) = parameter else {
            return format!("No {noun} limit.");
        };
        match self {
            LimitationKind::ActivePowerLowerBound | LimitationKind::ReactivePowerLowerBound => {
                format!("No {noun} below {value}.")
            }
            LimitationKind::CosPhiBound(side) => format!("No {noun} below {value} ({side})."),
            _ => format!("No {noun} above {value}."),
        }
    }
}

impl std::fmt::Display for LimitationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitationKind::CosPhiBound(side) => write!(f, "{} ({side})", self.as_str()),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// `|Q| ≤ |P| · tan(acos(cos_phi))` on one side of the Q axis, clipped to the capability square.
fn cos_phi_wedge(cos_phi: f64, side: PowerSide, s: f64) -> ConvexRegion {
    if !(cos_phi > 0.0 && cos_phi <= 1.0) || s < 0.0 {
        return ConvexRegion::empty();
    }
    let slope = (1.0 - cos_phi * cos_phi).sqrt() / cos_phi;
    let sign = match side {
        PowerSide::Discharge => 1.0,
        PowerSide::Charge => -1.0,
    };
    let wedge = ConvexRegion::from_vertices([
        Point::ORIGIN,
        Point::new(sign * s, -slope * s),
        Point::new(sign * s, slope * s),
    ]);
    wedge.intersect(&ConvexRegion::square(s))
}

fn same_parameter(current: Option<f64>, next: Option<f64>) -> bool {
    match (current, next) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// The data part of a limitation: kind, parameter in force and the region derived from it.
///
/// Cloning it freezes the limitation for a cycle; see `EnvelopeSnapshot`.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitationState {
    kind: LimitationKind,
    parameter: Option<f64>,
    region: Option<ConvexRegion>,
}

impl LimitationState {
    pub fn kind(&self) -> LimitationKind {
        self.kind
    }

    pub fn parameter(&self) -> Option<f64> {
        self.parameter
    }

    pub fn region(&self) -> Option<&ConvexRegion> {
        self.region.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.region.is_some()
    }

    /// Intersect `candidate` with this limitation's region.
    ///
    /// An inactive limitation passes the candidate through. A candidate with an
    /// interior must keep one; a point or segment candidate fails only if no point
    /// survives. Only the candidate decides, so a chain of limitations succeeds or
    /// fails the same way in any order.
    pub fn apply_limit(&self, candidate: &ConvexRegion) -> Result<ConvexRegion, PowerError> {
        let (Some(region), Some(bound)) = (&self.region, self.parameter) else {
            return Ok(candidate.clone());
        };
        let limited = candidate.intersect(region);
        let emptied = if candidate.is_empty() {
            !limited.has_points()
        } else {
            limited.is_empty()
        };
        if emptied {
            return Err(PowerError::LimitationTooSmall {
                name: self.kind.name(),
                bound,
            });
        }
        Ok(limited)
    }

    pub fn describe(&self) -> String {
        self.kind.describe(self.parameter)
    }
}

/// One constraint bound to the capability it is measured against.
pub struct Limitation {
    state: LimitationState,
    capability: Arc<dyn ApparentPowerCapability>,
    listeners: Listeners,
}

impl Limitation {
    /// An inactive limitation of `kind`.
    pub fn new(kind: LimitationKind, capability: Arc<dyn ApparentPowerCapability>) -> Self {
        Self {
            state: LimitationState {
                kind,
                parameter: None,
                region: None,
            },
            capability,
            listeners: Listeners::new(),
        }
    }

    pub fn kind(&self) -> LimitationKind {
        self.state.kind
    }

    pub fn parameter(&self) -> Option<f64> {
        self.state.parameter
    }

    pub fn region(&self) -> Option<&ConvexRegion> {
        self.state.region()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn state(&self) -> &LimitationState {
        &self.state
    }

    /// Store `value` and recompute the region. Returns whether anything changed.
    ///
    /// `None` switches the limitation off. A value equal to the one in force
    /// (or `None` twice) is ignored without notifying listeners. A non-finite value
    /// is refused and the parameter in force stays.
    pub fn set_parameter(&mut self, value: Option<f64>) -> bool {
        if let Some(v) = value.filter(|v| !v.is_finite()) {
            warn!(kind = %self.state.kind, parameter = v, "non-finite limitation parameter refused");
            return false;
        }
        if same_parameter(self.state.parameter, value) {
            return false;
        }
        self.state.region = value.map(|v| self.compute_region(v));
        self.state.parameter = value;
        debug!(
            kind = %self.state.kind,
            parameter = ?value,
            vertices = self.state.region.as_ref().map(|r| r.vertices().len()),
            "limitation region recomputed"
        );
        self.notify();
        true
    }

    /// Re-read the capability and recompute the region of an active limitation.
    ///
    /// Notifies and returns true only if the region actually moved.
    pub fn refresh(&mut self) -> bool {
        let Some(value) = self.state.parameter else {
            return false;
        };
        let region = self.compute_region(value);
        if self.state.region.as_ref() == Some(&region) {
            return false;
        }
        debug!(kind = %self.state.kind, "limitation region refreshed after capability change");
        self.state.region = Some(region);
        self.notify();
        true
    }

    pub fn apply_limit(&self, candidate: &ConvexRegion) -> Result<ConvexRegion, PowerError> {
        self.state.apply_limit(candidate)
    }

    pub fn describe(&self) -> String {
        self.state.describe()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&RegionChanged) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn compute_region(&self, value: f64) -> ConvexRegion {
        let s = self.capability.max_apparent_power() as f64;
        self.state.kind.region(value, s)
    }

    fn notify(&self) {
        self.listeners.notify(&RegionChanged {
            kind: self.state.kind,
            parameter: self.state.parameter,
        });
    }
}

impl std::fmt::Display for Limitation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

impl std::fmt::Debug for Limitation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Limitation")
            .field("state", &self.state)
            .field("max_apparent_power", &self.capability.max_apparent_power())
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::FixedCapability;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

    const SMAX: i64 = 10_000;

    fn limitation(kind: LimitationKind) -> Limitation {
        Limitation::new(kind, Arc::new(FixedCapability(SMAX)))
    }

    fn base() -> ConvexRegion {
        ConvexRegion::square(SMAX as f64)
    }

    #[test]
    fn test_describe_active_power_upper_bound() {
        let mut limit = limitation(LimitationKind::ActivePowerUpperBound);
        limit.set_parameter(Some(5000.0));
        assert_eq!(limit.describe(), "No activepower above 5000.");
        assert_eq!(limit.to_string(), "No activepower above 5000.");
    }

    #[test]
    fn test_describe_other_kinds() {
        assert_eq!(
            LimitationKind::ActivePowerLowerBound.describe(Some(-2500.0)),
            "No activepower below -2500."
        );
        assert_eq!(
            LimitationKind::ReactivePowerUpperBound.describe(Some(300.5)),
            "No reactivepower above 300.5."
        );
        assert_eq!(
            LimitationKind::ApparentPowerUpperBound.describe(Some(8000.0)),
            "No apparentpower above 8000."
        );
        assert_eq!(
            LimitationKind::CosPhiBound(PowerSide::Charge).describe(Some(0.9)),
            "No cosphi below 0.9 (charge)."
        );
        assert_eq!(
            LimitationKind::ReactivePowerLowerBound.describe(None),
            "No reactivepower limit."
        );
    }

    #[test]
    fn test_active_power_upper_bound_region_matches_corners() {
        let mut limit = limitation(LimitationKind::ActivePowerUpperBound);
        limit.set_parameter(Some(5000.0));
        let expected = ConvexRegion::from_vertices([
            Point::new(-10_000.0, -10_000.0),
            Point::new(-10_000.0, 10_000.0),
            Point::new(5000.0, 10_000.0),
            Point::new(5000.0, -10_000.0),
        ]);
        assert_eq!(limit.region(), Some(&expected));
    }

    #[test]
    fn test_inactive_limitation_passes_candidate_through() {
        let limit = limitation(LimitationKind::ActivePowerUpperBound);
        let candidate = base();
        assert_eq!(limit.apply_limit(&candidate).unwrap(), candidate);
        assert!(!limit.is_active());
    }

    #[test]
    fn test_apply_limit_intersects() {
        let mut limit = limitation(LimitationKind::ReactivePowerUpperBound);
        limit.set_parameter(Some(2000.0));
        let limited = limit.apply_limit(&base()).unwrap();
        let expected = ConvexRegion::rectangle(-10_000.0, 10_000.0, -10_000.0, 2000.0);
        assert!(limited.approx_eq(&expected, 1e-6));
    }

    #[test]
    fn test_too_restrictive_bound_fails_with_power_error() {
        let mut limit = limitation(LimitationKind::ActivePowerUpperBound);
        limit.set_parameter(Some(-20_000.0));
        let err = limit.apply_limit(&base()).unwrap_err();
        assert_eq!(
            err,
            PowerError::LimitationTooSmall {
                name: "ActivePower",
                bound: -20_000.0
            }
        );
        assert!(err.to_string().starts_with("The ActivePower limitation is too small!"));
    }

    #[test]
    fn test_bound_excluding_current_region_fails() {
        let mut limit = limitation(LimitationKind::ActivePowerUpperBound);
        limit.set_parameter(Some(1000.0));
        let charging_only = ConvexRegion::rectangle(2000.0, 4000.0, -100.0, 100.0);
        assert!(limit.apply_limit(&charging_only).is_err());
    }

    #[test]
    fn test_point_candidate_is_validated_by_containment() {
        let mut limit = limitation(LimitationKind::ActivePowerUpperBound);
        limit.set_parameter(Some(5000.0));

        let inside = ConvexRegion::point(Point::new(4000.0, 100.0));
        let limited = limit.apply_limit(&inside).unwrap();
        assert!(limited.approx_eq(&inside, 1e-9));

        let outside = ConvexRegion::point(Point::new(6000.0, 100.0));
        assert!(limit.apply_limit(&outside).is_err());
    }

    #[test]
    fn test_same_parameter_is_idempotent() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut limit = limitation(LimitationKind::ActivePowerUpperBound);
        let counter = fired.clone();
        limit.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(limit.set_parameter(Some(5000.0)));
        let region = limit.region().cloned();
        assert!(!limit.set_parameter(Some(5000.0)));
        assert_eq!(limit.region().cloned(), region);
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        assert!(limit.set_parameter(None));
        assert!(!limit.set_parameter(None));
        assert_eq!(fired.load(Ordering::SeqCst), 2);
        assert!(limit.region().is_none());
    }

    #[test]
    fn test_listener_sees_new_parameter() {
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let mut limit = limitation(LimitationKind::ReactivePowerLowerBound);
        let sink = seen.clone();
        limit.subscribe(move |event| sink.lock().push(*event));

        limit.set_parameter(Some(-300.0));
        assert_eq!(
            *seen.lock(),
            vec![RegionChanged {
                kind: LimitationKind::ReactivePowerLowerBound,
                parameter: Some(-300.0),
            }]
        );
    }

    #[test]
    fn test_refresh_follows_capability_changes() {
        let rating = Arc::new(AtomicI64::new(SMAX));
        let mut limit = Limitation::new(LimitationKind::ReactivePowerUpperBound, rating.clone());
        limit.set_parameter(Some(0.0));
        assert_eq!(limit.region().and_then(|r| r.bounds()).map(|b| b.0), Some(-10_000.0));

        rating.store(6000, Ordering::Release);
        assert_eq!(limit.region().and_then(|r| r.bounds()).map(|b| b.0), Some(-10_000.0));
        assert!(limit.refresh());
        assert_eq!(limit.region().and_then(|r| r.bounds()).map(|b| b.0), Some(-6000.0));
        assert!(!limit.refresh());
    }

    #[test]
    fn test_apparent_power_bound_stays_inside_circle() {
        let mut limit = limitation(LimitationKind::ApparentPowerUpperBound);
        limit.set_parameter(Some(8000.0));
        let limited = limit.apply_limit(&base()).unwrap();
        assert!(limited
            .vertices()
            .iter()
            .all(|v| v.p.hypot(v.q) <= 8000.0 + 1e-6));
        assert!(limited.contains(Point::new(7000.0, 0.0)));
        assert!(!limited.contains(Point::new(6000.0, 6000.0)));
    }

    #[test]
    fn test_cos_phi_wedge_on_discharge_side() {
        let mut limit = limitation(LimitationKind::CosPhiBound(PowerSide::Discharge));
        limit.set_parameter(Some(0.8));
        let region = limit.region().unwrap();
        // tan(acos 0.8) = 0.75
        assert!(region.contains(Point::new(4000.0, 3000.0)));
        assert!(!region.contains(Point::new(4000.0, 3100.0)));
        assert!(!region.contains(Point::new(-4000.0, 0.0)));
    }

    #[test]
    fn test_unity_cos_phi_admits_only_zero_reactive_power() {
        let mut limit = limitation(LimitationKind::CosPhiBound(PowerSide::Discharge));
        limit.set_parameter(Some(1.0));
        assert!(limit.region().unwrap().is_empty());

        // no interior left for an area candidate
        assert!(limit.apply_limit(&base()).is_err());

        let on_axis = ConvexRegion::point(Point::new(5000.0, 0.0));
        assert!(limit.apply_limit(&on_axis).unwrap().has_points());
        assert!(limit
            .apply_limit(&ConvexRegion::point(Point::new(5000.0, 100.0)))
            .is_err());
    }

    #[test]
    fn test_bound_at_capability_edge_leaves_no_interior() {
        let mut limit = limitation(LimitationKind::ActivePowerUpperBound);
        limit.set_parameter(Some(-10_000.0));
        assert_eq!(
            limit.apply_limit(&base()).unwrap_err(),
            PowerError::LimitationTooSmall {
                name: "ActivePower",
                bound: -10_000.0
            }
        );
    }

    #[test]
    fn test_non_finite_parameter_is_refused() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut limit = limitation(LimitationKind::ActivePowerUpperBound);
        let counter = fired.clone();
        limit.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!limit.set_parameter(Some(f64::NAN)));
        assert!(!limit.is_active());

        assert!(limit.set_parameter(Some(5000.0)));
        let region = limit.region().cloned();
        assert!(!limit.set_parameter(Some(f64::INFINITY)));
        assert!(!limit.set_parameter(Some(f64::NEG_INFINITY)));
        assert_eq!(limit.parameter(), Some(5000.0));
        assert_eq!(limit.region().cloned(), region);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cos_phi_wedge_is_clipped_to_capability() {
        let region = LimitationKind::CosPhiBound(PowerSide::Charge).region(0.5, 10_000.0);
        let (p_min, p_max, q_min, q_max) = region.bounds().unwrap();
        assert_eq!((p_min, p_max), (-10_000.0, 0.0));
        assert!(q_min >= -10_000.0 - 1e-6 && q_max <= 10_000.0 + 1e-6);
        assert!(region.contains(Point::new(-8000.0, 9000.0)));
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!(
            LimitationKind::parse("Active-Power-Upper-Bound", None).unwrap(),
            LimitationKind::ActivePowerUpperBound
        );
        assert_eq!(
            LimitationKind::parse("cos-phi-bound", Some(PowerSide::Charge)).unwrap(),
            LimitationKind::CosPhiBound(PowerSide::Charge)
        );
        assert!(matches!(
            LimitationKind::parse("frequency-droop", None),
            Err(ConfigurationError::UnknownLimitation(_))
        ));
        for name in LimitationKind::available() {
            assert_eq!(LimitationKind::parse(name, None).unwrap().as_str(), *name);
        }
    }

    #[test]
    fn test_validate_parameter() {
        assert!(LimitationKind::CosPhiBound(PowerSide::Discharge)
            .validate_parameter(0.95)
            .is_ok());
        assert!(LimitationKind::CosPhiBound(PowerSide::Discharge)
            .validate_parameter(1.2)
            .is_err());
        assert!(LimitationKind::ApparentPowerUpperBound
            .validate_parameter(-1.0)
            .is_err());
        assert!(LimitationKind::ActivePowerUpperBound
            .validate_parameter(f64::NAN)
            .is_err());
        assert!(LimitationKind::ActivePowerUpperBound
            .validate_parameter(-20_000.0)
            .is_ok());
    }
}

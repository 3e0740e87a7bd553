//! Aggregation of limitations into one feasible region.
//!
//! [`PowerEnvelope`] owns its limitations in insertion order and applies them in
//! that order. The resulting region is the intersection of all active regions, so
//! the order only decides which limitation is blamed when the intersection runs
//! empty: the first one that empties it.

use crate::capability::ApparentPowerCapability;
use crate::error::PowerError;
use crate::geometry::{ConvexRegion, Point};
use crate::limitation::{Limitation, LimitationKind, LimitationState};
use crate::notify::{Listeners, RegionChanged, SubscriptionId};
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle to a limitation inside one envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LimitationId(usize);

impl LimitationId {
    pub fn index(&self) -> usize {
        self.0
    }
}

fn apply_sequence<'a, I>(states: I, candidate: &ConvexRegion) -> Result<ConvexRegion, PowerError>
where
    I: IntoIterator<Item = &'a LimitationState>,
{
    states.into_iter().try_fold(candidate.clone(), |region, state| {
        let limited = state.apply_limit(&region).map_err(|err| {
            warn!(kind = %state.kind(), "envelope emptied: {err}");
            err
        })?;
        if state.is_active() {
            debug!(
                kind = %state.kind(),
                vertices = limited.vertices().len(),
                area = limited.area(),
                "limitation applied"
            );
        }
        Ok(limited)
    })
}

fn clip_into(region: &ConvexRegion, point: Point) -> Point {
    let clipped = region.nearest_point(point);
    if clipped != point {
        debug!(%point, %clipped, "setpoint clipped into envelope");
    }
    clipped
}

pub struct PowerEnvelope {
    capability: Arc<dyn ApparentPowerCapability>,
    limitations: Vec<Limitation>,
    listeners: Listeners,
}

impl PowerEnvelope {
    pub fn new(capability: Arc<dyn ApparentPowerCapability>) -> Self {
        Self {
            capability,
            limitations: Vec::new(),
            listeners: Listeners::new(),
        }
    }

    /// Append an inactive limitation; it is applied after all earlier ones.
    pub fn add(&mut self, kind: LimitationKind) -> LimitationId {
        self.limitations
            .push(Limitation::new(kind, self.capability.clone()));
        LimitationId(self.limitations.len() - 1)
    }

    /// Builder form of [`add`](Self::add) followed by [`set_parameter`](Self::set_parameter).
    pub fn with_limitation(mut self, kind: LimitationKind, parameter: Option<f64>) -> Self {
        let id = self.add(kind);
        self.set_parameter(id, parameter);
        self
    }

    pub fn max_apparent_power(&self) -> i64 {
        self.capability.max_apparent_power()
    }

    pub fn len(&self) -> usize {
        self.limitations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limitations.is_empty()
    }

    pub fn limitation(&self, id: LimitationId) -> Option<&Limitation> {
        self.limitations.get(id.0)
    }

    pub fn limitations(&self) -> impl Iterator<Item = (LimitationId, &Limitation)> {
        self.limitations
            .iter()
            .enumerate()
            .map(|(idx, limitation)| (LimitationId(idx), limitation))
    }

    /// Set one limitation's parameter. Returns whether anything changed.
    ///
    /// An effective change reaches the limitation's own listeners first, then the
    /// envelope's. Unknown ids change nothing.
    pub fn set_parameter(&mut self, id: LimitationId, value: Option<f64>) -> bool {
        let Some(limitation) = self.limitations.get_mut(id.0) else {
            return false;
        };
        if !limitation.set_parameter(value) {
            return false;
        }
        self.listeners.notify(&RegionChanged {
            kind: limitation.kind(),
            parameter: value,
        });
        true
    }

    /// Re-read the capability for every limitation; notifies once per moved region.
    pub fn refresh(&mut self) -> usize {
        let mut moved = 0;
        for limitation in &mut self.limitations {
            if limitation.refresh() {
                moved += 1;
                self.listeners.notify(&RegionChanged {
                    kind: limitation.kind(),
                    parameter: limitation.parameter(),
                });
            }
        }
        moved
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

    /// Subscribe to a single limitation. `None` for unknown ids.
    pub fn subscribe_limitation<F>(&mut self, id: LimitationId, listener: F) -> Option<SubscriptionId>
    where
        F: Fn(&RegionChanged) + Send + Sync + 'static,
    {
        self.limitations
            .get_mut(id.0)
            .map(|limitation| limitation.subscribe(listener))
    }

    /// The capability square `[-S, S] × [-S, S]`.
    ///
    /// The apparent-power circle is not applied here; add an
    /// `ApparentPowerUpperBound` limitation for that.
    pub fn base_region(&self) -> ConvexRegion {
        ConvexRegion::square(self.capability.max_apparent_power() as f64)
    }

    /// Fold every limitation over `candidate`, failing on the first one that empties it.
    pub fn apply_all(&self, candidate: &ConvexRegion) -> Result<ConvexRegion, PowerError> {
        apply_sequence(self.limitations.iter().map(Limitation::state), candidate)
    }

    /// `apply_all(base_region())`.
    pub fn feasible_region(&self) -> Result<ConvexRegion, PowerError> {
        self.apply_all(&self.base_region())
    }

    /// Accept `point` only if every limitation admits it.
    pub fn validate_point(&self, point: Point) -> Result<Point, PowerError> {
        self.apply_all(&ConvexRegion::point(point))?;
        Ok(point)
    }

    /// The feasible point closest to `point`.
    pub fn clip_point(&self, point: Point) -> Result<Point, PowerError> {
        Ok(clip_into(&self.feasible_region()?, point))
    }

    pub fn describe(&self) -> Vec<String> {
        self.limitations.iter().map(Limitation::describe).collect()
    }

    /// Freeze the current regions for one control cycle.
    pub fn snapshot(&self) -> EnvelopeSnapshot {
        EnvelopeSnapshot {
            max_apparent_power: self.capability.max_apparent_power(),
            limitations: self
                .limitations
                .iter()
                .map(|limitation| limitation.state().clone())
                .collect(),
        }
    }
}

impl std::fmt::Debug for PowerEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerEnvelope")
            .field("max_apparent_power", &self.capability.max_apparent_power())
            .field("limitations", &self.limitations)
            .field("listeners", &self.listeners)
            .finish()
    }
}

/// Immutable copy of an envelope, read once at the start of a cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeSnapshot {
    max_apparent_power: i64,
    limitations: Vec<LimitationState>,
}

impl EnvelopeSnapshot {
    pub fn max_apparent_power(&self) -> i64 {
        self.max_apparent_power
    }

    pub fn limitations(&self) -> &[LimitationState] {
        &self.limitations
    }

    pub fn base_region(&self) -> ConvexRegion {
        ConvexRegion::square(self.max_apparent_power as f64)
    }

    pub fn apply_all(&self, candidate: &ConvexRegion) -> Result<ConvexRegion, PowerError> {
        apply_sequence(&self.limitations, candidate)
    }

    pub fn feasible_region(&self) -> Result<ConvexRegion, PowerError> {
        self.apply_all(&self.base_region())
    }

    pub fn validate_point(&self, point: Point) -> Result<Point, PowerError> {
        self.apply_all(&ConvexRegion::point(point))?;
        Ok(point)
    }

    pub fn clip_point(&self, point: Point) -> Result<Point, PowerError> {
        Ok(clip_into(&self.feasible_region()?, point))
    }
}

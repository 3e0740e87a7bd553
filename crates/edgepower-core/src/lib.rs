//! # edgepower-core: Power Envelope and Characteristic Engine
//!
//! Computes where a grid-connected battery inverter may operate and where it
//! should operate, once per control cycle.
//!
//! ## Design Philosophy
//!
//! Operating limits are modeled as **convex regions in the P/Q plane**:
//! - **P**: active power in W (positive discharges into the grid)
//! - **Q**: reactive power in var
//!
//! Every limitation turns one parameter into a region; the feasible envelope is
//! the intersection of all of them. This gives:
//! - Order-independent results (only the blamed limitation depends on order)
//! - Exact handling of axis-aligned bounds
//! - Cheap point validation and clipping
//!
//! ## Quick Start
//!
//! ```rust
//! use edgepower_core::*;
//! use std::sync::Arc;
//!
//! let mut envelope = PowerEnvelope::new(Arc::new(FixedCapability(10_000)));
//! let active = envelope.add(LimitationKind::ActivePowerUpperBound);
//! envelope.set_parameter(active, Some(5000.0));
//!
//! assert_eq!(envelope.describe(), vec!["No activepower above 5000."]);
//!
//! let clipped = envelope.clip_point(Point::new(8000.0, 0.0)).unwrap();
//! assert!(clipped.approx_eq(Point::new(5000.0, 0.0), 1e-6));
//!
//! let curve = CharacteristicTable::from_pairs([(0.9, 100.0), (1.0, 0.0), (1.1, -100.0)]).unwrap();
//! assert!((curve.evaluate(0.95).unwrap() - 50.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Points and convex regions with intersection and clipping
//! - [`limitation`] - The closed set of operating limits
//! - [`envelope`] - Ordered aggregation of limitations
//! - [`characteristic`] - Piecewise-linear breakpoint curves
//! - [`shared`] - Lock-guarded handles and per-cycle snapshots
//! - [`cycle`] - The voltage-characteristic control cycle
//! - [`config`] - Serde configuration and builders
//!
//! ## Errors
//!
//! [`PowerError`] is cycle-local: the caller holds its previous setpoint.
//! [`ConfigurationError`] is raised while configuring, before any cycle runs.
//! [`EdgeError`] wraps the latter with parse failures when loading a JSON document.

pub mod capability;
pub mod characteristic;
pub mod config;
pub mod cycle;
pub mod envelope;
pub mod error;
pub mod geometry;
pub mod limitation;
pub mod notify;
pub mod shared;
pub mod units;

pub use capability::{ApparentPowerCapability, FixedCapability};
pub use characteristic::{evaluate, Breakpoint, CharacteristicTable};
pub use config::{ControllerConfig, LimitationConfig};
pub use cycle::{CycleOutcome, HoldReason, Telemetry, VoltageCharacteristicController};
pub use envelope::{EnvelopeSnapshot, LimitationId, PowerEnvelope};
pub use error::{ConfigurationError, EdgeError, EdgeResult, PowerError};
pub use geometry::{ConvexRegion, Point};
pub use limitation::{Limitation, LimitationKind, LimitationState, PowerSide};
pub use notify::{RegionChanged, SubscriptionId};
pub use shared::{SharedCharacteristic, SharedEnvelope};
pub use units::{PerUnit, Vars, VoltAmperes, Volts, Watts};

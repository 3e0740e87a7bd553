use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the inverter's apparent-power rating in VA.
///
/// Limitations read it whenever they recompute their region. It is not cached
/// across rating changes; call `refresh` on the limitation or envelope after the
/// rating moves.
pub trait ApparentPowerCapability: Send + Sync {
    fn max_apparent_power(&self) -> i64;
}

/// A rating that never changes after configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCapability(pub i64);

impl ApparentPowerCapability for FixedCapability {
    fn max_apparent_power(&self) -> i64 {
        self.0
    }
}

/// A rating that telemetry may update, e.g. temperature derating.
impl ApparentPowerCapability for AtomicI64 {
    fn max_apparent_power(&self) -> i64 {
        self.load(Ordering::Acquire)
    }
}

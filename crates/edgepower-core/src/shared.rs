//! Thread-safe handles for the envelope and the characteristic.
//!
//! Configuration changes may arrive from a management thread while a control
//! cycle is running. Both handles serialize writers against readers with a
//! `parking_lot::RwLock`; a cycle takes one snapshot at its start and works on
//! that for the rest of the cycle.

use crate::characteristic::CharacteristicTable;
use crate::envelope::{EnvelopeSnapshot, LimitationId, PowerEnvelope};
use crate::error::ConfigurationError;
use crate::notify::{RegionChanged, SubscriptionId};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Cloneable handle to one controller's envelope.
///
/// Listeners run while the write guard is held and must not lock the same
/// envelope again.
#[derive(Clone)]
pub struct SharedEnvelope {
    inner: Arc<RwLock<PowerEnvelope>>,
}

impl SharedEnvelope {
    pub fn new(envelope: PowerEnvelope) -> Self {
        Self {
            inner: Arc::new(RwLock::new(envelope)),
        }
    }

    pub fn set_parameter(&self, id: LimitationId, value: Option<f64>) -> bool {
        self.inner.write().set_parameter(id, value)
    }

    pub fn refresh(&self) -> usize {
        self.inner.write().refresh()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&RegionChanged) + Send + Sync + 'static,
    {
        self.inner.write().subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.write().unsubscribe(id)
    }

    /// Run `f` with exclusive access, e.g. to change several parameters at once.
    pub fn update<R>(&self, f: impl FnOnce(&mut PowerEnvelope) -> R) -> R {
        f(&mut self.inner.write())
    }

    pub fn read<R>(&self, f: impl FnOnce(&PowerEnvelope) -> R) -> R {
        f(&self.inner.read())
    }

    /// Frozen copy of the envelope for one cycle.
    pub fn snapshot(&self) -> EnvelopeSnapshot {
        self.inner.read().snapshot()
    }
}

impl std::fmt::Debug for SharedEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEnvelope")
            .field("envelope", &*self.inner.read())
            .finish()
    }
}

/// Published characteristic table; readers hold an `Arc` to the version they loaded.
#[derive(Debug, Clone)]
pub struct SharedCharacteristic {
    current: Arc<RwLock<Arc<CharacteristicTable>>>,
}

impl SharedCharacteristic {
    /// Publish `table` after checking that it can be evaluated.
    pub fn new(table: CharacteristicTable) -> Result<Self, ConfigurationError> {
        table.validate()?;
        Ok(Self {
            current: Arc::new(RwLock::new(Arc::new(table))),
        })
    }

    /// Swap in a new table. An invalid table is rejected and the old one stays.
    pub fn replace(&self, table: CharacteristicTable) -> Result<(), ConfigurationError> {
        table.validate()?;
        info!(breakpoints = table.len(), "characteristic replaced");
        *self.current.write() = Arc::new(table);
        Ok(())
    }

    pub fn load(&self) -> Arc<CharacteristicTable> {
        Arc::clone(&self.current.read())
    }
}

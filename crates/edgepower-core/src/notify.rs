//! Synchronous change notification.
//!
//! Listeners run on the mutating thread, at mutation time, in subscription order.
//! Nothing is debounced: three effective parameter changes produce three events.

use crate::limitation::LimitationKind;

/// Emitted after a limitation's region was recomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionChanged {
    pub kind: LimitationKind,
    /// The parameter now in force; `None` if the limitation was switched off.
    pub parameter: Option<f64>,
}

pub type ChangeListener = Box<dyn Fn(&RegionChanged) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, ChangeListener)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&RegionChanged) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed here.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn notify(&self, event: &RegionChanged) {
        for (_, listener) in &self.entries {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("subscribed", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn event(parameter: Option<f64>) -> RegionChanged {
        RegionChanged {
            kind: LimitationKind::ActivePowerUpperBound,
            parameter,
        }
    }

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::new();
        for tag in ["first", "second"] {
            let log = log.clone();
            listeners.subscribe(move |_| log.lock().unwrap().push(tag));
        }

        listeners.notify(&event(Some(1.0)));
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_removes_only_that_listener() {
        let count = Arc::new(Mutex::new(0));
        let mut listeners = Listeners::new();
        let c1 = count.clone();
        let first = listeners.subscribe(move |_| *c1.lock().unwrap() += 1);
        let c2 = count.clone();
        listeners.subscribe(move |_| *c2.lock().unwrap() += 10);

        assert!(listeners.unsubscribe(first));
        assert!(!listeners.unsubscribe(first));
        listeners.notify(&event(None));
        assert_eq!(*count.lock().unwrap(), 10);
        assert_eq!(listeners.len(), 1);
    }
}

//! Atomic replacement of a loaded network.
//!
//! Searches take an `Arc` snapshot and run against it; a reload builds a new
//! network completely and then swaps the pointer, so no search ever sees a
//! half-loaded graph.

use std::sync::{Arc, PoisonError, RwLock};

use crate::network::EvacNetwork;

/// Shared, swappable reference to the current [`EvacNetwork`].
pub struct NetworkHandle {
    current: RwLock<Arc<EvacNetwork>>,
}

impl NetworkHandle {
    pub fn new(network: EvacNetwork) -> Self {
        Self { current: RwLock::new(Arc::new(network)) }
    }

    /// The network as of now.  Later `publish` calls do not affect it.
    pub fn snapshot(&self) -> Arc<EvacNetwork> {
        // The guarded value is a plain `Arc`; a poisoned lock still holds a
        // complete one.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current network and return the previous one.
    pub fn publish(&self, network: EvacNetwork) -> Arc<EvacNetwork> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(network))
    }
}

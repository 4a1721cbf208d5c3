//! Resize listener registry
//!
//! Listeners are called synchronously, in registration order, every time the
//! drawable surface changes size. A listener that fails is logged and does not
//! stop the ones after it.

use crate::foundation::collections::{ListenerId, OrderedSlotMap};
use crate::foundation::math::Vec2;
use thiserror::Error;

/// Failure reported by a resize listener
#[derive(Error, Debug)]
pub enum ListenerError {
    /// The object the listener forwards to is gone or busy
    #[error("Listener target unavailable: {0}")]
    TargetUnavailable(String),

    /// Listener-specific failure
    #[error("Listener failed: {0}")]
    Failed(String),
}

/// Callback invoked with the new surface size
pub type ResizeListener = Box<dyn FnMut(Vec2) -> Result<(), ListenerError>>;

/// Ordered collection of resize listeners
#[derive(Default)]
pub struct ResizeListenerRegistry {
    listeners: OrderedSlotMap<ListenerId, ResizeListener>,
}

impl ResizeListenerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener at the end of the notification order
    pub fn add(&mut self, listener: ResizeListener) -> ListenerId {
        self.listeners.insert(listener)
    }

    /// Unregister a listener
    ///
    /// Returns `false` (and does nothing) if the id was never registered or was
    /// already removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Whether `id` is currently registered
    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(id)
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Call every listener with `size`, in registration order
    ///
    /// The registry is exclusively borrowed for the whole pass, so listeners
    /// cannot add or remove entries while it runs. Returns the number of
    /// listeners that reported an error.
    pub fn notify(&mut self, size: Vec2) -> usize {
        let mut failures = 0;
        for id in self.listeners.snapshot_keys() {
            let Some(listener) = self.listeners.get_mut(id) else {
                continue;
            };
            if let Err(err) = listener(size) {
                failures += 1;
                log::error!("Resize listener {:?} failed: {}", id, err);
            }
        }
        failures
    }
}

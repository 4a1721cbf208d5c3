//! Ordered object storage with render/update propagation
//!
//! [`ObjectStorage`] keeps a dynamic set of renderable objects in insertion
//! order. Render and update calls are forwarded to every member the storage's
//! [`PropagationPolicy`] admits, so later-added members draw on top.

use crate::foundation::collections::{OrderedSlotMap, StorageKey};
use crate::render::Renderer;

/// Object that can live in an [`ObjectStorage`]
pub trait Storable {
    /// Called once right after the object was added to a storage
    fn on_mount(&mut self) {}

    /// Draw the object
    fn render(&mut self, renderer: &mut dyn Renderer);

    /// Advance the object by `delta_time` seconds
    fn update(&mut self, _delta_time: f32) {}
}

/// Decides which members take part in render/update propagation
pub trait PropagationPolicy<T> {
    /// Whether `object` (stored under `key`) should receive the current pass
    fn should_propagate(&self, key: StorageKey, object: &T) -> bool;
}

/// Default policy: every member propagates
#[derive(Debug, Clone, Copy, Default)]
pub struct PropagateAll;

impl<T> PropagationPolicy<T> for PropagateAll {
    fn should_propagate(&self, _key: StorageKey, _object: &T) -> bool {
        true
    }
}

/// Insertion-ordered collection of objects addressed by [`StorageKey`]
pub struct ObjectStorage<T, P = PropagateAll> {
    objects: OrderedSlotMap<StorageKey, T>,
    policy: P,
}

impl<T: Storable, P: PropagationPolicy<T> + Default> ObjectStorage<T, P> {
    /// Create an empty storage with the policy's default state
    pub fn new() -> Self {
        Self::with_policy(P::default())
    }
}

impl<T: Storable, P: PropagationPolicy<T> + Default> Default for ObjectStorage<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Storable, P: PropagationPolicy<T>> ObjectStorage<T, P> {
    /// Create an empty storage with an explicit policy
    pub fn with_policy(policy: P) -> Self {
        Self {
            objects: OrderedSlotMap::new(),
            policy,
        }
    }

    /// Append an object and mount it
    pub fn add(&mut self, object: T) -> StorageKey {
        let key = self.objects.insert(object);
        if let Some(object) = self.objects.get_mut(key) {
            object.on_mount();
        }
        key
    }

    /// Remove an object by identity; `None` if it is not stored here
    pub fn remove(&mut self, key: StorageKey) -> Option<T> {
        self.objects.remove(key)
    }

    /// Shared access to a member
    pub fn get(&self, key: StorageKey) -> Option<&T> {
        self.objects.get(key)
    }

    /// Mutable access to a member
    pub fn get_mut(&mut self, key: StorageKey) -> Option<&mut T> {
        self.objects.get_mut(key)
    }

    /// Whether `key` refers to a member of this storage
    pub fn contains(&self, key: StorageKey) -> bool {
        self.objects.contains_key(key)
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the storage is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Position of a member in insertion order
    pub fn position(&self, key: StorageKey) -> Option<usize> {
        self.objects.position(key)
    }

    /// Key of the oldest member
    pub fn first_key(&self) -> Option<StorageKey> {
        self.objects.keys().next()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> Vec<StorageKey> {
        self.objects.snapshot_keys()
    }

    /// Members in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (StorageKey, &T)> + '_ {
        self.objects.iter()
    }

    /// Visit every member mutably, in insertion order, ignoring the policy
    pub fn for_each_mut(&mut self, f: impl FnMut(StorageKey, &mut T)) {
        self.objects.for_each_mut(f);
    }

    /// Visit every member the policy admits, in insertion order
    pub fn for_each_propagating_mut(&mut self, mut f: impl FnMut(StorageKey, &mut T)) {
        let policy = &self.policy;
        self.objects.for_each_mut(|key, object| {
            if policy.should_propagate(key, object) {
                f(key, object);
            }
        });
    }

    /// Drop every member
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Whether `key` currently takes part in propagation
    ///
    /// `false` for keys that are not stored here.
    pub fn should_propagate(&self, key: StorageKey) -> bool {
        self.objects
            .get(key)
            .is_some_and(|object| self.policy.should_propagate(key, object))
    }

    /// Current policy
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Mutable access to the policy
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// Render every admitted member in insertion order
    pub fn render(&mut self, renderer: &mut dyn Renderer) {
        self.for_each_propagating_mut(|_, object| object.render(renderer));
    }

    /// Update every admitted member in insertion order
    pub fn update(&mut self, delta_time: f32) {
        self.for_each_propagating_mut(|_, object| object.update(delta_time));
    }
}

//! Specialized collection types

pub use slotmap::{Key, SlotMap};

slotmap::new_key_type! {
    /// Stable identity of an object held in an [`ObjectStorage`](crate::storage::ObjectStorage)
    pub struct StorageKey;

    /// Stable identity of a registered resize listener
    pub struct ListenerId;
}

/// Slot map that also remembers insertion order
///
/// Keys stay valid until their entry is removed and are never reused for a
/// different entry. Removing an entry keeps the relative order of the rest.
pub struct OrderedSlotMap<K: Key, V> {
    slots: SlotMap<K, V>,
    order: Vec<K>,
}

impl<K: Key, V> OrderedSlotMap<K, V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Append a value and return its key
    pub fn insert(&mut self, value: V) -> K {
        let key = self.slots.insert(value);
        self.order.push(key);
        key
    }

    /// Remove a value by key, `None` if the key is not (or no longer) present
    pub fn remove(&mut self, key: K) -> Option<V> {
        let value = self.slots.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(value)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: K) -> bool {
        self.slots.contains_key(key)
    }

    /// Shared access by key
    pub fn get(&self, key: K) -> Option<&V> {
        self.slots.get(key)
    }

    /// Mutable access by key
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.slots.get_mut(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Position of a key in insertion order
    pub fn position(&self, key: K) -> Option<usize> {
        self.order.iter().position(|k| *k == key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.order.iter().copied()
    }

    /// Copy of the current key order
    ///
    /// Iterate over this when the loop body needs mutable access to the map.
    pub fn snapshot_keys(&self) -> Vec<K> {
        self.order.clone()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.slots.get(*key).map(|value| (*key, value)))
    }

    /// Visit every entry mutably, in insertion order
    pub fn for_each_mut(&mut self, mut f: impl FnMut(K, &mut V)) {
        for key in &self.order {
            if let Some(value) = self.slots.get_mut(*key) {
                f(*key, value);
            }
        }
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
    }
}

impl<K: Key, V> Default for OrderedSlotMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

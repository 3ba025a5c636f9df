//! ArrayMap and ArraySet: linear-scan collections over a fixed buffer.
//!
//! Membership is a scan over at most `N` live entries. That is a
//! deliberate trade: capacities here are small and fixed, so a scan beats
//! the constant overhead and allocation of a hash table. Key uniqueness is
//! the structural invariant — no two live entries compare equal — and a
//! duplicate insert updates in place instead of consuming capacity.

use crate::array_vec::ArrayVec;
use crate::error::CapacityError;

/// Fixed-capacity map with O(N) lookup and O(1) append.
#[derive(Debug)]
pub struct ArrayMap<K: Eq, V, const N: usize> {
    entries: ArrayVec<(K, V), N>,
}

impl<K: Eq, V, const N: usize> ArrayMap<K, V, N> {
    pub fn new() -> Self {
        ArrayMap {
            entries: ArrayVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert or update.
    ///
    /// A present key is updated in place — no capacity is consumed — and
    /// the previous value is returned. A fresh key appends; when the map
    /// is full the pair rides back in the error and nothing changes.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, CapacityError<(K, V)>> {
        if let Some((_, v)) = self.entries.iter_mut().find(|(k, _)| k == &key) {
            return Ok(Some(core::mem::replace(v, value)));
        }
        match self.entries.push((key, value)) {
            Ok(()) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Remove a key, returning its value. O(N); does not preserve entry
    /// order (tail entry is swapped into the hole).
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.swap_remove(index))
    }

    /// Iterate over entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }
}

impl<K: Eq, V, const N: usize> Default for ArrayMap<K, V, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-capacity set: an [`ArrayMap`] with unit values.
#[derive(Debug)]
pub struct ArraySet<T: Eq, const N: usize> {
    map: ArrayMap<T, (), N>,
}

impl<T: Eq, const N: usize> ArraySet<T, N> {
    pub fn new() -> Self {
        ArraySet {
            map: ArrayMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn contains(&self, item: &T) -> bool {
        self.map.contains_key(item)
    }

    /// Insert an item.
    ///
    /// `Ok(true)` if newly inserted, `Ok(false)` if already present (a
    /// no-op that consumes no capacity). A fresh item into a full set
    /// rides back in the error.
    pub fn insert(&mut self, item: T) -> Result<bool, CapacityError<T>> {
        if self.map.contains_key(&item) {
            return Ok(false);
        }
        match self.map.insert(item, ()) {
            Ok(_) => Ok(true),
            Err(CapacityError((item, ()))) => Err(CapacityError(item)),
        }
    }

    /// Remove an item; `true` if it was present.
    pub fn remove(&mut self, item: &T) -> bool {
        self.map.remove(item).is_some()
    }

    /// Iterate over items in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.map.iter().map(|(k, _)| k)
    }
}

impl<T: Eq, const N: usize> Default for ArraySet<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

//! Key-value storage behind the pairing registry.
//!
//! The registry only talks to [`KeyValueStore`], so a durable backend can
//! replace [`MemoryStore`] without touching pairing logic. Every method must be
//! atomic with respect to the single entry it touches.

use dashmap::{mapref::entry::Entry, DashMap};

pub trait KeyValueStore<V>: Send + Sync {
    fn get(&self, key: &str) -> Option<V>;

    fn set(&self, key: String, value: V);

    /// Inserts only if `key` is not present. Returns false if it was.
    fn set_if_absent(&self, key: String, value: V) -> bool;

    fn delete(&self, key: &str) -> Option<V>;

    fn len(&self) -> usize;

    /// Keeps only the entries for which `keep` returns true. Returns how many were removed.
    fn retain(&self, keep: &dyn Fn(&str, &V) -> bool) -> usize;

    /// Read-modify-write of one entry under its lock. Returns the value after `apply`,
    /// or `None` if the key is absent.
    fn update(&self, key: &str, apply: &mut dyn FnMut(&mut V)) -> Option<V>;

    /// Removes the entry only if `pred` holds for it, as one step.
    fn take_if(&self, key: &str, pred: &dyn Fn(&V) -> bool) -> Option<V>;
}

/// In-process store. Not durable; contents are lost on restart.
pub struct MemoryStore<V> {
    entries: DashMap<String, V>,
}

impl<V> MemoryStore<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync> KeyValueStore<V> for MemoryStore<V> {
    fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: String, value: V) {
        self.entries.insert(key, value);
    }

    fn set_if_absent(&self, key: String, value: V) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    fn delete(&self, key: &str) -> Option<V> {
        self.entries.remove(key).map(|(_, value)| value)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn retain(&self, keep: &dyn Fn(&str, &V) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, value| keep(key, value));
        before.saturating_sub(self.entries.len())
    }

    fn update(&self, key: &str, apply: &mut dyn FnMut(&mut V)) -> Option<V> {
        let mut entry = self.entries.get_mut(key)?;
        apply(entry.value_mut());
        Some(entry.value().clone())
    }

    fn take_if(&self, key: &str, pred: &dyn Fn(&V) -> bool) -> Option<V> {
        self.entries
            .remove_if(key, |_, value| pred(value))
            .map(|(_, value)| value)
    }
}

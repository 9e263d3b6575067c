use std::collections::HashMap;

use parking_lot::RwLock;

use crate::shared::Lookup;

/// Keyed cache for point lookups, shared between concurrent runs.
///
/// A `None` entry records a miss so the same key is not queried again.
#[derive(Debug)]
pub struct LookupCache<V> {
    entries: RwLock<HashMap<String, Option<V>>>,
}

impl<V> Default for LookupCache<V> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Clone> LookupCache<V> {
    pub fn new() -> Self {
        Default::default()
    }

    /// `None` when the key was never cached.
    pub fn get(&self, key: &str) -> Option<Lookup<V>> {
        let entries = self.entries.read();
        entries.get(key).map(|entry| match entry {
            Some(value) => Lookup::Found(value.clone()),
            None => Lookup::NotFound,
        })
    }

    pub fn insert(&self, key: &str, value: V) {
        self.entries.write().insert(key.to_string(), Some(value));
    }

    pub fn insert_miss(&self, key: &str) {
        self.entries.write().insert(key.to_string(), None);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[test]
fn negative_entry_test() {
    let cache: LookupCache<String> = LookupCache::new();
    assert_eq!(cache.get("42"), None);
    cache.insert_miss("42");
    assert_eq!(cache.get("42"), Some(Lookup::NotFound));
    cache.insert("7", "123".to_string());
    assert_eq!(cache.get("7"), Some(Lookup::Found("123".to_string())));
    assert_eq!(cache.len(), 2);
}

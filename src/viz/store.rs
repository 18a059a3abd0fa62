use std::any::Any;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Frame-to-frame state of one preset session.
///
/// Created empty on activation and dropped when another preset becomes
/// active, so nothing leaks between presets or between activations.
#[derive(Default)]
pub struct PersistentStore {
    values: HashMap<&'static str, Box<dyn Any>>,
}

impl PersistentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: Any>(&mut self, key: &'static str, value: T) {
        self.values.insert(key, Box::new(value));
    }

    pub fn get<T: Any>(&self, key: &'static str) -> Option<&T> {
        self.values.get(key).and_then(|v| v.downcast_ref())
    }

    pub fn get_mut<T: Any>(&mut self, key: &'static str) -> Option<&mut T> {
        self.values.get_mut(key).and_then(|v| v.downcast_mut())
    }

    /// The value under `key`, created with `init` when absent or when it was
    /// stored with another type.
    pub fn get_or_insert_with<T: Any>(&mut self, key: &'static str, init: impl FnOnce() -> T) -> &mut T {
        let slot = match self.values.entry(key) {
            Entry::Occupied(entry) => {
                let slot = entry.into_mut();
                if !slot.is::<T>() {
                    *slot = Box::new(init());
                }
                slot
            }
            Entry::Vacant(entry) => entry.insert(Box::new(init())),
        };
        match slot.downcast_mut() {
            Some(value) => value,
            None => unreachable!("slot `{key}` was just filled with this type"),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for PersistentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentStore")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::PersistentStore;

    #[test]
    fn wrong_type_is_replaced() {
        let mut store = PersistentStore::new();
        store.insert("k", 3_u32);
        assert_eq!(store.get::<u32>("k"), Some(&3));
        assert_eq!(store.get::<f64>("k"), None);

        *store.get_or_insert_with("k", || 1.5_f64) += 1.0;
        assert_eq!(store.get::<f64>("k"), Some(&2.5));
        assert_eq!(store.len(), 1);
    }
}

//! Registry of named filter factories.
//!
//! Keys are unique: registering a key twice keeps only the last factory.
//! Keys always come back sorted by their string form, which is also the
//! order the chain runs them in, regardless of registration order.

use crate::traits::FilterFactory;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared factory handle stored in the registry
pub type SharedFactory<T> = Arc<dyn FilterFactory<T>>;

/// Maps filter keys to the factories that build them.
///
/// Registration takes the write lock; reads hand out copies, so a chain
/// run never observes a half-applied registration.
pub struct FilterRegistry<T> {
    entries: RwLock<BTreeMap<String, SharedFactory<T>>>,
}

impl<T> FilterRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Insert or overwrite the factory for `key`.
    ///
    /// # Example
    /// ```ignore
    /// registry.register("max_length", || Box::new(MaxLengthFilter::new(400)) as Box<dyn Filter<_>>);
    /// ```
    pub fn register(&self, key: impl Into<String>, factory: impl FilterFactory<T> + 'static) {
        let key = key.into();
        tracing::debug!("Registering filter: {}", key);
        self.entries.write().insert(key, Arc::new(factory));
    }

    /// All registered keys, sorted by string form.
    pub fn kinds(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Consistent copy of `(key, factory)` pairs in sorted-key order.
    pub fn snapshot(&self) -> Vec<(String, SharedFactory<T>)> {
        self.entries
            .read()
            .iter()
            .map(|(key, factory)| (key.clone(), Arc::clone(factory)))
            .collect()
    }
}

impl<T> Default for FilterRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Filter;
    use anyhow::Result;

    struct Passthrough;

    impl Filter<u32> for Passthrough {
        fn name(&self) -> &str {
            "Passthrough"
        }

        fn process(&mut self, value: u32) -> Result<Option<u32>> {
            Ok(Some(value))
        }
    }

    fn passthrough() -> Box<dyn Filter<u32>> {
        Box::new(Passthrough)
    }

    #[test]
    fn test_register_then_kinds_includes_key() {
        let registry = FilterRegistry::new();
        registry.register("filt", passthrough);

        assert!(registry.kinds().contains(&"filt".to_string()));
    }

    #[test]
    fn test_clear_empties_registry() {
        let registry = FilterRegistry::new();
        registry.register("testing", passthrough);
        assert!(registry.kinds().contains(&"testing".to_string()));

        registry.clear();
        assert!(registry.kinds().is_empty());

        registry.clear();
        assert!(registry.kinds().is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_kinds_are_sorted_regardless_of_registration_order() {
        let registry = FilterRegistry::new();
        let kinds = ["filt", "test", "blah", "stuff", "hello"];
        for kind in kinds {
            registry.register(kind, passthrough);
        }

        let mut expected: Vec<String> = kinds.iter().map(|k| k.to_string()).collect();
        expected.sort();

        assert_eq!(registry.kinds(), expected);
        // Listing is side-effect free
        assert_eq!(registry.kinds(), expected);
        assert_eq!(registry.len(), kinds.len());
    }

    #[test]
    fn test_reregistering_key_keeps_one_entry() {
        let registry = FilterRegistry::new();
        registry.register("dup", passthrough);
        registry.register("dup", passthrough);

        assert_eq!(registry.kinds(), vec!["dup".to_string()]);
    }

    #[test]
    fn test_snapshot_matches_kinds() {
        let registry = FilterRegistry::new();
        registry.register("b", passthrough);
        registry.register("a", passthrough);

        let keys: Vec<String> = registry.snapshot().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, registry.kinds());
    }
}

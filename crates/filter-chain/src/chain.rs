//! The FilterChain runs a value through every registered filter.

use crate::error::UsageError;
use crate::registry::FilterRegistry;
use anyhow::Result;
use std::sync::Arc;

/// Runs a value through all filters of a registry.
///
/// ## Usage
/// ```ignore
/// let chain = FilterChain::new(registry.clone());
///
/// match chain.process(message)? {
///     Some(message) => parser.parse_message(&message)?,
///     None => None,
/// }
/// ```
pub struct FilterChain<T> {
    registry: Arc<FilterRegistry<T>>,
}

impl<T> FilterChain<T> {
    /// Create a chain backed by `registry`.
    pub fn new(registry: Arc<FilterRegistry<T>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<FilterRegistry<T>> {
        &self.registry
    }

    /// Run `value` through the chain.
    ///
    /// ## Algorithm
    /// 1. Snapshot the registry in sorted-key order
    /// 2. For each key:
    ///    a. Create a fresh filter from its factory
    ///    b. Process the current value
    ///    c. Stop with `None` if the filter declined it
    /// 3. Return the last value
    ///
    /// An empty registry returns the input unchanged. Errors raised by a
    /// filter are returned as-is.
    pub fn process(&self, value: T) -> Result<Option<T>> {
        let mut current = value;
        for (key, factory) in self.registry.snapshot() {
            let mut filter = factory.create();
            tracing::debug!("Applying filter: {} ({})", key, filter.name());
            match filter.process(current)? {
                Some(next) => current = next,
                None => {
                    tracing::debug!("Filter {} stopped the chain", key);
                    return Ok(None);
                }
            }
        }
        Ok(Some(current))
    }

    /// Like [`process`](Self::process), for callers whose value may be absent.
    ///
    /// # Returns
    /// * `Err(UsageError::MissingValue)` - If `value` is `None`
    pub fn try_process(&self, value: Option<T>) -> Result<Option<T>> {
        let value = value.ok_or(UsageError::MissingValue)?;
        self.process(value)
    }
}

impl<T> Clone for FilterChain<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Filter;

    struct Append(&'static str);

    impl Filter<String> for Append {
        fn name(&self) -> &str {
            "Append"
        }

        fn process(&mut self, value: String) -> Result<Option<String>> {
            Ok(Some(format!("{}{}", value, self.0)))
        }
    }

    struct Empty;

    impl Filter<String> for Empty {
        fn name(&self) -> &str {
            "Empty"
        }

        fn process(&mut self, _value: String) -> Result<Option<String>> {
            Ok(Some(String::new()))
        }
    }

    #[test]
    fn test_empty_chain_returns_input() {
        let chain = FilterChain::new(Arc::new(FilterRegistry::new()));

        let result = chain.process("hey hey hey".to_string()).unwrap();
        assert_eq!(result.as_deref(), Some("hey hey hey"));
    }

    #[test]
    fn test_filters_run_in_sorted_key_order() {
        let registry = Arc::new(FilterRegistry::new());
        registry.register("z", || Box::new(Append("z")) as Box<dyn Filter<String>>);
        registry.register("a", || Box::new(Append("a")) as Box<dyn Filter<String>>);
        registry.register("m", || Box::new(Append("m")) as Box<dyn Filter<String>>);

        let chain = FilterChain::new(registry);
        assert_eq!(chain.process(String::new()).unwrap().as_deref(), Some("amz"));
    }

    #[test]
    fn test_empty_string_does_not_stop_chain() {
        let registry = Arc::new(FilterRegistry::new());
        registry.register("a", || Box::new(Empty) as Box<dyn Filter<String>>);
        registry.register("b", || Box::new(Append("!")) as Box<dyn Filter<String>>);

        let chain = FilterChain::new(registry);
        assert_eq!(chain.process("text".to_string()).unwrap().as_deref(), Some("!"));
    }

    #[test]
    fn test_try_process_requires_value() {
        let chain: FilterChain<String> = FilterChain::new(Arc::new(FilterRegistry::new()));

        let err = chain.try_process(None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<UsageError>(),
            Some(&UsageError::MissingValue)
        );
        assert!(chain.try_process(Some("hey hey hey".to_string())).is_ok());
    }
}

//! Core traits for the filter chain.
//!
//! A `Filter` does the work on a single value; a `FilterFactory` is what
//! gets registered, so that every chain run gets its own filter instance.

use anyhow::Result;

/// Core trait for filtering a value.
///
/// ## Design Note
/// - `Ok(Some(value))` passes `value` to the next filter
/// - `Ok(None)` stops the chain; the overall result is nothing
/// - `Err` is returned to the chain's caller untouched
///
/// Empty strings, zero and similar sparse values are ordinary outputs.
/// Only `None` stops the chain.
pub trait Filter<T>: Send {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Process one value.
    ///
    /// # Arguments
    /// * `value` - The current value (takes ownership)
    ///
    /// # Returns
    /// * `Ok(Some(T))` - The value to hand to the next filter
    /// * `Ok(None)` - Stop the chain
    /// * `Err` - If the filter itself fails
    fn process(&mut self, value: T) -> Result<Option<T>>;
}

/// Produces fresh filter instances.
///
/// `Send + Sync` so that a registry can be shared across threads.
pub trait FilterFactory<T>: Send + Sync {
    fn create(&self) -> Box<dyn Filter<T>>;
}

impl<T, F> FilterFactory<T> for F
where
    F: Fn() -> Box<dyn Filter<T>> + Send + Sync,
{
    fn create(&self) -> Box<dyn Filter<T>> {
        self()
    }
}

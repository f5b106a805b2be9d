//! Named, orderable filter chains.
//!
//! This crate provides:
//! - Filter and FilterFactory traits for pluggable message filters
//! - FilterRegistry mapping unique keys to filter factories
//! - FilterChain for running a value through every registered filter
//!
//! ## Architecture
//! Filters are registered by key. When a value is processed:
//! 1. The registry is snapshotted in sorted-key order
//! 2. Each factory creates a fresh filter instance
//! 3. The filter either passes a (possibly rewritten) value on, or stops the chain
//!
//! ## Example Usage
//! ```ignore
//! use filter_chain::{FilterChain, FilterRegistry};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(FilterRegistry::new());
//! registry.register("blank", || Box::new(BlankFilter) as Box<dyn Filter<String>>);
//!
//! let chain = FilterChain::new(registry.clone());
//! let result = chain.process("hello".to_string())?;
//! ```

pub mod chain;
pub mod error;
pub mod registry;
pub mod traits;

// Re-export main types
pub use chain::FilterChain;
pub use error::UsageError;
pub use registry::FilterRegistry;
pub use traits::{Filter, FilterFactory};

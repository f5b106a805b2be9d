//! Error types for the filter-chain crate.

use thiserror::Error;

/// Contract violations by the caller of a chain.
///
/// These are never turned into a "nothing" result: a caller that gets one
/// has misused the API, which is different from a filter declining a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// `try_process` was called without a value
    #[error("a value is required to run the filter chain")]
    MissingValue,
}

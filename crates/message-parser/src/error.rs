//! Error types for the message-parser crate.
//!
//! Only format registration can fail with a typed error. Failures inside a
//! format handler are the handler's own `anyhow::Error` and are passed
//! through `MessageParser::parse` unchanged.

use thiserror::Error;

/// Errors raised while registering a format
#[derive(Error, Debug)]
pub enum FormatError {
    /// The format has no name (or an empty one)
    #[error("a format name is required")]
    MissingName,

    /// The format has no pattern
    #[error("format '{name}' requires a pattern")]
    MissingPattern { name: String },

    /// The format has no handler
    #[error("format '{name}' requires a handler")]
    MissingHandler { name: String },

    /// A built-in pattern failed to compile
    #[error("invalid pattern for format '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

impl FormatError {
    /// True for contract violations by the registering caller.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            FormatError::MissingName
                | FormatError::MissingPattern { .. }
                | FormatError::MissingHandler { .. }
        )
    }
}

/// Convenience type alias for registration results
pub type Result<T> = std::result::Result<T, FormatError>;

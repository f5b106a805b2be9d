//! # Message Parser Crate
//!
//! This crate decides what kind of post a chat message is and extracts
//! its fields.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (ChatMessage, PostBody, ClassifiedPost)
//! - **registry**: Ordered format registry (FormatSpec, FormatEntry, FormatRegistry)
//! - **parser**: First-match classification (MessageParser)
//! - **formats**: The built-in formats and their precedence
//! - **error**: Error types for format registration
//!
//! ## Example Usage
//!
//! ```ignore
//! use message_parser::MessageParser;
//!
//! let parser = MessageParser::with_defaults()?;
//!
//! let post = parser.parse("rick", "#t3hchannel", "fact: water is wet")?;
//! assert_eq!(post.unwrap().kind(), PostKind::Fact);
//!
//! // Unrecognized or suppressed messages yield nothing
//! assert!(parser.parse("rick", "#t3hchannel", "!http://example.com")?.is_none());
//! ```

// Public modules
pub mod error;
pub mod formats;
pub mod parser;
pub mod registry;
pub mod types;

// Re-export commonly used types for convenience
pub use error::FormatError;
pub use parser::MessageParser;
pub use registry::{FormatEntry, FormatHandler, FormatRegistry, FormatSpec};
pub use types::{ChatMessage, ClassifiedPost, PostBody, PostKind};

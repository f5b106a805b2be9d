//! Ordered registry of message formats.
//!
//! A format pairs a compiled pattern with a handler that turns the
//! pattern's captures into a `PostBody`. Registration order is the order
//! formats are tried in, so it is kept exactly as given: this is a list,
//! not a map, and names are not deduplicated.

use crate::error::{FormatError, Result};
use crate::types::PostBody;
use parking_lot::RwLock;
use regex::{Captures, Regex};
use std::fmt;
use std::sync::Arc;

/// Turns a pattern match into post fields.
///
/// * `Ok(Some(body))` - The message is a post of `body`'s type
/// * `Ok(None)` - The message matched but must be ignored
/// * `Err` - The handler failed; the error reaches the parser's caller
pub type FormatHandler =
    Arc<dyn Fn(&Captures<'_>) -> anyhow::Result<Option<PostBody>> + Send + Sync>;

/// A registered format. Immutable once registered.
pub struct FormatEntry {
    name: String,
    pattern: Regex,
    description: Option<String>,
    handler: FormatHandler,
}

impl FormatEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn handler(&self) -> &FormatHandler {
        &self.handler
    }
}

impl fmt::Debug for FormatEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatEntry")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Builder for a format registration.
///
/// Name, pattern and handler are mandatory; `FormatRegistry::register_format`
/// rejects a spec missing any of them.
///
/// ## Usage
/// ```ignore
/// registry.register_format(
///     FormatSpec::new("fact")
///         .pattern(Regex::new(r"(?i)^fact:\s*(?P<body>.+)$")?)
///         .description("fact: BODY")
///         .handler(|caps| Ok(Some(PostBody::Fact { title: format!("FACT: {}", &caps["body"]) }))),
/// )?;
/// ```
#[derive(Default)]
pub struct FormatSpec {
    name: Option<String>,
    pattern: Option<Regex>,
    description: Option<String>,
    handler: Option<FormatHandler>,
}

impl FormatSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn handler<F>(self, handler: F) -> Self
    where
        F: Fn(&Captures<'_>) -> anyhow::Result<Option<PostBody>> + Send + Sync + 'static,
    {
        self.shared_handler(Arc::new(handler))
    }

    /// Use an already shared handler, e.g. one registered under several formats.
    pub fn shared_handler(mut self, handler: FormatHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    fn build(self) -> Result<FormatEntry> {
        let name = self
            .name
            .filter(|name| !name.is_empty())
            .ok_or(FormatError::MissingName)?;
        let pattern = match self.pattern {
            Some(pattern) => pattern,
            None => return Err(FormatError::MissingPattern { name }),
        };
        let handler = match self.handler {
            Some(handler) => handler,
            None => return Err(FormatError::MissingHandler { name }),
        };
        Ok(FormatEntry {
            name,
            pattern,
            description: self.description,
            handler,
        })
    }
}

/// Registration-ordered list of formats.
pub struct FormatRegistry {
    entries: RwLock<Vec<Arc<FormatEntry>>>,
}

impl FormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Append a format after all previously registered ones.
    ///
    /// # Errors
    /// * `FormatError::MissingName` / `MissingPattern` / `MissingHandler`
    pub fn register_format(&self, spec: FormatSpec) -> Result<()> {
        let entry = spec.build()?;
        tracing::debug!(
            "Registering format: {} ({})",
            entry.name,
            entry.pattern.as_str()
        );
        self.entries.write().push(Arc::new(entry));
        Ok(())
    }

    /// Registered formats in registration order.
    pub fn formats(&self) -> Vec<Arc<FormatEntry>> {
        self.entries.read().clone()
    }

    /// Remove every format.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_pattern() -> Regex {
        Regex::new("format").unwrap()
    }

    fn noop(_: &Captures<'_>) -> anyhow::Result<Option<PostBody>> {
        Ok(None)
    }

    #[test]
    fn test_requires_format_name() {
        let registry = FormatRegistry::new();

        let err = registry.register_format(FormatSpec::default()).unwrap_err();
        assert!(matches!(err, FormatError::MissingName));
        assert!(err.is_usage_error());

        let err = registry.register_format(FormatSpec::new("")).unwrap_err();
        assert!(matches!(err, FormatError::MissingName));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_requires_pattern() {
        let registry = FormatRegistry::new();

        let err = registry
            .register_format(FormatSpec::new("format_name"))
            .unwrap_err();
        assert!(matches!(err, FormatError::MissingPattern { .. }));
    }

    #[test]
    fn test_requires_handler() {
        let registry = FormatRegistry::new();

        let err = registry
            .register_format(FormatSpec::new("format_name").pattern(format_pattern()))
            .unwrap_err();
        assert!(matches!(err, FormatError::MissingHandler { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_accepts_name_pattern_and_handler() {
        let registry = FormatRegistry::new();

        registry
            .register_format(
                FormatSpec::new("format_name")
                    .pattern(format_pattern())
                    .handler(noop),
            )
            .unwrap();
        registry
            .register_format(
                FormatSpec::new("format_name")
                    .pattern(format_pattern())
                    .description("description")
                    .handler(noop),
            )
            .unwrap();

        // Same name twice is allowed and kept twice
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_clear_formats() {
        let registry = FormatRegistry::new();
        registry
            .register_format(
                FormatSpec::new("format_name")
                    .pattern(format_pattern())
                    .handler(noop),
            )
            .unwrap();
        assert!(!registry.formats().is_empty());

        registry.clear();
        assert!(registry.formats().is_empty());
        registry.clear();
        assert!(registry.formats().is_empty());
    }

    #[test]
    fn test_stores_given_format() {
        let registry = FormatRegistry::new();
        let handler: FormatHandler = Arc::new(noop);

        registry
            .register_format(
                FormatSpec::new("format_name")
                    .pattern(format_pattern())
                    .description("description")
                    .shared_handler(handler.clone()),
            )
            .unwrap();

        let stored = registry.formats().into_iter().find(|f| {
            f.name() == "format_name"
                && f.pattern().as_str() == "format"
                && f.description() == Some("description")
                && Arc::ptr_eq(f.handler(), &handler)
        });
        assert!(stored.is_some());
    }

    #[test]
    fn test_formats_keep_registration_order() {
        let registry = FormatRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry
                .register_format(FormatSpec::new(name).pattern(format_pattern()).handler(noop))
                .unwrap();
        }

        let names: Vec<String> = registry
            .formats()
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }
}

//! First-match message classification.

use crate::error::Result as FormatResult;
use crate::formats;
use crate::registry::FormatRegistry;
use crate::types::{ChatMessage, ClassifiedPost};
use anyhow::Result;
use std::sync::Arc;

/// Classifies messages against a `FormatRegistry`.
///
/// ## Algorithm
/// 1. Empty text is never classified
/// 2. Formats are tried in registration order
/// 3. The first format whose pattern matches decides the outcome: its
///    handler's body (plus poster and channel), or nothing if the handler
///    suppresses the message
/// 4. No match means nothing
///
/// First match wins, not best match. Overlapping formats must be
/// registered in the order that resolves them.
#[derive(Clone)]
pub struct MessageParser {
    formats: Arc<FormatRegistry>,
}

impl MessageParser {
    /// Create a parser backed by `formats`.
    pub fn new(formats: Arc<FormatRegistry>) -> Self {
        Self { formats }
    }

    /// Create a parser with its own registry holding the default formats.
    pub fn with_defaults() -> FormatResult<Self> {
        let registry = FormatRegistry::new();
        formats::register_defaults(&registry)?;
        Ok(Self::new(Arc::new(registry)))
    }

    pub fn formats(&self) -> &Arc<FormatRegistry> {
        &self.formats
    }

    /// Classify `text` posted by `poster` on `channel`.
    ///
    /// # Returns
    /// * `Ok(Some(post))` - The message was recognized
    /// * `Ok(None)` - Empty, unrecognized or explicitly ignored
    /// * `Err` - A format handler failed
    pub fn parse(&self, poster: &str, channel: &str, text: &str) -> Result<Option<ClassifiedPost>> {
        if text.is_empty() {
            return Ok(None);
        }

        for format in self.formats.formats() {
            tracing::trace!("Trying format: {}", format.name());
            let Some(captures) = format.pattern().captures(text) else {
                continue;
            };

            let body = (format.handler())(&captures)?;
            tracing::debug!(
                "Message from {} on {} matched format {} ({})",
                poster,
                channel,
                format.name(),
                body.as_ref().map_or("ignored", |b| b.kind().as_str())
            );

            return Ok(body.map(|body| ClassifiedPost {
                poster: poster.to_string(),
                channel: channel.to_string(),
                body,
            }));
        }

        tracing::debug!("No format matched message from {} on {}", poster, channel);
        Ok(None)
    }

    /// Classify a whole `ChatMessage`.
    pub fn parse_message(&self, message: &ChatMessage) -> Result<Option<ClassifiedPost>> {
        self.parse(&message.poster, &message.channel, &message.text)
    }
}

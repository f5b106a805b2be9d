//! Filter to drop overlong messages.
//!
//! Pasted logs and walls of text are never posts.

use anyhow::Result;
use filter_chain::Filter;
use message_parser::ChatMessage;

/// Declines messages longer than `max_chars` characters.
pub struct MaxLengthFilter {
    max_chars: usize,
}

impl MaxLengthFilter {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Filter<ChatMessage> for MaxLengthFilter {
    fn name(&self) -> &str {
        "MaxLengthFilter"
    }

    fn process(&mut self, message: ChatMessage) -> Result<Option<ChatMessage>> {
        let length = message.text.chars().count();
        if length > self.max_chars {
            tracing::debug!(
                "Dropping message from {}: {} chars (max {})",
                message.poster,
                length,
                self.max_chars
            );
            return Ok(None);
        }
        Ok(Some(message))
    }
}

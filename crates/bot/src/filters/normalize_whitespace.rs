//! Filter to tidy message whitespace before classification.

use anyhow::Result;
use filter_chain::Filter;
use message_parser::ChatMessage;

/// Collapses whitespace runs into single spaces and trims the ends.
///
/// Never declines a message.
pub struct NormalizeWhitespaceFilter;

impl Filter<ChatMessage> for NormalizeWhitespaceFilter {
    fn name(&self) -> &str {
        "NormalizeWhitespaceFilter"
    }

    fn process(&mut self, mut message: ChatMessage) -> Result<Option<ChatMessage>> {
        message.text = message.text.split_whitespace().collect::<Vec<_>>().join(" ");
        Ok(Some(message))
    }
}

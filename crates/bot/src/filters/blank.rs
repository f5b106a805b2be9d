//! Filter to drop messages with nothing in them.
//!
//! Join/part noise and stray newlines reach the bot as whitespace-only
//! text; none of it is worth classifying.

use anyhow::Result;
use filter_chain::Filter;
use message_parser::ChatMessage;

/// Declines messages whose text is empty or whitespace only.
pub struct BlankFilter;

impl Filter<ChatMessage> for BlankFilter {
    fn name(&self) -> &str {
        "BlankFilter"
    }

    fn process(&mut self, message: ChatMessage) -> Result<Option<ChatMessage>> {
        if message.text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(message))
    }
}

//! Chat events as delivered by a transport.

use message_parser::ChatMessage;
use serde::{Deserialize, Serialize};

/// A message event before validation.
///
/// Transports may deliver events without a body (topic changes, joins);
/// `text` is `None` for those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub poster: String,
    pub channel: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl RawEvent {
    /// The event as a `ChatMessage`, if it carries a body.
    pub fn into_message(self) -> Option<ChatMessage> {
        let text = self.text?;
        Some(ChatMessage {
            poster: self.poster,
            channel: self.channel,
            text,
        })
    }
}

//! Filter to drop messages from posters the bot should not listen to.
//!
//! Typically other bots on the same channel. Nicks compare
//! case-insensitively.

use anyhow::Result;
use filter_chain::Filter;
use message_parser::ChatMessage;
use std::collections::HashSet;
use std::sync::Arc;

/// Declines messages whose poster is in the ignore list.
///
/// ## Algorithm
/// The nick set is lowercased once and shared between instances, so
/// creating a filter per message costs one `Arc` clone.
pub struct IgnoredPostersFilter {
    posters: Arc<HashSet<String>>,
}

impl IgnoredPostersFilter {
    /// Create a new IgnoredPostersFilter.
    ///
    /// # Arguments
    /// * `posters` - Shared, already lowercased nick set
    pub fn new(posters: Arc<HashSet<String>>) -> Self {
        Self { posters }
    }

    /// Build the shared nick set from configured nicks.
    pub fn nick_set<I, S>(nicks: I) -> Arc<HashSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Arc::new(
            nicks
                .into_iter()
                .map(|nick| nick.as_ref().to_lowercase())
                .collect(),
        )
    }
}

impl Filter<ChatMessage> for IgnoredPostersFilter {
    fn name(&self) -> &str {
        "IgnoredPostersFilter"
    }

    fn process(&mut self, message: ChatMessage) -> Result<Option<ChatMessage>> {
        if self.posters.contains(&message.poster.to_lowercase()) {
            tracing::debug!("Ignoring message from {}", message.poster);
            return Ok(None);
        }
        Ok(Some(message))
    }
}

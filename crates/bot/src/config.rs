//! Bot configuration.

use serde::{Deserialize, Serialize};

/// Default cap on message length, in characters
pub const DEFAULT_MAX_LENGTH: usize = 400;

/// Knobs for building a `Classifier`.
///
/// Every field has a default, so a partial (or empty) document deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Longest message, in characters, that is still classified
    pub max_length: usize,
    /// Nicks whose messages are never classified
    pub ignored_posters: Vec<String>,
    /// Run the filter chain before parsing
    pub filters_enabled: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            ignored_posters: Vec::new(),
            filters_enabled: true,
        }
    }
}

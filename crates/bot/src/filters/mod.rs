//! The bot's message filters.
//!
//! Filters are registered by key and the chain runs them in sorted-key
//! order, so the keys below double as the execution order:
//! `blank`, `ignored_posters`, `max_length`, `normalize_whitespace`.

pub mod blank;
pub mod ignored_posters;
pub mod max_length;
pub mod normalize_whitespace;

// Re-export for convenience
pub use blank::BlankFilter;
pub use ignored_posters::IgnoredPostersFilter;
pub use max_length::MaxLengthFilter;
pub use normalize_whitespace::NormalizeWhitespaceFilter;

use crate::config::BotConfig;
use filter_chain::{Filter, FilterRegistry};
use message_parser::ChatMessage;

pub const BLANK: &str = "blank";
pub const IGNORED_POSTERS: &str = "ignored_posters";
pub const MAX_LENGTH: &str = "max_length";
pub const NORMALIZE_WHITESPACE: &str = "normalize_whitespace";

/// Register the bot's filters as configured.
///
/// `ignored_posters` is only registered when there is someone to ignore.
pub fn register_bot_filters(registry: &FilterRegistry<ChatMessage>, config: &BotConfig) {
    registry.register(BLANK, || Box::new(BlankFilter) as Box<dyn Filter<ChatMessage>>);

    if !config.ignored_posters.is_empty() {
        let posters = IgnoredPostersFilter::nick_set(&config.ignored_posters);
        registry.register(IGNORED_POSTERS, move || {
            Box::new(IgnoredPostersFilter::new(posters.clone())) as Box<dyn Filter<ChatMessage>>
        });
    }

    let max_chars = config.max_length;
    registry.register(MAX_LENGTH, move || {
        Box::new(MaxLengthFilter::new(max_chars)) as Box<dyn Filter<ChatMessage>>
    });

    registry.register(NORMALIZE_WHITESPACE, || {
        Box::new(NormalizeWhitespaceFilter) as Box<dyn Filter<ChatMessage>>
    });

    tracing::info!("Registered message filters: {:?}", registry.kinds());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_bot_filters() {
        let registry = FilterRegistry::new();
        register_bot_filters(&registry, &BotConfig::default());

        assert_eq!(registry.kinds(), vec![BLANK, MAX_LENGTH, NORMALIZE_WHITESPACE]);
    }

    #[test]
    fn test_ignored_posters_registered_when_configured() {
        let registry = FilterRegistry::new();
        let config = BotConfig {
            ignored_posters: vec!["otherbot".to_string()],
            ..BotConfig::default()
        };
        register_bot_filters(&registry, &config);

        assert_eq!(
            registry.kinds(),
            vec![BLANK, IGNORED_POSTERS, MAX_LENGTH, NORMALIZE_WHITESPACE]
        );
    }
}

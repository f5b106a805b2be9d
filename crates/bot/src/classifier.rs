//! # Message Classifier
//!
//! This module coordinates the bot's side of a message:
//! 1. Run the message through the filter chain
//! 2. Classify whatever survives against the format registry
//! 3. Hand back the post, or nothing
//!
//! Both registries are shared behind `Arc`s, so a batch can be classified
//! in parallel while every message sees a consistent registry snapshot.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, info};

use filter_chain::{FilterChain, FilterRegistry};
use message_parser::{ChatMessage, ClassifiedPost, FormatRegistry, MessageParser, formats};

use crate::config::BotConfig;
use crate::event::RawEvent;
use crate::filters;

/// Filter chain plus parser.
#[derive(Clone)]
pub struct Classifier {
    chain: FilterChain<ChatMessage>,
    parser: MessageParser,
}

impl Classifier {
    /// Create a classifier over existing registries.
    ///
    /// # Arguments
    /// * `filters` - Filters run before parsing (may be empty)
    /// * `formats` - Formats tried by the parser, in registration order
    pub fn new(filters: Arc<FilterRegistry<ChatMessage>>, formats: Arc<FormatRegistry>) -> Self {
        Self {
            chain: FilterChain::new(filters),
            parser: MessageParser::new(formats),
        }
    }

    /// Create a classifier with the built-in formats and the configured filters.
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        let filter_registry = Arc::new(FilterRegistry::new());
        if config.filters_enabled {
            filters::register_bot_filters(&filter_registry, config);
        }

        let format_registry = Arc::new(FormatRegistry::new());
        formats::register_defaults(&format_registry)?;

        Ok(Self::new(filter_registry, format_registry))
    }

    pub fn filters(&self) -> &Arc<FilterRegistry<ChatMessage>> {
        self.chain.registry()
    }

    pub fn formats(&self) -> &Arc<FormatRegistry> {
        self.parser.formats()
    }

    /// Classify one message.
    ///
    /// # Returns
    /// * `Ok(Some(post))` - The message passed every filter and was recognized
    /// * `Ok(None)` - A filter declined it, or no format recognized it
    /// * `Err` - A filter or format handler failed
    pub fn classify(&self, message: ChatMessage) -> Result<Option<ClassifiedPost>> {
        let Some(message) = self.chain.process(message)? else {
            debug!("Filters declined message");
            return Ok(None);
        };
        self.parser.parse_message(&message)
    }

    /// Classify a transport event.
    ///
    /// An event without text is a usage error (`filter_chain::UsageError`),
    /// not an unrecognized message.
    pub fn classify_event(&self, event: RawEvent) -> Result<Option<ClassifiedPost>> {
        let Some(message) = self.chain.try_process(event.into_message())? else {
            return Ok(None);
        };
        self.parser.parse_message(&message)
    }

    /// Classify many events in parallel, keeping input order.
    pub fn classify_batch(&self, events: Vec<RawEvent>) -> Vec<Result<Option<ClassifiedPost>>> {
        let start_time = Instant::now();
        let count = events.len();

        let results: Vec<_> = events
            .into_par_iter()
            .map(|event| self.classify_event(event))
            .collect();

        let recognized = results
            .iter()
            .filter(|result| matches!(result, Ok(Some(_))))
            .count();
        info!(
            "Classified {} events ({} posts) in {:?}",
            count,
            recognized,
            start_time.elapsed()
        );
        results
    }
}

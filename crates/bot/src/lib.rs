//! Bot crate for classifying chat messages into posts.
//!
//! This crate wires a filter chain in front of the message parser and
//! provides the bot's own filters and configuration.

pub mod classifier;
pub mod config;
pub mod event;
pub mod filters;

pub use classifier::Classifier;
pub use config::BotConfig;
pub use event::RawEvent;

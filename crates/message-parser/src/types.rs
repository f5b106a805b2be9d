//! Core domain types for message classification.
//!
//! - `ChatMessage`: one message as received from a channel
//! - `PostKind`: the fixed set of things a message can be classified as
//! - `PostBody`: the type-specific fields extracted by a format handler
//! - `ClassifiedPost`: a `PostBody` plus who posted it and where

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Input
// =============================================================================

/// A single chat message and its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub poster: String,
    pub channel: String,
    pub text: String,
}

impl ChatMessage {
    pub fn new(
        poster: impl Into<String>,
        channel: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            poster: poster.into(),
            channel: channel.into(),
            text: text.into(),
        }
    }
}

// =============================================================================
// Output
// =============================================================================

/// Semantic type of a classified post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    Quote,
    Image,
    Link,
    Video,
    Fact,
    TrueOrFalse,
    Definition,
}

impl PostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Quote => "quote",
            PostKind::Image => "image",
            PostKind::Link => "link",
            PostKind::Video => "video",
            PostKind::Fact => "fact",
            PostKind::TrueOrFalse => "true_or_false",
            PostKind::Definition => "definition",
        }
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields extracted from a message, tagged with their post type.
///
/// Optional fields are `Some` only when the message supplied them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PostBody {
    Quote {
        quote: String,
        source: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    Image {
        source: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Link {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Video {
        embed: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Fact {
        title: String,
    },
    TrueOrFalse {
        title: String,
    },
    Definition {
        title: String,
    },
}

impl PostBody {
    pub fn kind(&self) -> PostKind {
        match self {
            PostBody::Quote { .. } => PostKind::Quote,
            PostBody::Image { .. } => PostKind::Image,
            PostBody::Link { .. } => PostKind::Link,
            PostBody::Video { .. } => PostKind::Video,
            PostBody::Fact { .. } => PostKind::Fact,
            PostBody::TrueOrFalse { .. } => PostKind::TrueOrFalse,
            PostBody::Definition { .. } => PostKind::Definition,
        }
    }
}

/// A classified message: the extracted body plus poster and channel.
///
/// Serializes flat, e.g. `{"poster":"rick","channel":"#c","type":"fact","title":"FACT: ..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedPost {
    pub poster: String,
    pub channel: String,
    #[serde(flatten)]
    pub body: PostBody,
}

impl ClassifiedPost {
    pub fn kind(&self) -> PostKind {
        self.body.kind()
    }
}

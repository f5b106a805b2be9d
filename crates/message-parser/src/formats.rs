//! The bot's built-in message formats.
//!
//! Formats overlap (an image link is also a link, a suppressed link is
//! still a URL, a fact may mention a URL), and the parser takes the first
//! match, so the registration order below is the precedence:
//!
//! 1. `ignore_link` - any `!`-prefixed URL; always yields nothing
//! 2. `quote` - `"text" --source (url)`
//! 3. `fact` - `fact: BODY`
//! 4. `true_or_false` - `T or F: BODY`, `true or false? BODY`
//! 5. `definition` - `definition: TERM: BODY`, `definition: TERM = BODY`
//! 6. `natural_definition` - `define TERM as BODY`
//! 7. `image` - `[title] URL.jpg|png|gif [caption]`
//! 8. `video` - `[title] VIDEO-URL [caption]`
//! 9. `link` - `[name] URL [description]`
//!
//! The prefixed text formats sit ahead of every URL format that takes a
//! leading title, so `fact: see http://x.com` stays a fact instead of a
//! link named "fact: see". Among the URL formats the more specific ones
//! come first and `link` is the fallback.

use crate::error::{FormatError, Result};
use crate::registry::{FormatRegistry, FormatSpec};
use crate::types::PostBody;
use anyhow::anyhow;
use regex::{Captures, Regex};

pub const IGNORE_LINK: &str = "ignore_link";
pub const QUOTE: &str = "quote";
pub const IMAGE: &str = "image";
pub const VIDEO: &str = "video";
pub const LINK: &str = "link";
pub const FACT: &str = "fact";
pub const TRUE_OR_FALSE: &str = "true_or_false";
pub const DEFINITION: &str = "definition";
pub const NATURAL_DEFINITION: &str = "natural_definition";

/// Names of the built-in formats in the order they are tried.
pub const DEFAULT_ORDER: [&str; 9] = [
    IGNORE_LINK,
    QUOTE,
    FACT,
    TRUE_OR_FALSE,
    DEFINITION,
    NATURAL_DEFINITION,
    IMAGE,
    VIDEO,
    LINK,
];

// =============================================================================
// Patterns
// =============================================================================

const IGNORE_LINK_PATTERN: &str = r"(?i)!(?:https?|ftp)://";

const QUOTE_PATTERN: &str = r#"^\s*["“](?P<quote>[^"”]+)["”]\s*--\s*(?P<source>.+?)(?:\s*\((?P<url>(?:https?|ftp)://\S+)\))?\s*$"#;

const IMAGE_PATTERN: &str = r"(?i)^(?:(?P<title>.*?)\s+)?(?P<source>(?:https?|ftp)://\S+\.(?:jpg|png|gif))(?:\s+(?P<caption>.*?))?\s*$";

const VIDEO_PATTERN: &str = r"(?i)^(?:(?P<title>.*?)\s+)?(?P<embed>https?://(?:www\.|m\.)?(?:youtube\.com/watch\?\S*?\bv=[\w-]+|youtu\.be/[\w-]+|vimeo\.com/\d+)\S*)(?:\s+(?P<caption>.*?))?\s*$";

const LINK_PATTERN: &str = r"(?i)^(?:(?P<name>.*?)\s+)?(?P<url>(?:https?|ftp)://\S+)(?:\s+(?P<description>.*?))?\s*$";

const FACT_PATTERN: &str = r"(?i)^\s*fact\s*:\s*(?P<body>\S.*?)\s*$";

const TRUE_OR_FALSE_PATTERN: &str =
    r"(?i)^\s*(?:t|true)\s+or\s+(?:f|false)\s*[:?]\s*(?P<body>\S.*?)\s*$";

const DEFINITION_PATTERN: &str =
    r"(?i)^\s*definition\s*:\s*(?P<term>[^:=\s][^:=]*?)\s*[:=]\s*(?P<body>\S.*?)\s*$";

const NATURAL_DEFINITION_PATTERN: &str = r"(?i)^\s*define\s+(?P<term>\S.*?)\s+as\s+(?P<body>\S.*?)\s*$";

/// Register the built-in formats, in precedence order.
pub fn register_defaults(registry: &FormatRegistry) -> Result<()> {
    for spec in default_formats()? {
        registry.register_format(spec)?;
    }
    tracing::info!("Registered {} built-in message formats", DEFAULT_ORDER.len());
    Ok(())
}

/// The built-in formats, in precedence order, ready to register.
pub fn default_formats() -> Result<Vec<FormatSpec>> {
    Ok(vec![
        FormatSpec::new(IGNORE_LINK)
            .pattern(compile(IGNORE_LINK, IGNORE_LINK_PATTERN)?)
            .description("a URL prefixed with '!' anywhere in the message; never posted")
            .handler(|_| Ok(None)),
        FormatSpec::new(QUOTE)
            .pattern(compile(QUOTE, QUOTE_PATTERN)?)
            .description("\"QUOTE\" --SOURCE (URL)")
            .handler(quote),
        FormatSpec::new(FACT)
            .pattern(compile(FACT, FACT_PATTERN)?)
            .description("fact: BODY")
            .handler(fact),
        FormatSpec::new(TRUE_OR_FALSE)
            .pattern(compile(TRUE_OR_FALSE, TRUE_OR_FALSE_PATTERN)?)
            .description("T or F: BODY / true or false? BODY")
            .handler(true_or_false),
        FormatSpec::new(DEFINITION)
            .pattern(compile(DEFINITION, DEFINITION_PATTERN)?)
            .description("definition: TERM: BODY / definition: TERM = BODY")
            .handler(definition),
        FormatSpec::new(NATURAL_DEFINITION)
            .pattern(compile(NATURAL_DEFINITION, NATURAL_DEFINITION_PATTERN)?)
            .description("define TERM as BODY")
            .handler(definition),
        FormatSpec::new(IMAGE)
            .pattern(compile(IMAGE, IMAGE_PATTERN)?)
            .description("TITLE IMAGE-URL CAPTION")
            .handler(image),
        FormatSpec::new(VIDEO)
            .pattern(compile(VIDEO, VIDEO_PATTERN)?)
            .description("TITLE VIDEO-URL CAPTION")
            .handler(video),
        FormatSpec::new(LINK)
            .pattern(compile(LINK, LINK_PATTERN)?)
            .description("NAME URL DESCRIPTION")
            .handler(link),
    ])
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| FormatError::InvalidPattern {
        name: name.to_string(),
        source,
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Trimmed text of an optional group; blank counts as absent.
fn optional(caps: &Captures<'_>, group: &str) -> Option<String> {
    caps.name(group)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn required(caps: &Captures<'_>, group: &str) -> anyhow::Result<String> {
    caps.name(group)
        .map(|m| m.as_str().trim().to_string())
        .ok_or_else(|| anyhow!("pattern matched without a '{}' group", group))
}

fn quote(caps: &Captures<'_>) -> anyhow::Result<Option<PostBody>> {
    Ok(Some(PostBody::Quote {
        quote: required(caps, "quote")?,
        source: required(caps, "source")?,
        url: optional(caps, "url"),
    }))
}

fn image(caps: &Captures<'_>) -> anyhow::Result<Option<PostBody>> {
    Ok(Some(PostBody::Image {
        source: required(caps, "source")?,
        caption: optional(caps, "caption"),
        title: optional(caps, "title"),
    }))
}

fn video(caps: &Captures<'_>) -> anyhow::Result<Option<PostBody>> {
    Ok(Some(PostBody::Video {
        embed: required(caps, "embed")?,
        caption: optional(caps, "caption"),
        title: optional(caps, "title"),
    }))
}

fn link(caps: &Captures<'_>) -> anyhow::Result<Option<PostBody>> {
    Ok(Some(PostBody::Link {
        url: required(caps, "url")?,
        name: optional(caps, "name"),
        description: optional(caps, "description"),
    }))
}

fn fact(caps: &Captures<'_>) -> anyhow::Result<Option<PostBody>> {
    Ok(Some(PostBody::Fact {
        title: format!("FACT: {}", required(caps, "body")?),
    }))
}

fn true_or_false(caps: &Captures<'_>) -> anyhow::Result<Option<PostBody>> {
    Ok(Some(PostBody::TrueOrFalse {
        title: format!("True or False?  {}", required(caps, "body")?),
    }))
}

fn definition(caps: &Captures<'_>) -> anyhow::Result<Option<PostBody>> {
    Ok(Some(PostBody::Definition {
        title: format!(
            "DEFINITION: {}: {}",
            required(caps, "term")?,
            required(caps, "body")?
        ),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns_compile() {
        let formats = default_formats().unwrap();
        assert_eq!(formats.len(), DEFAULT_ORDER.len());
    }

    #[test]
    fn test_register_defaults_in_precedence_order() {
        let registry = FormatRegistry::new();
        register_defaults(&registry).unwrap();

        let names: Vec<String> = registry
            .formats()
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        assert_eq!(names, DEFAULT_ORDER);
    }

    #[test]
    fn test_every_default_format_is_described() {
        let registry = FormatRegistry::new();
        register_defaults(&registry).unwrap();

        assert!(registry.formats().iter().all(|f| f.description().is_some()));
    }

    #[test]
    fn test_optional_treats_blank_as_absent() {
        let re = Regex::new(r"^(?P<a>\s*)-(?P<b>x)?$").unwrap();
        let caps = re.captures("  -").unwrap();

        assert_eq!(optional(&caps, "a"), None);
        assert_eq!(optional(&caps, "b"), None);
        assert!(required(&caps, "b").is_err());
    }
}

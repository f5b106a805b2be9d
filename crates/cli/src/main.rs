use anyhow::{Context, Result};
use bot::{BotConfig, Classifier, RawEvent};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use message_parser::{ChatMessage, ClassifiedPost, PostBody};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// postbot - classify chat messages into posts
#[derive(Parser)]
#[command(name = "postbot")]
#[command(about = "Classify chat messages into quotes, images, links, videos, facts and definitions", long_about = None)]
struct Cli {
    /// Longest message (in characters) that is still classified
    #[arg(long, global = true, default_value_t = bot::config::DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Never classify messages from this nick (repeatable)
    #[arg(long = "ignore-poster", global = true)]
    ignore_posters: Vec<String>,

    /// Skip the filter chain and parse messages as-is
    #[arg(long, global = true)]
    no_filters: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Output::Pretty)]
    output: Output,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single message
    Classify {
        /// Nick of the poster
        #[arg(long, default_value = "anonymous")]
        poster: String,

        /// Channel the message was posted on
        #[arg(long, default_value = "#general")]
        channel: String,

        /// Message text
        text: String,
    },

    /// Classify JSON-lines events ({"poster", "channel", "text"}) from a file or stdin
    Batch {
        /// Input file, or '-' for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// List the registered formats in the order they are tried
    Formats,

    /// List the registered filters in the order they run
    Filters,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = BotConfig {
        max_length: cli.max_length,
        ignored_posters: cli.ignore_posters,
        filters_enabled: !cli.no_filters,
    };
    let classifier = Classifier::from_config(&config).context("Failed to set up classifier")?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Classify {
            poster,
            channel,
            text,
        } => handle_classify(&classifier, ChatMessage::new(poster, channel, text), cli.output)?,
        Commands::Batch { input } => handle_batch(&classifier, &input, cli.output)?,
        Commands::Formats => handle_formats(&classifier),
        Commands::Filters => handle_filters(&classifier),
    }

    Ok(())
}

/// Handle the 'classify' command
fn handle_classify(classifier: &Classifier, message: ChatMessage, output: Output) -> Result<()> {
    let post = classifier.classify(message)?;
    print_post(post.as_ref(), output)
}

/// Handle the 'batch' command
fn handle_batch(classifier: &Classifier, input: &Path, output: Output) -> Result<()> {
    let reader: Box<dyn BufRead> = if input.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(input)
            .with_context(|| format!("Failed to open {}", input.display()))?;
        Box::new(BufReader::new(file))
    };

    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue; // Skip empty lines
        }
        let event: RawEvent = serde_json::from_str(&line)
            .with_context(|| format!("Invalid event on line {}", idx + 1))?;
        events.push(event);
    }

    let start = Instant::now();
    let results = classifier.classify_batch(events);
    tracing::debug!("Batch classified in {:?}", start.elapsed());

    for (idx, result) in results.into_iter().enumerate() {
        match result {
            Ok(post) => print_post(post.as_ref(), output)?,
            Err(err) => {
                tracing::warn!("Event {} could not be classified: {:#}", idx + 1, err);
                println!("{}", failed_line(output));
            }
        }
    }
    Ok(())
}

/// Handle the 'formats' command
fn handle_formats(classifier: &Classifier) {
    println!("{}", "Formats (first match wins):".bold().blue());
    for (idx, format) in classifier.formats().formats().iter().enumerate() {
        println!(
            "{:>2}. {} {}",
            idx + 1,
            format.name().green(),
            format.description().unwrap_or("").dimmed()
        );
    }
}

/// Handle the 'filters' command
fn handle_filters(classifier: &Classifier) {
    let kinds = classifier.filters().kinds();
    if kinds.is_empty() {
        println!("{}", "No filters registered".yellow());
        return;
    }
    println!("{}", "Filters (run in this order):".bold().blue());
    for (idx, kind) in kinds.iter().enumerate() {
        println!("{:>2}. {}", idx + 1, kind.green());
    }
}

fn print_post(post: Option<&ClassifiedPost>, output: Output) -> Result<()> {
    match output {
        Output::Json => println!("{}", serde_json::to_string(&post)?),
        Output::Pretty => match post {
            Some(post) => println!("{}", pretty(post)),
            None => println!("{}", "(nothing)".dimmed()),
        },
    }
    Ok(())
}

/// Placeholder printed for an event that could not be classified, so output
/// lines stay aligned with input events.
fn failed_line(output: Output) -> String {
    match output {
        Output::Json => "null".to_string(),
        Output::Pretty => "(error)".dimmed().to_string(),
    }
}

fn pretty(post: &ClassifiedPost) -> String {
    let header = format!("[{}] <{}> {}", post.kind(), post.poster, post.channel);
    let mut lines = vec![header.bold().to_string()];
    let mut field = |name: &str, value: Option<&String>| {
        if let Some(value) = value {
            lines.push(format!("  {} {}", format!("{}:", name).cyan(), value));
        }
    };

    match &post.body {
        PostBody::Quote { quote, source, url } => {
            field("quote", Some(quote));
            field("source", Some(source));
            field("url", url.as_ref());
        }
        PostBody::Image {
            source,
            caption,
            title,
        } => {
            field("title", title.as_ref());
            field("source", Some(source));
            field("caption", caption.as_ref());
        }
        PostBody::Link {
            url,
            name,
            description,
        } => {
            field("name", name.as_ref());
            field("url", Some(url));
            field("description", description.as_ref());
        }
        PostBody::Video {
            embed,
            caption,
            title,
        } => {
            field("title", title.as_ref());
            field("embed", Some(embed));
            field("caption", caption.as_ref());
        }
        PostBody::Fact { title }
        | PostBody::TrueOrFalse { title }
        | PostBody::Definition { title } => field("title", Some(title)),
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "postbot",
            "classify",
            "--output",
            "json",
            "--max-length",
            "10",
            "--ignore-poster",
            "bot",
            "--no-filters",
            "hello",
        ])
        .unwrap();

        assert_eq!(cli.output, Output::Json);
        assert_eq!(cli.max_length, 10);
        assert_eq!(cli.ignore_posters, vec!["bot"]);
        assert!(cli.no_filters);
        assert!(matches!(cli.command, Commands::Classify { ref text, .. } if text == "hello"));
    }

    #[test]
    fn test_options_accepted_before_subcommand() {
        let cli = Cli::try_parse_from(["postbot", "--output", "json", "batch", "events.jsonl"]).unwrap();

        assert_eq!(cli.output, Output::Json);
        assert_eq!(cli.max_length, bot::config::DEFAULT_MAX_LENGTH);
        assert!(matches!(cli.command, Commands::Batch { .. }));
    }

    #[test]
    fn test_failed_event_prints_a_line_in_every_mode() {
        assert_eq!(failed_line(Output::Json), "null");

        assert!(failed_line(Output::Pretty).contains("(error)"));
    }
}

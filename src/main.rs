use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use veil::config::Config;
use veil::output::terminal;
use veil::pipeline::batch;
use veil::Moderator;

/// Veil: content safety classification for posts, comments and reviews.
///
/// Screens text with a local lexicon and spoiler patterns, then a remote
/// classifier when one is configured.
#[derive(Parser)]
#[command(name = "veil", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single text
    Classify {
        /// The text to classify (omit and pass --stdin to read it instead)
        text: Option<String>,

        /// Read the text from standard input
        #[arg(long, conflicts_with = "text")]
        stdin: bool,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a file of JSON lines, each {"text": "..."}
    Batch {
        /// Path to the JSON-lines file
        file: PathBuf,

        /// Number of texts to classify in parallel (default: 8)
        #[arg(long, default_value = "8")]
        concurrency: usize,

        /// Print one JSON object per line instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the effective moderation configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("veil=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let moderator = Moderator::from_config(&config)?;

    match cli.command {
        Commands::Classify { text, stdin, json } => {
            let text = match (text, stdin) {
                (Some(text), _) => text,
                (None, true) => read_stdin()?,
                (None, false) => anyhow::bail!("Provide the text to classify, or pass --stdin"),
            };

            let verdict = moderator.classify(&text).await;

            if json {
                println!("{}", serde_json::to_string(&verdict)?);
            } else {
                terminal::display_verdict(&text, &verdict);
            }
        }

        Commands::Batch {
            file,
            concurrency,
            json,
        } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let lines: Vec<String> = contents.lines().map(str::to_string).collect();

            let items = batch::run(&moderator, &lines, concurrency, !json).await;
            info!(classified = items.len(), "Batch complete");

            if json {
                for item in &items {
                    println!("{}", serde_json::to_string(item)?);
                }
            } else {
                println!(
                    "{}",
                    format!("=== {} ({} requests) ===", file.display(), items.len()).bold()
                );
                terminal::display_batch(&items);
            }
        }

        Commands::Status => {
            terminal::display_status(&config, &moderator);
        }
    }

    Ok(())
}

/// Read all of stdin as UTF-8. Anything else is an input error.
fn read_stdin() -> Result<String> {
    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .context("Failed to read standard input")?;
    String::from_utf8(buf).context("Standard input is not valid UTF-8")
}

// Colored terminal output for verdicts, batch results, and status.
//
// main.rs delegates all terminal formatting here.

use colored::Colorize;

use crate::config::Config;
use crate::moderation::{ModerationVerdict, Moderator};
use crate::pipeline::batch::{BatchItem, BatchOutcome, BatchSummary};

/// Display a single verdict.
pub fn display_verdict(text: &str, verdict: &ModerationVerdict) {
    println!("  Text:    {}", super::truncate_chars(text, 120).dimmed());
    println!("  Verdict: {}", verdict_label(verdict));
    if let Some(reason) = &verdict.reason {
        println!("  Reason:  {reason}");
    }
}

/// Display batch results, one line per request, then totals.
pub fn display_batch(items: &[BatchItem]) {
    for item in items {
        match &item.outcome {
            BatchOutcome::Verdict(verdict) => {
                let reason = verdict.reason.as_deref().unwrap_or("");
                println!("  {:>5}  {:<10} {}", item.line, verdict_label(verdict), reason.dimmed());
            }
            BatchOutcome::InputError(e) => {
                println!("  {:>5}  {:<10} {}", item.line, "INVALID".yellow(), e.dimmed());
            }
        }
    }

    let summary = BatchSummary::from_items(items);
    println!();
    println!(
        "  {} safe, {} toxic, {} spoiler, {} invalid",
        summary.safe.to_string().green(),
        summary.toxic.to_string().red(),
        summary.spoiler.to_string().bright_red(),
        summary.invalid.to_string().yellow(),
    );
}

/// Display the effective configuration. Never prints the API key.
pub fn display_status(config: &Config, moderator: &Moderator) {
    println!("\n{}", "=== Moderation Status ===".bold());

    match moderator.degraded_cause() {
        None => println!("  Remote classifier: {}", "enabled".green()),
        Some(cause) => println!(
            "  Remote classifier: {} ({})",
            "local-only".yellow(),
            cause.dimmed()
        ),
    }
    if !config.remote.api_url.is_empty() {
        println!("  Endpoint: {}", config.remote.api_url);
    }
    println!("  Timeout: {}s", config.remote.timeout.as_secs());

    let policy = moderator.policy();
    let categories: Vec<&str> = policy.categories().iter().map(|c| c.name()).collect();
    println!("  Threshold: {:.2}", policy.threshold());
    println!("  Categories: {}", categories.join(", "));
    println!("  Locale: {}", moderator.locale());
    println!("  Lexicon terms: {}", moderator.lexicon().len());
    println!(
        "  Spoiler checks: {} keywords, {} patterns",
        moderator.spoilers().keyword_count(),
        moderator.spoilers().pattern_count()
    );
}

fn verdict_label(verdict: &ModerationVerdict) -> colored::ColoredString {
    if verdict.is_toxic {
        "TOXIC".red().bold()
    } else if verdict.is_spoiler {
        "SPOILER".bright_red()
    } else {
        "SAFE".green()
    }
}

// Batch classification: many JSON-lines requests through one moderator.
//
// Each line is `{"text": "..."}`. Lines are classified concurrently, but
// results come back in input order. A line that is not a valid request is an
// input error for that line only; the rest of the batch still runs.

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::moderation::{ModerationVerdict, Moderator};

/// Inbound request shape. `text` must be present and a string.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

/// Decode one request line. Malformed input is the caller's error, never a
/// moderation decision.
pub fn parse_request(line: &str) -> Result<ClassifyRequest> {
    serde_json::from_str(line).context("Invalid request: expected {\"text\": \"...\"}")
}

/// Outcome for one input line (1-based).
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub line: usize,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchOutcome {
    Verdict(ModerationVerdict),
    InputError(String),
}

/// Totals for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub safe: usize,
    pub toxic: usize,
    pub spoiler: usize,
    pub invalid: usize,
}

impl BatchSummary {
    pub fn from_items(items: &[BatchItem]) -> Self {
        let mut summary = Self::default();
        for item in items {
            match &item.outcome {
                BatchOutcome::Verdict(v) if v.is_toxic => summary.toxic += 1,
                BatchOutcome::Verdict(v) if v.is_spoiler => summary.spoiler += 1,
                BatchOutcome::Verdict(_) => summary.safe += 1,
                BatchOutcome::InputError(_) => summary.invalid += 1,
            }
        }
        summary
    }
}

/// Classify every non-blank line, `concurrency` at a time.
pub async fn run(
    moderator: &Moderator,
    lines: &[String],
    concurrency: usize,
    show_progress: bool,
) -> Vec<BatchItem> {
    let work: Vec<(usize, &str)> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line.as_str()))
        .collect();

    info!(requests = work.len(), concurrency, "Starting batch classification");

    let pb = if show_progress {
        let pb = ProgressBar::new(work.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Classifying [{bar:30}] {pos}/{len} ({eta})")
                .expect("valid template"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut items: Vec<BatchItem> = stream::iter(work.into_iter().map(|(line, raw)| {
        let pb = &pb;
        async move {
            let outcome = match parse_request(raw) {
                Ok(request) => BatchOutcome::Verdict(moderator.classify(&request.text).await),
                Err(e) => {
                    warn!(line, error = %e, "Skipping malformed request");
                    BatchOutcome::InputError(format!("{e:#}"))
                }
            };
            pb.inc(1);
            BatchItem { line, outcome }
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;
    pb.finish_and_clear();

    items.sort_by_key(|item| item.line);
    items
}

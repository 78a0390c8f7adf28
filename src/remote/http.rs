// HTTP implementation of the remote classifier.
//
// One POST per call with `{"text": ...}` and the key/host headers. The
// response's `moderation_classes` map is validated into typed category
// scores in a single step. Anything that does not fit becomes
// `UnexpectedShape`, so "no signal" never looks like "nothing wrong".

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::error::ClassifierError;
use super::traits::{Category, CategoryScore, RemoteClassifier};
use crate::config::RemoteConfig;
use crate::output::truncate_chars;

/// Remote classifier backed by a JSON-over-HTTP moderation endpoint.
#[derive(Debug)]
pub struct HttpClassifier {
    client: Client,
    url: Url,
}

impl HttpClassifier {
    /// Build the client once: headers, timeout and endpoint are validated here.
    pub fn new(config: &RemoteConfig) -> Result<Self, ClassifierError> {
        if !config.is_configured() {
            return Err(ClassifierError::MissingApiKey);
        }

        let url = Url::parse(config.api_url.trim()).map_err(|e| {
            ClassifierError::Misconfigured(format!("invalid API URL '{}': {e}", config.api_url))
        })?;

        let host = if config.api_host.trim().is_empty() {
            url.host_str()
                .ok_or_else(|| {
                    ClassifierError::Misconfigured("API URL has no host to send as API host".into())
                })?
                .to_string()
        } else {
            config.api_host.trim().to_string()
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            header_name(&config.key_header)?,
            header_value(config.api_key.trim(), "API key", true)?,
        );
        headers.insert(
            header_name(&config.host_header)?,
            header_value(&host, "API host", false)?,
        );

        let client = Client::builder()
            .user_agent(concat!("veil/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClassifierError::Misconfigured(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl RemoteClassifier for HttpClassifier {
    async fn classify_remote(&self, text: &str) -> Result<Vec<CategoryScore>, ClassifierError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&ModerationRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::UpstreamStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let scores = parse_response(&body)?;

        debug!(
            scores = ?scores,
            text_preview = %truncate_chars(text, 50),
            "Remote classification complete"
        );

        Ok(scores)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Validate a success body into one score per recognized category.
///
/// Scores come back in category declaration order. Unrecognized keys are
/// ignored; a body with no recognized category at all is rejected.
pub fn parse_response(body: &str) -> Result<Vec<CategoryScore>, ClassifierError> {
    let response: ModerationResponse = serde_json::from_str(body)
        .map_err(|e| ClassifierError::UnexpectedShape(format!("invalid body: {e}")))?;

    let mut scores = Vec::new();
    for (key, value) in &response.moderation_classes {
        let Some(category) = Category::from_key(key) else {
            continue;
        };
        let score = value
            .as_f64()
            .filter(|s| (0.0..=1.0).contains(s))
            .ok_or_else(|| {
                ClassifierError::UnexpectedShape(format!(
                    "score for '{key}' is not a number in [0, 1]: {value}"
                ))
            })?;
        scores.push(CategoryScore { category, score });
    }

    if scores.is_empty() {
        return Err(ClassifierError::UnexpectedShape(
            "moderation_classes has no recognized categories".into(),
        ));
    }

    // Both spellings of an aliased key may be present; keep one score each.
    scores.sort_by_key(|s| s.category);
    scores.dedup_by_key(|s| s.category);
    Ok(scores)
}

fn header_name(name: &str) -> Result<HeaderName, ClassifierError> {
    HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|_| ClassifierError::Misconfigured(format!("invalid header name '{name}'")))
}

fn header_value(value: &str, what: &str, sensitive: bool) -> Result<HeaderValue, ClassifierError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|_| ClassifierError::Misconfigured(format!("{what} is not a valid header value")))?;
    header.set_sensitive(sensitive);
    Ok(header)
}

// --- Moderation endpoint request/response types ---

#[derive(Serialize)]
struct ModerationRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ModerationResponse {
    moderation_classes: Map<String, Value>,
}

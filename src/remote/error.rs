// Errors from the remote classifier. None of these reach publishing callers:
// the orchestrator logs them and fails open.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Called without an API key. The orchestrator gates on this first.
    #[error("Remote classifier called without an API key")]
    MissingApiKey,

    #[error("Remote classifier misconfigured: {0}")]
    Misconfigured(String),

    /// Timeout, DNS failure, refused connection, or a broken response stream.
    #[error("Remote classifier unreachable{}: {}", timeout_note(.timed_out), .source)]
    Unreachable {
        timed_out: bool,
        #[source]
        source: reqwest::Error,
    },

    #[error("Remote classifier returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("Remote classifier returned an unexpected response: {0}")]
    UnexpectedShape(String),
}

impl From<reqwest::Error> for ClassifierError {
    fn from(source: reqwest::Error) -> Self {
        ClassifierError::Unreachable {
            timed_out: source.is_timeout(),
            source,
        }
    }
}

fn timeout_note(timed_out: &bool) -> &'static str {
    if *timed_out {
        " (timed out)"
    } else {
        ""
    }
}

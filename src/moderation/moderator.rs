// Classification orchestrator: the cascade callers invoke.
//
// Order is lexicon, then spoiler scan, then the remote classifier. The first
// positive signal wins and skips everything after it, so the network call
// only happens for text both local checks passed. Remote failures of any kind
// fail open: an outage must never block publishing.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use super::once::OnceFlag;
use super::policy::ScoringPolicy;
use super::verdict::ModerationVerdict;
use crate::config::Config;
use crate::lexicon::Lexicon;
use crate::locale::Locale;
use crate::output::truncate_chars;
use crate::remote::http::HttpClassifier;
use crate::remote::traits::{CategoryScore, RemoteClassifier};
use crate::spoiler::SpoilerScanner;

enum RemoteStage {
    Enabled(Arc<dyn RemoteClassifier>),
    Disabled { cause: String },
}

/// Runs the local checks and, when configured, the remote classifier.
///
/// Holds only read-only tables plus a one-shot log flag, so a single instance
/// can serve concurrent `classify` calls behind an `Arc`.
pub struct Moderator {
    lexicon: Lexicon,
    spoilers: SpoilerScanner,
    remote: RemoteStage,
    policy: ScoringPolicy,
    locale: Locale,
    degraded_notice: OnceFlag,
}

impl Moderator {
    /// A local-only moderator. Add a remote stage with [`Moderator::with_remote`].
    pub fn new(lexicon: Lexicon, spoilers: SpoilerScanner, locale: Locale) -> Self {
        Self {
            lexicon,
            spoilers,
            remote: RemoteStage::Disabled {
                cause: "no remote classifier configured".to_string(),
            },
            policy: ScoringPolicy::default(),
            locale,
            degraded_notice: OnceFlag::new(),
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn RemoteClassifier>) -> Self {
        self.remote = RemoteStage::Enabled(remote);
        self
    }

    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the full pipeline from configuration.
    ///
    /// Only an unreadable extra lexicon file is an error. A missing key or an
    /// unusable remote endpoint leaves the moderator in local-only mode.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut lexicon = Lexicon::builtin(config.locale);
        if let Some(path) = &config.lexicon_path {
            lexicon = lexicon.load_extra(path)?;
        }

        let moderator = Self::new(lexicon, SpoilerScanner::builtin(config.locale), config.locale)
            .with_policy(config.policy.clone());

        if !config.remote.is_configured() {
            return Ok(moderator.without_remote("MODERATION_API_KEY not set"));
        }

        match HttpClassifier::new(&config.remote) {
            Ok(client) => Ok(moderator.with_remote(Arc::new(client))),
            Err(e) => {
                let moderator = moderator.without_remote(e.to_string());
                // The construction-time warning replaces the first-call notice.
                if moderator.degraded_notice.first() {
                    warn!(error = %e, "Remote moderation misconfigured; using local checks only");
                }
                Ok(moderator)
            }
        }
    }

    fn without_remote(mut self, cause: impl Into<String>) -> Self {
        self.remote = RemoteStage::Disabled {
            cause: cause.into(),
        };
        self
    }

    /// Classify one piece of text.
    ///
    /// Always produces a verdict: unsafe content is a normal result and
    /// remote failures resolve to safe. Dropping the returned future cancels
    /// any in-flight remote request without producing a verdict.
    pub async fn classify(&self, text: &str) -> ModerationVerdict {
        if let RemoteStage::Disabled { cause } = &self.remote {
            if self.degraded_notice.first() {
                warn!(cause = %cause, "Remote moderation disabled; classifying with local checks only");
            }
        }

        if let Some(term) = self.lexicon.find(text) {
            debug!(term, text_preview = %truncate_chars(text, 50), "Lexicon match");
            return ModerationVerdict::toxic(self.locale.toxic_reason());
        }

        if self.spoilers.has_spoiler(text) {
            debug!(text_preview = %truncate_chars(text, 50), "Spoiler match");
            return ModerationVerdict::spoiler(self.locale.spoiler_reason());
        }

        let RemoteStage::Enabled(remote) = &self.remote else {
            return ModerationVerdict::safe();
        };

        match remote.classify_remote(text).await {
            Ok(scores) => self.verdict_from_scores(&scores),
            Err(e) => {
                warn!(
                    classifier = remote.name(),
                    error = %e,
                    "Remote classification failed; treating content as safe"
                );
                ModerationVerdict::safe()
            }
        }
    }

    fn verdict_from_scores(&self, scores: &[CategoryScore]) -> ModerationVerdict {
        let flagged = self.policy.flagged(scores);
        if flagged.is_empty() {
            return ModerationVerdict::safe();
        }
        debug!(categories = ?flagged, threshold = self.policy.threshold(), "Remote flagged content");
        ModerationVerdict::toxic(self.locale.flagged_reason(&flagged))
    }

    /// True when the remote stage is not running.
    pub fn is_degraded(&self) -> bool {
        matches!(self.remote, RemoteStage::Disabled { .. })
    }

    /// Why the remote stage is off, if it is.
    pub fn degraded_cause(&self) -> Option<&str> {
        match &self.remote {
            RemoteStage::Disabled { cause } => Some(cause.as_str()),
            RemoteStage::Enabled(_) => None,
        }
    }

    /// Re-arm the once-only degradation warning.
    pub fn reset_degraded_notice(&self) {
        self.degraded_notice.reset();
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn spoilers(&self) -> &SpoilerScanner {
        &self.spoilers
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::error::ClassifierError;
    use crate::remote::traits::Category;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns fixed scores and counts how often it was called.
    struct Scripted {
        scores: Vec<CategoryScore>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RemoteClassifier for Scripted {
        async fn classify_remote(&self, _text: &str) -> Result<Vec<CategoryScore>, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.scores.clone())
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn moderator_with(scores: Vec<CategoryScore>) -> (Moderator, Arc<Scripted>) {
        let remote = Arc::new(Scripted {
            scores,
            calls: AtomicUsize::new(0),
        });
        let moderator = Moderator::new(
            Lexicon::new(["badword"]),
            SpoilerScanner::builtin(Locale::En),
            Locale::En,
        )
        .with_remote(remote.clone());
        (moderator, remote)
    }

    #[tokio::test]
    async fn toxic_wins_over_spoiler_and_skips_remote() {
        let (moderator, remote) = moderator_with(vec![]);
        let verdict = moderator
            .classify("badword: in chapter 3 the hero dies")
            .await;
        assert!(verdict.is_toxic);
        assert!(!verdict.is_spoiler);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn remote_scores_below_threshold_are_safe() {
        let (moderator, remote) = moderator_with(vec![CategoryScore {
            category: Category::Toxic,
            score: 0.1,
        }]);
        let verdict = moderator.classify("a pleasant review").await;
        assert_eq!(verdict, ModerationVerdict::safe());
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn local_only_moderator_reports_degraded() {
        let moderator = Moderator::new(Lexicon::default(), SpoilerScanner::default(), Locale::En);
        assert!(moderator.is_degraded());
        assert_eq!(moderator.degraded_cause(), Some("no remote classifier configured"));
    }

    #[test]
    fn missing_key_cause_names_the_variable() {
        let moderator = Moderator::from_config(&Config::default()).unwrap();
        assert_eq!(moderator.degraded_cause(), Some("MODERATION_API_KEY not set"));
    }
}

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::locale::Locale;
use crate::moderation::policy::ScoringPolicy;
use crate::remote::traits::Category;

pub const DEFAULT_KEY_HEADER: &str = "X-RapidAPI-Key";
pub const DEFAULT_HOST_HEADER: &str = "X-RapidAPI-Host";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Settings for the remote moderation endpoint.
///
/// An empty API key is a supported state: the pipeline runs local checks only.
#[derive(Clone)]
pub struct RemoteConfig {
    pub api_key: String,
    /// Value for the host header. Derived from `api_url` when empty.
    pub api_host: String,
    pub api_url: String,
    pub key_header: String,
    pub host_header: String,
    /// Upper bound for one remote call, connect through body.
    pub timeout: Duration,
}

impl RemoteConfig {
    /// True when an API key is present, i.e. remote classification should run.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_host: String::new(),
            api_url: String::new(),
            key_header: DEFAULT_KEY_HEADER.to_string(),
            host_header: DEFAULT_HOST_HEADER.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Never print the key itself.
impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("api_key", &if self.is_configured() { "<set>" } else { "<unset>" })
            .field("api_host", &self.api_host)
            .field("api_url", &self.api_url)
            .field("key_header", &self.key_header)
            .field("host_header", &self.host_header)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded by the binary at startup via dotenvy.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub policy: ScoringPolicy,
    /// Picks built-in lexicon, spoiler tables, and reason language.
    pub locale: Locale,
    /// Extra lexicon terms, one per line.
    pub lexicon_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any name-to-value lookup.
    ///
    /// Unset and empty values fall back to defaults. A malformed threshold,
    /// category list, timeout or locale is an error; a missing API key is not.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let threshold = match get("MODERATION_THRESHOLD") {
            Some(raw) => raw
                .parse::<f64>()
                .with_context(|| format!("MODERATION_THRESHOLD is not a number: '{raw}'"))?,
            None => ScoringPolicy::DEFAULT_THRESHOLD,
        };

        let categories = match get("MODERATION_CATEGORIES") {
            Some(raw) => raw
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(|part| part.parse::<Category>())
                .collect::<Result<Vec<_>>>()
                .context("Invalid MODERATION_CATEGORIES")?,
            None => Category::ALL.to_vec(),
        };

        let policy = ScoringPolicy::new(threshold, categories)?;

        let timeout = match get("MODERATION_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .with_context(|| format!("MODERATION_TIMEOUT_SECS is not a whole number: '{raw}'"))?;
                if secs == 0 {
                    anyhow::bail!("MODERATION_TIMEOUT_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let locale = match get("MODERATION_LOCALE") {
            Some(raw) => raw.parse::<Locale>().context("Invalid MODERATION_LOCALE")?,
            None => Locale::default(),
        };

        Ok(Self {
            remote: RemoteConfig {
                api_key: get("MODERATION_API_KEY").unwrap_or_default(),
                api_host: get("MODERATION_API_HOST").unwrap_or_default(),
                api_url: get("MODERATION_API_URL").unwrap_or_default(),
                key_header: get("MODERATION_API_KEY_HEADER")
                    .unwrap_or_else(|| DEFAULT_KEY_HEADER.to_string()),
                host_header: get("MODERATION_API_HOST_HEADER")
                    .unwrap_or_else(|| DEFAULT_HOST_HEADER.to_string()),
                timeout,
            },
            policy,
            locale,
            lexicon_path: get("MODERATION_LEXICON_PATH").map(PathBuf::from),
        })
    }
}

// Spoiler scanner: flags narrative spoilers with keywords and structural
// patterns ("chapter N ... dies", "turns out X was ...").
//
// Two independent checks, OR-ed together: a case-insensitive keyword
// substring test, and regex patterns evaluated against the original text.

pub mod patterns;

use anyhow::{Context, Result};
use regex_lite::Regex;

use crate::locale::Locale;

/// Immutable keyword list plus compiled spoiler patterns.
#[derive(Debug, Clone, Default)]
pub struct SpoilerScanner {
    keywords: Vec<String>,
    patterns: Vec<Regex>,
}

impl SpoilerScanner {
    /// Build a scanner from keywords and regex sources.
    ///
    /// Fails if any pattern does not compile.
    pub fn new<K, P>(keywords: K, patterns: P) -> Result<Self>
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let source = p.as_ref();
                Regex::new(source).with_context(|| format!("Invalid spoiler pattern: {source}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { keywords, patterns })
    }

    /// The built-in scanner for a locale.
    pub fn builtin(locale: Locale) -> Self {
        Self::new(patterns::keywords(locale), patterns::patterns(locale))
            .expect("built-in spoiler patterns compile")
    }

    /// True if the text self-labels as a spoiler or matches a spoiler shape.
    pub fn has_spoiler(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        if self.keywords.iter().any(|k| lowered.contains(k.as_str())) {
            return true;
        }
        self.patterns.iter().any(|re| re.is_match(text))
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

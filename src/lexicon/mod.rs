// Lexicon matcher: fast local screening against a list of disallowed terms.
//
// Each term is normalized once when the lexicon is built. A term matches if
// either a word-boundary regex or a plain substring test finds it in the
// normalized text. The substring test is broader on purpose: it catches
// terms whose edges defeat `\b`, at the cost of matching inside longer words.

pub mod normalize;
pub mod terms;

use std::path::Path;

use anyhow::{Context, Result};
use regex_lite::Regex;
use tracing::debug;

use crate::locale::Locale;
use normalize::normalize;

/// One disallowed term, prepared for matching.
#[derive(Debug, Clone)]
struct Entry {
    /// The term as listed, reported back on a match.
    term: String,
    normalized: String,
    boundary: Option<Regex>,
}

impl Entry {
    fn new(term: &str) -> Option<Self> {
        let normalized = normalize(term);
        if normalized.is_empty() {
            return None;
        }
        let boundary = Regex::new(&format!(r"\b{}\b", regex_lite::escape(&normalized))).ok();
        Some(Self {
            term: term.trim().to_string(),
            normalized,
            boundary,
        })
    }

    fn matches(&self, normalized_text: &str) -> bool {
        let by_boundary = self
            .boundary
            .as_ref()
            .is_some_and(|re| re.is_match(normalized_text));
        by_boundary || normalized_text.contains(&self.normalized)
    }
}

/// An ordered, immutable list of disallowed terms.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<Entry>,
}

impl Lexicon {
    /// Build a lexicon from terms in priority order.
    ///
    /// Terms that normalize to nothing (e.g. only punctuation) are skipped.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: terms
                .into_iter()
                .filter_map(|t| Entry::new(t.as_ref()))
                .collect(),
        }
    }

    /// The built-in lexicon for a locale.
    pub fn builtin(locale: Locale) -> Self {
        Self::new(terms::builtin(locale).iter().copied())
    }

    /// Append terms after the existing ones. Existing terms keep priority.
    pub fn with_extra_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entries
            .extend(terms.into_iter().filter_map(|t| Entry::new(t.as_ref())));
        self
    }

    /// Append terms read from a file, one per line.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn load_extra(self, path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file {}", path.display()))?;
        let extra: Vec<&str> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();
        debug!(path = %path.display(), terms = extra.len(), "Loaded extra lexicon terms");
        Ok(self.with_extra_terms(extra))
    }

    /// Return the first listed term found in `text`, if any.
    pub fn find(&self, text: &str) -> Option<&str> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.matches(&normalized))
            .map(|entry| entry.term.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_variants_all_match() {
        let lexicon = Lexicon::new(["badword"]);
        for text in ["Badword!!", "BADWORD", "  badword  "] {
            assert_eq!(lexicon.find(text), Some("badword"), "input {text:?}");
        }
    }

    #[test]
    fn reports_first_listed_term() {
        let lexicon = Lexicon::new(["second", "first"]);
        assert_eq!(lexicon.find("first and second"), Some("second"));
    }

    #[test]
    fn substring_match_is_kept() {
        // Broader than the word-boundary check; intentionally accepted.
        let lexicon = Lexicon::new(["moron"]);
        assert_eq!(lexicon.find("sophomoronic"), Some("moron"));
    }

    #[test]
    fn punctuation_inside_term_is_normalized_away() {
        let lexicon = Lexicon::new(["f.u.b.a.r"]);
        assert_eq!(lexicon.find("totally FUBAR"), Some("f.u.b.a.r"));
    }

    #[test]
    fn empty_terms_are_skipped() {
        let lexicon = Lexicon::new(["", "!!!", "ok"]);
        assert_eq!(lexicon.len(), 1);
    }

    #[test]
    fn clean_text_has_no_match() {
        let lexicon = Lexicon::builtin(Locale::En);
        assert_eq!(lexicon.find("this is a totally normal sentence"), None);
    }

    #[test]
    fn accents_are_ignored_on_both_sides() {
        let lexicon = Lexicon::builtin(Locale::Es);
        assert_eq!(lexicon.find("eres un IMBECIL"), Some("imbécil"));
    }

    #[test]
    fn extra_terms_come_after_builtin() {
        let lexicon = Lexicon::new(["alpha"]).with_extra_terms(["beta"]);
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.find("beta alpha"), Some("alpha"));
    }
}

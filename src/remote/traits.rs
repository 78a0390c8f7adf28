// Remote classifier trait and the category scores it produces.
//
// The orchestrator only talks to `RemoteClassifier`. The HTTP client is one
// implementation; tests substitute scripted ones.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;

/// Categories the remote classifier scores. Declaration order is the order
/// flagged categories appear in a reason string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Toxic,
    Sexual,
    Violent,
    Insulting,
    Discriminatory,
    SelfHarm,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Toxic,
        Category::Sexual,
        Category::Violent,
        Category::Insulting,
        Category::Discriminatory,
        Category::SelfHarm,
    ];

    /// Canonical snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Toxic => "toxic",
            Category::Sexual => "sexual",
            Category::Violent => "violent",
            Category::Insulting => "insulting",
            Category::Discriminatory => "discriminatory",
            Category::SelfHarm => "self_harm",
        }
    }

    /// Map a response key to a category. Accepts `self-harm` as an alias.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "toxic" => Some(Category::Toxic),
            "sexual" => Some(Category::Sexual),
            "violent" => Some(Category::Violent),
            "insulting" => Some(Category::Insulting),
            "discriminatory" => Some(Category::Discriminatory),
            "self_harm" | "self-harm" => Some(Category::SelfHarm),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Category::from_key(&key).ok_or_else(|| anyhow::anyhow!("Unknown category '{}'", s.trim()))
    }
}

/// Confidence for a single category, 0.0 (absent) to 1.0 (certain).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
}

/// A remote text classifier. One request, one response; no retries.
#[async_trait]
pub trait RemoteClassifier: Send + Sync {
    /// Score `text` across the categories the provider returns.
    async fn classify_remote(&self, text: &str) -> Result<Vec<CategoryScore>, ClassifierError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_harm_accepts_both_spellings() {
        assert_eq!(Category::from_key("self-harm"), Some(Category::SelfHarm));
        assert_eq!(Category::from_key("self_harm"), Some(Category::SelfHarm));
        assert_eq!(Category::from_key("available"), None);
    }

    #[test]
    fn parses_config_names() {
        assert_eq!(" Toxic ".parse::<Category>().unwrap(), Category::Toxic);
        assert!("spam".parse::<Category>().is_err());
    }

    #[test]
    fn declaration_order_matches_all() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
    }
}

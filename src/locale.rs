// Locale selection and the user-facing phrases for each verdict reason.
//
// Reasons are surfaced to moderators and, localized, to the person who
// submitted the text. The locale also picks which built-in lexicon and
// spoiler tables are loaded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::remote::traits::Category;

/// Language used for built-in tables and reason strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Reason attached when the lexicon matched.
    pub fn toxic_reason(&self) -> &'static str {
        match self {
            Locale::En => "toxic content detected",
            Locale::Es => "contenido tóxico detectado",
        }
    }

    /// Reason attached when the spoiler scanner matched.
    pub fn spoiler_reason(&self) -> &'static str {
        match self {
            Locale::En => "spoiler content detected",
            Locale::Es => "contenido con spoilers detectado",
        }
    }

    /// Human-readable phrase for a remote category.
    pub fn category_phrase(&self, category: Category) -> &'static str {
        match (self, category) {
            (Locale::En, Category::Toxic) => "toxic",
            (Locale::En, Category::Sexual) => "sexual",
            (Locale::En, Category::Violent) => "violent",
            (Locale::En, Category::Insulting) => "insulting",
            (Locale::En, Category::Discriminatory) => "discriminatory",
            (Locale::En, Category::SelfHarm) => "self-harm",
            (Locale::Es, Category::Toxic) => "tóxico",
            (Locale::Es, Category::Sexual) => "sexual",
            (Locale::Es, Category::Violent) => "violento",
            (Locale::Es, Category::Insulting) => "insultante",
            (Locale::Es, Category::Discriminatory) => "discriminatorio",
            (Locale::Es, Category::SelfHarm) => "autolesión",
        }
    }

    /// Join the phrases for every flagged category into one reason string.
    ///
    /// Callers pass categories in declaration order; this keeps the order.
    pub fn flagged_reason(&self, categories: &[Category]) -> String {
        let prefix = match self {
            Locale::En => "flagged content",
            Locale::Es => "contenido marcado",
        };
        let phrases: Vec<&str> = categories
            .iter()
            .map(|c| self.category_phrase(*c))
            .collect();
        format!("{prefix}: {}", phrases.join(", "))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            other => anyhow::bail!("Unsupported locale '{other}' (expected 'en' or 'es')"),
        }
    }
}

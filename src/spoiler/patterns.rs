// Built-in spoiler keywords and structural patterns, per locale.
//
// Keywords are plain lowercase substrings for self-labeled spoilers.
// Patterns run against the original text and carry their own `(?i)` flag.
// Patterns that bridge a gap with `.{0,N}` also set `s` so the gap can span
// a line break.
// Case folding in regex-lite is ASCII only, so accented letters list both
// cases explicitly. `\w` is ASCII only as well; names use `\S+`.

use crate::locale::Locale;

const ENGLISH_KEYWORDS: &[&str] = &["spoiler"];

const SPANISH_KEYWORDS: &[&str] = &["spoiler", "destripe"];

const ENGLISH_PATTERNS: &[&str] = &[
    // chapter 12 ... dies
    r"(?is)\bchapter\s+\d+\b.{0,80}\b(dies|died|die|is killed|gets killed|was killed|murdered|survives|betrays|marries)\b",
    // at the end ... dies / turns out
    r"(?is)\b(at|in)\s+the\s+end\b.{0,60}\b(dies|died|is killed|gets killed|turns out|reveals?|was the)\b",
    r"(?i)\S+\s+(dies|is killed|gets killed)\s+(at|in)\s+the\s+end\b",
    r"(?i)\bturns\s+out\s+(that\s+)?(\S+\s+){1,3}(is|was)\b",
    r"(?i)\bactually\s+it\s+(was|is)\s+\S+",
    r"(?i)\bthe\s+(killer|murderer|villain|traitor|culprit)\s+(is|was)\b",
    r"(?i)\b(final\s+twist|plot\s+twist|twist\s+ending)\s+(is|was)\b",
    r"(?i)\bthe\s+ending\s+reveals?\b",
];

const SPANISH_PATTERNS: &[&str] = &[
    // capítulo 12 ... muere
    r"(?is)\bcap[iíÍ]tulo\s+\d+\b.{0,80}\b(muere\b|mueren\b|muri[óÓo]|matan\b|mata\b|asesinan\b|sobrevive\b|traiciona\b|se\s+casa\b)",
    r"(?is)\bal\s+final\b.{0,60}\b(muere\b|muri[óÓo]|resulta\s+que\b|era\s+(el|la)\b)",
    r"(?i)\S+\s+muere\s+al\s+final\b",
    r"(?i)\ben\s+realidad\s+(era|es)\s+\S+",
    r"(?i)\bresulta\s+que\s+(\S+\s+){1,3}(es|era)\b",
    r"(?i)\b(el|la)\s+(asesino|asesina|culpable|traidor|traidora|villano|villana)\s+(es|era)\b",
    r"(?i)\b(giro\s+final|final\s+sorpresa)\s+(es|era)\b",
];

pub fn keywords(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::En => ENGLISH_KEYWORDS,
        Locale::Es => SPANISH_KEYWORDS,
    }
}

pub fn patterns(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::En => ENGLISH_PATTERNS,
        Locale::Es => SPANISH_PATTERNS,
    }
}

// Built-in disallowed terms, one table per locale.
//
// Order matters: when several terms match, the first one listed is reported.
// Terms are normalized at load time, so accents and capitalization here are
// cosmetic.

use crate::locale::Locale;

const ENGLISH: &[&str] = &[
    "kill yourself",
    "piece of shit",
    "motherfucker",
    "fuck you",
    "fuck off",
    "shithead",
    "dumbass",
    "asshole",
    "bastard",
    "bitch",
    "retard",
    "imbecile",
    "moron",
    "idiot",
];

const SPANISH: &[&str] = &[
    "mátate",
    "muérete",
    "hijo de puta",
    "hijueputa",
    "malparido",
    "gilipollas",
    "subnormal",
    "pendejo",
    "cabrón",
    "mierda",
    "estúpido",
    "estúpida",
    "imbécil",
    "idiota",
];

/// Built-in term list for a locale.
pub fn builtin(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::En => ENGLISH,
        Locale::Es => SPANISH,
    }
}

//! Accent-insensitive normalization and significant-word extraction

use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Articles, prepositions and conjunctions across the language families the
/// catalog covers. Tokens of length <= 1 are dropped separately.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // English
        "the", "of", "in", "on", "at", "to", "and", "or", "for", "by", "an",
        // French
        "le", "la", "les", "des", "de", "du", "un", "une", "et", "au", "aux", "en", "sur",
        // Spanish
        "el", "los", "las", "uno", "una", "unos", "unas", "del", "con", "para", "por",
        // German
        "der", "die", "das", "den", "dem", "ein", "eine", "einen", "und", "im", "am", "von", "mit",
        "fur", "zum", "zur",
        // Italian
        "il", "lo", "gli", "uno", "di", "da", "su", "per", "della", "dello", "dei", "delle",
    ]
    .into_iter()
    .collect()
});

/// Normalize text for accent-insensitive comparison.
///
/// NFD decomposition with combining marks stripped, lowercased with Unicode
/// case folding, apostrophe variants collapsed to `'`. Letters that carry
/// their accent in the base codepoint and so have no NFD decomposition
/// (ø, æ, ß, ł, ...) are folded explicitly. Pure and idempotent.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for decomposed in text.nfd().filter(|c| !is_combining_mark(*c)) {
        for c in decomposed.to_lowercase() {
            match c {
                'ø' => out.push('o'),
                'æ' => out.push_str("ae"),
                'œ' => out.push_str("oe"),
                'ß' => out.push_str("ss"),
                'ł' => out.push('l'),
                'đ' | 'ð' => out.push('d'),
                'þ' => out.push_str("th"),
                '\u{2018}' | '\u{2019}' | '\u{02BC}' | '`' | '\u{00B4}' => out.push('\''),
                _ => out.push(c),
            }
        }
    }
    out
}

/// Significant words of a text: normalized tokens with punctuation stripped,
/// single characters dropped, and stop-words removed.
pub fn significant_words(text: &str) -> Vec<String> {
    normalize(text)
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '\'' { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|w| w.chars().count() > 1 && !STOP_WORDS.contains(w))
        .map(|w| w.to_string())
        .collect()
}

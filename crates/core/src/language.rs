//! Output language definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared output language of a query.
///
/// The assistant currently serves English and Chinese users; the enum is
/// non-exhaustive in spirit but kept closed so prompt templates stay in
/// sync with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Zh,
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Zh => write!(f, "zh"),
        }
    }
}

impl Language {
    /// English name of the language, for prompt construction.
    pub fn english_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "Chinese",
        }
    }
}

//! Query input type

use crate::Language;
use serde::{Deserialize, Serialize};

/// An immutable, request-scoped user query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    /// Raw query text as the user typed it
    pub text: String,
    /// Declared output language
    pub language: Language,
    /// Optional context from an earlier turn, e.g. a previous vague
    /// description the user is following up on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_hint: Option<String>,
}

impl Query {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
            context_hint: None,
        }
    }

    pub fn with_context(mut self, hint: impl Into<String>) -> Self {
        self.context_hint = Some(hint.into());
        self
    }
}

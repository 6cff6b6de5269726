//! Consultation answer parsing
//!
//! The consultation prompt asks for a JSON object carrying the answer text,
//! the places it mentions and the cities it spans. Models drift from that
//! shape often enough that parsing is best-effort: callers fall back to
//! treating the raw output as plain text.

use serde::Deserialize;
use waypoint_llm::extract_json_object;
use waypoint_resolver::PlaceMention;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConsultationAnswer {
    #[serde(default)]
    pub text_content: String,
    #[serde(default)]
    pub mentioned_places: Vec<MentionedPlace>,
    #[serde(default)]
    pub cities: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MentionedPlace {
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
}

impl ConsultationAnswer {
    pub(crate) fn mentions(&self) -> Vec<PlaceMention> {
        self.mentioned_places
            .iter()
            .filter(|m| !m.name.trim().is_empty())
            .map(|m| {
                PlaceMention::new(
                    m.name.trim(),
                    m.city
                        .as_deref()
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(String::from),
                )
            })
            .collect()
    }
}

/// Parse model output into a consultation answer; `None` when the output is
/// not the requested JSON shape or carries no answer text.
pub(crate) fn parse_answer(text: &str) -> Option<ConsultationAnswer> {
    let json = extract_json_object(text)?;
    let answer: ConsultationAnswer = serde_json::from_str(json).ok()?;
    (!answer.text_content.trim().is_empty()).then_some(answer)
}

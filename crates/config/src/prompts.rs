//! Prompt templates for the generative backend
//!
//! Loaded once at startup and immutable afterwards. Each builder returns the
//! full prompt text; the llm crate owns transport and the callers own
//! parsing of the expected response shape.

use waypoint_core::{Language, Query};

/// Classification prompt: the model must answer with a single JSON object.
pub fn classification(query: &Query) -> String {
    let context = query
        .context_hint
        .as_deref()
        .map(|hint| format!("\nEarlier context from the user: {hint}"))
        .unwrap_or_default();
    format!(
        r#"You are the intent classifier of a travel assistant.{context}
Classify the user query into exactly one intent:
- "general_search": the user wants venues matching a category and/or city
- "specific_place": the user asks about one named place
- "travel_consultation": the user wants travel advice (tickets, timing, transport, packing, safety, itineraries, comparisons)
- "non_travel": unrelated to travel

Reply with ONLY a JSON object, no prose:
{{"intent": "...", "placeName": "...", "city": "...", "category": "...", "count": 3, "confidence": 0.9}}
Omit fields that do not apply. "confidence" is required, between 0 and 1.

User query ({lang}): {text}"#,
        lang = query.language,
        text = query.text
    )
}

/// Consultation prompt: structured advice answer with mentioned places.
pub fn consultation(query: &Query) -> String {
    format!(
        r#"You are a travel consultant. Answer the user's question in {lang}.
Mention concrete, real places where it strengthens the advice.

Reply with ONLY a JSON object:
{{"textContent": "the full answer",
  "mentionedPlaces": [{{"name": "place name", "city": "city name"}}],
  "cities": ["city name"]}}
Keep mentionedPlaces to places you actually named in textContent.

User question: {text}"#,
        lang = query.language.english_name(),
        text = query.text
    )
}

/// Short description of a known place, hard-capped in length.
pub fn description(place_name: &str, language: Language, word_cap: usize) -> String {
    format!(
        "In {lang}, describe \"{place_name}\" for a traveler in at most \
         {word_cap} words. Plain text only, no markdown.",
        lang = language.english_name(),
    )
}

/// Recover a concrete place name from a vague description.
pub fn name_recovery(query: &Query) -> String {
    let context = query
        .context_hint
        .as_deref()
        .map(|hint| format!("\nEarlier context: {hint}"))
        .unwrap_or_default();
    format!(
        "A traveler is trying to recall a place but does not remember its \
         name.{context}\nTheir description: {text}\nReply with ONLY the most \
         likely official place name, nothing else.",
        text = query.text
    )
}

/// Plain conversational answer for non-travel queries.
pub fn plain_answer(query: &Query) -> String {
    format!(
        "Answer the user briefly and helpfully in {lang}. Plain text only.\n\
         User: {text}",
        lang = query.language.english_name(),
        text = query.text
    )
}

/// Fixed fallback when the generative backend times out or fails.
pub fn apology(language: Language) -> &'static str {
    match language {
        Language::En => "Sorry, I couldn't put together an answer just now. Please try again in a moment.",
        Language::Zh => "抱歉，我暂时无法回答这个问题，请稍后再试。",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_prompt_carries_query_and_labels() {
        let q = Query::new("how to buy tickets for the Louvre", Language::En);
        let p = classification(&q);
        assert!(p.contains("the Louvre"));
        assert!(p.contains("general_search"));
        assert!(p.contains("non_travel"));
    }

    #[test]
    fn context_hint_is_included_when_present() {
        let q = Query::new("the one with the glass pyramid", Language::En)
            .with_context("user was asking about Paris museums");
        assert!(name_recovery(&q).contains("Paris museums"));
    }

    #[test]
    fn apology_is_language_appropriate() {
        assert!(apology(Language::En).starts_with("Sorry"));
        assert!(apology(Language::Zh).contains("抱歉"));
    }
}

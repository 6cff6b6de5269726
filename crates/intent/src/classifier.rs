//! Generative intent classification with rule-based fallback
//!
//! The classifier never errors: timeouts, malformed output and invalid
//! intent labels all degrade to the deterministic rule cascade with a
//! logged reason.

use std::sync::Arc;
use std::time::Duration;

use waypoint_config::prompts;
use waypoint_core::{IntentVerdict, Query};
use waypoint_llm::{extract_json_object, TextGenerator};

use crate::RuleClassifier;

pub struct GenerativeClassifier {
    generator: Arc<dyn TextGenerator>,
    rules: RuleClassifier,
    timeout: Duration,
}

impl GenerativeClassifier {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        rules: RuleClassifier,
        timeout: Duration,
    ) -> Self {
        Self {
            generator,
            rules,
            timeout,
        }
    }

    /// Classify a query. All failure paths resolve to a valid verdict.
    pub async fn classify(&self, query: &Query) -> IntentVerdict {
        let prompt = prompts::classification(query);
        let generated = tokio::time::timeout(self.timeout, self.generator.generate(&prompt)).await;

        match generated {
            Err(_) => self.fallback(query, "classification timed out"),
            Ok(Err(e)) => self.fallback(query, &format!("generation failed: {e}")),
            Ok(Ok(text)) => match parse_verdict(&text) {
                Some(verdict) => {
                    tracing::debug!(
                        intent = %verdict.intent,
                        confidence = verdict.confidence,
                        "generative classification"
                    );
                    verdict
                }
                None => self.fallback(query, "unparseable classifier output"),
            },
        }
    }

    fn fallback(&self, query: &Query, reason: &str) -> IntentVerdict {
        tracing::warn!(reason, "falling back to rule-based intent detection");
        self.rules.classify(query)
    }
}

/// Parse a verdict from raw model output. Unknown intent labels fail
/// deserialization of the `Intent` enum, which is exactly the invalid-label
/// rejection the fallback contract requires.
fn parse_verdict(text: &str) -> Option<IntentVerdict> {
    let json = extract_json_object(text)?;
    let mut verdict: IntentVerdict = serde_json::from_str(json).ok()?;
    verdict.confidence = verdict.confidence.clamp(0.0, 1.0);
    if let Some(name) = &verdict.place_name {
        if name.trim().is_empty() {
            verdict.place_name = None;
        }
    }
    Some(verdict)
}

//! The per-query resolution flow

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use waypoint_config::{prompts, Settings};
use waypoint_core::{
    is_http_url, ImageSearcher, Intent, IntentVerdict, PlaceCatalog, Query, ResolutionResult,
    ResolvedPlace,
};
use waypoint_intent::{GenerativeClassifier, RuleClassifier};
use waypoint_llm::TextGenerator;
use waypoint_resolver::{Assembled, CityAssembler, EntityResolver};

use crate::consultation;

/// Markers of a query describing a place whose name the user cannot recall.
static VAGUE_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:don'?t|can'?t|cannot) (?:remember|recall)|forgot (?:the |its )?name|不记得|记不住|忘了名|想不起",
    )
    .expect("vague name pattern")
});

pub struct QueryResolver {
    generator: Arc<dyn TextGenerator>,
    catalog: Arc<dyn PlaceCatalog>,
    images: Option<Arc<dyn ImageSearcher>>,
    classifier: GenerativeClassifier,
    resolver: EntityResolver,
    assembler: CityAssembler,
    settings: Settings,
}

impl QueryResolver {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        catalog: Arc<dyn PlaceCatalog>,
        images: Option<Arc<dyn ImageSearcher>>,
        settings: Settings,
    ) -> Self {
        let classifier = GenerativeClassifier::new(
            Arc::clone(&generator),
            RuleClassifier::default(),
            settings.classification_timeout(),
        );
        let resolver = EntityResolver::new(Arc::clone(&catalog), settings.clone());
        let assembler = CityAssembler::new(Arc::clone(&catalog), settings.clone());
        Self {
            generator,
            catalog,
            images,
            classifier,
            resolver,
            assembler,
            settings,
        }
    }

    /// Classify and resolve one query. Infallible by contract: every failure
    /// mode maps to a degraded but valid result.
    pub async fn resolve(&self, query: &Query) -> ResolutionResult {
        let verdict = self.classifier.classify(query).await;
        tracing::info!(intent = %verdict.intent, confidence = verdict.confidence, "query classified");

        match verdict.intent {
            Intent::GeneralSearch => ResolutionResult::Search { verdict },
            Intent::SpecificPlace => self.specific_place(query, &verdict).await,
            Intent::TravelConsultation => self.travel_consultation(query).await,
            Intent::NonTravel => self.plain_answer(query).await,
        }
    }

    async fn specific_place(&self, query: &Query, verdict: &IntentVerdict) -> ResolutionResult {
        let name = self.place_name(query, verdict).await;

        let description_prompt =
            prompts::description(&name, query.language, self.settings.description_word_cap);
        let (place, described) = tokio::join!(
            self.resolver.resolve(&name, query.language, true),
            self.generate(&description_prompt, self.settings.generation_timeout()),
        );

        if let Some(place) = &place {
            self.spawn_image_backfill(place);
        }

        let text = described
            .map(|text| cap_words(&text, self.settings.description_word_cap))
            .or_else(|| place.as_ref().and_then(|p| p.summary.clone()))
            .unwrap_or_else(|| prompts::apology(query.language).to_string());

        ResolutionResult::Place { text, place }
    }

    /// The name to resolve: the classifier's extraction, or the raw query
    /// text when there is none. Only when the user says they cannot recall
    /// the name does a recovery call guess the official name from the
    /// description; a nameless verdict alone does not warrant the extra
    /// backend round trip.
    async fn place_name(&self, query: &Query, verdict: &IntentVerdict) -> String {
        if VAGUE_NAME_PATTERN.is_match(&query.text) {
            let prompt = prompts::name_recovery(query);
            if let Some(recovered) = self
                .generate(&prompt, self.settings.generation_timeout())
                .await
            {
                let recovered = recovered.lines().next().unwrap_or_default().trim();
                if !recovered.is_empty() {
                    tracing::debug!(name = recovered, "recovered place name");
                    return recovered.to_string();
                }
            }
        }
        verdict
            .place_name
            .clone()
            .unwrap_or_else(|| query.text.trim().to_string())
    }

    async fn travel_consultation(&self, query: &Query) -> ResolutionResult {
        let prompt = prompts::consultation(query);
        let Some(raw) = self.generate(&prompt, self.settings.generation_timeout()).await else {
            return ResolutionResult::Text {
                text: prompts::apology(query.language).to_string(),
            };
        };

        let Some(answer) = consultation::parse_answer(&raw) else {
            // The model answered in prose; the advice is still worth showing
            tracing::debug!("consultation output was not structured, returning as text");
            return ResolutionResult::Text { text: raw };
        };

        let assembled = self
            .assembler
            .assemble(&answer.mentions(), &answer.cities, query.language)
            .await;
        let text = answer.text_content;
        if assembled.is_empty() {
            return ResolutionResult::Text { text };
        }
        match assembled {
            Assembled::Flat(places) => ResolutionResult::Places { text, places },
            Assembled::Grouped(groups) => ResolutionResult::CityGroups { text, groups },
        }
    }

    async fn plain_answer(&self, query: &Query) -> ResolutionResult {
        let prompt = prompts::plain_answer(query);
        let text = self
            .generate(&prompt, self.settings.generation_timeout())
            .await
            .unwrap_or_else(|| prompts::apology(query.language).to_string());
        ResolutionResult::Text { text }
    }

    /// One bounded generation call; all failures collapse to `None`.
    async fn generate(&self, prompt: &str, deadline: Duration) -> Option<String> {
        match tokio::time::timeout(deadline, self.generator.generate(prompt)).await {
            Err(_) => {
                tracing::warn!("generation timed out");
                None
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "generation failed");
                None
            }
            Ok(Ok(text)) => {
                let text = text.trim().to_string();
                (!text.is_empty()).then_some(text)
            }
        }
    }

    /// Resolved place without usable imagery: look one up out of band and
    /// write it back. The query result never waits on this.
    fn spawn_image_backfill(&self, place: &ResolvedPlace) {
        let has_image = place
            .cover_image
            .as_deref()
            .map(is_http_url)
            .unwrap_or(false);
        if has_image {
            return;
        }
        let Some(images) = self.images.clone() else {
            return;
        };
        let catalog = Arc::clone(&self.catalog);
        let id = place.id.clone();
        let name = place.name.clone();
        let city = place.city.clone();
        tokio::spawn(async move {
            match images.find_image(&name, city.as_deref()).await {
                Ok(Some(url)) => {
                    if let Err(e) = catalog.update_image(&id, &url).await {
                        tracing::warn!(id = %id, error = %e, "image write-back failed");
                    } else {
                        tracing::debug!(id = %id, "image backfilled");
                    }
                }
                Ok(None) => tracing::debug!(id = %id, "no image found"),
                Err(e) => tracing::warn!(id = %id, error = %e, "image search failed"),
            }
        });
    }
}

/// Hard cap on whitespace-separated words; text without spaces (Chinese
/// prose) passes through untouched.
fn cap_words(text: &str, cap: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= cap {
        text.to_string()
    } else {
        words[..cap].join(" ")
    }
}

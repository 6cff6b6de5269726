//! Entity resolution against the place catalog
//!
//! A cascade of lookup strategies, cheapest and most precise first. The
//! cascade stops at the first strategy that yields candidates; all
//! candidates in that set are then scored and the winner picked by image
//! presence, then similarity. An exact post-normalization name match
//! short-circuits everything; exact matches are never second-guessed by
//! the scorer.

use std::sync::Arc;

use waypoint_config::Settings;
use waypoint_core::{CatalogEntity, FragmentSearch, Language, PlaceCatalog, ResolvedPlace};
use waypoint_text::{normalize, significant_words, similarity};

/// Per-call resolution options.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Demand the stricter similarity gate; used for single bare-name
    /// lookups where a wrong match is worse than no match.
    pub strict: bool,
    /// Restrict candidates to entities in one of these city spellings.
    pub city_variants: Option<Vec<String>>,
    /// Drop candidates without HTTP-addressable imagery.
    pub require_image: bool,
}

/// Transient ranking record; never leaves this module.
struct MatchCandidate {
    entity: CatalogEntity,
    score: f32,
    has_image: bool,
}

pub struct EntityResolver {
    catalog: Arc<dyn PlaceCatalog>,
    settings: Settings,
}

impl EntityResolver {
    pub fn new(catalog: Arc<dyn PlaceCatalog>, settings: Settings) -> Self {
        Self { catalog, settings }
    }

    /// Resolve a name with default (non-city-restricted) options.
    pub async fn resolve(
        &self,
        name: &str,
        language: Language,
        strict: bool,
    ) -> Option<ResolvedPlace> {
        self.resolve_with(
            name,
            language,
            &ResolveOptions {
                strict,
                ..Default::default()
            },
        )
        .await
    }

    /// Full-control resolution used by the assembler.
    pub async fn resolve_with(
        &self,
        name: &str,
        language: Language,
        options: &ResolveOptions,
    ) -> Option<ResolvedPlace> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let words = significant_words(name);

        match self.first_admissible(name, &words, options).await {
            Some((stage, candidates)) => {
                tracing::debug!(stage, name, count = candidates.len(), "candidate set found");
                self.select(name, candidates, language, options)
            }
            None => {
                tracing::debug!(name, "no candidates in any cascade stage");
                None
            }
        }
    }

    /// Run the strategy cascade: strictly ordered, early exit on the first
    /// stage whose candidates survive the city/imagery admission filter.
    async fn first_admissible(
        &self,
        name: &str,
        words: &[String],
        options: &ResolveOptions,
    ) -> Option<(&'static str, Vec<CatalogEntity>)> {
        // 1. Accent-insensitive multi-word containment
        if !words.is_empty() {
            if let Some(found) = self.stage(words, true, options, "accent_insensitive").await {
                return Some(("accent_insensitive", found));
            }
            // 2. Accent-preserving AND-containment (helps when the stored
            // name happens to carry the same accents as the query)
            if let Some(found) = self.stage(words, false, options, "accent_preserving").await {
                return Some(("accent_preserving", found));
            }
        }

        // 3. Case-insensitive exact match (covers single-word names)
        match self.catalog.find_exact(name).await {
            Ok(found) => {
                let found = self.admissible(found, options);
                if !found.is_empty() {
                    return Some(("exact", found));
                }
            }
            Err(e) => tracing::warn!(name, error = %e, "exact lookup failed"),
        }

        // 4. Progressive substring fallback
        for (label, fragments) in progressive_fragments(name, words) {
            if let Some(found) = self.stage(&fragments, true, options, label).await {
                return Some((label, found));
            }
        }

        None
    }

    /// One fragment-search stage; `None` when nothing admissible came back.
    async fn stage(
        &self,
        fragments: &[String],
        accent_insensitive: bool,
        options: &ResolveOptions,
        label: &'static str,
    ) -> Option<Vec<CatalogEntity>> {
        let search = FragmentSearch {
            accent_insensitive,
            limit: self.settings.candidate_limit,
        };
        let found = match self.catalog.find_by_name_fragment(fragments, &search).await {
            Ok(found) => found,
            Err(e) => {
                // Catalog failure is indistinguishable from "no match" for
                // everything downstream.
                tracing::warn!(stage = label, error = %e, "catalog lookup failed");
                Vec::new()
            }
        };
        let found = self.admissible(found, options);
        (!found.is_empty()).then_some(found)
    }

    /// City and imagery restrictions applied before a stage's set counts
    /// as non-empty.
    fn admissible(
        &self,
        candidates: Vec<CatalogEntity>,
        options: &ResolveOptions,
    ) -> Vec<CatalogEntity> {
        candidates
            .into_iter()
            .filter(|entity| {
                if let Some(variants) = &options.city_variants {
                    let Some(entity_city) = &entity.city else {
                        return false;
                    };
                    let entity_city = normalize(entity_city);
                    if !variants.iter().any(|v| normalize(v) == entity_city) {
                        return false;
                    }
                }
                !options.require_image || entity.has_usable_image()
            })
            .collect()
    }

    fn select(
        &self,
        name: &str,
        candidates: Vec<CatalogEntity>,
        language: Language,
        options: &ResolveOptions,
    ) -> Option<ResolvedPlace> {
        let needle = normalize(name);

        // Exact short-circuit: never second-guessed by the scorer.
        if let Some(exact) = candidates.iter().find(|c| normalize(&c.name) == needle) {
            tracing::debug!(name, id = %exact.id, "exact normalized match");
            return Some(exact.project(language));
        }

        let mut scored: Vec<MatchCandidate> = candidates
            .into_iter()
            .map(|entity| MatchCandidate {
                score: similarity(name, &entity.name),
                has_image: entity.has_usable_image(),
                entity,
            })
            .filter(|c| c.score >= self.settings.lenient_threshold)
            .collect();

        // Image presence first, similarity second.
        scored.sort_by(|a, b| {
            b.has_image
                .cmp(&a.has_image)
                .then(b.score.total_cmp(&a.score))
        });

        let winner = scored.into_iter().next()?;
        if options.strict && winner.score < self.settings.strict_threshold {
            tracing::debug!(
                name,
                id = %winner.entity.id,
                score = winner.score,
                "best candidate below strict threshold, rejecting"
            );
            return None;
        }
        tracing::debug!(name, id = %winner.entity.id, score = winner.score, "resolved");
        Some(winner.entity.project(language))
    }
}

/// Fragment sets for the progressive fallback: the full name, the
/// accent-stripped name, each adjacent pair of significant words, then the
/// single longest significant word.
fn progressive_fragments(name: &str, words: &[String]) -> Vec<(&'static str, Vec<String>)> {
    let mut out = vec![("full_name", vec![name.to_string()])];
    let stripped = normalize(name);
    if stripped != name {
        out.push(("stripped_name", vec![stripped]));
    }
    if words.len() >= 2 {
        for pair in words.windows(2) {
            out.push(("word_pair", pair.to_vec()));
        }
    }
    if let Some(longest) = words.iter().max_by_key(|w| w.chars().count()) {
        out.push(("longest_word", vec![longest.clone()]));
    }
    out
}

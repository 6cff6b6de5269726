//! City-grouped assembly of consultation mentions
//!
//! A consultation answer names places with whatever city spellings the
//! generative backend produced. The assembler canonicalizes those cities,
//! resolves each mention against the catalog restricted to its city, tops
//! up thin cities with well-rated catalog entries, and decides between a
//! flat list (one city) and per-city groups (several).

use std::sync::Arc;

use waypoint_config::{CityAliases, Settings};
use waypoint_core::{CityGroup, Language, PlaceCatalog, ResolvedPlace};

use crate::{EntityResolver, ResolveOptions};

/// One place mention extracted from a consultation answer.
#[derive(Debug, Clone)]
pub struct PlaceMention {
    pub name: String,
    pub city: Option<String>,
}

impl PlaceMention {
    pub fn new(name: impl Into<String>, city: Option<String>) -> Self {
        Self {
            name: name.into(),
            city,
        }
    }
}

/// Assembly output. Flat when the answer stayed within one city, grouped
/// when it spanned several.
#[derive(Debug, Clone)]
pub enum Assembled {
    Flat(Vec<ResolvedPlace>),
    Grouped(Vec<CityGroup>),
}

impl Assembled {
    pub fn is_empty(&self) -> bool {
        match self {
            Assembled::Flat(places) => places.is_empty(),
            Assembled::Grouped(groups) => groups.is_empty(),
        }
    }
}

struct CityBucket {
    canonical: String,
    places: Vec<ResolvedPlace>,
}

pub struct CityAssembler {
    catalog: Arc<dyn PlaceCatalog>,
    resolver: EntityResolver,
    aliases: CityAliases,
    settings: Settings,
}

impl CityAssembler {
    pub fn new(catalog: Arc<dyn PlaceCatalog>, settings: Settings) -> Self {
        let resolver = EntityResolver::new(Arc::clone(&catalog), settings.clone());
        Self {
            catalog,
            resolver,
            aliases: CityAliases::default(),
            settings,
        }
    }

    /// Resolve and group the mentions of one consultation answer.
    /// `answer_cities` is the answer's own city list; cities it names that
    /// no mention falls in still get a supplemented group.
    pub async fn assemble(
        &self,
        mentions: &[PlaceMention],
        answer_cities: &[String],
        language: Language,
    ) -> Assembled {
        let mut buckets: Vec<CityBucket> = Vec::new();
        for city in mentions
            .iter()
            .filter_map(|m| m.city.as_deref())
            .chain(answer_cities.iter().map(String::as_str))
        {
            let canonical = self.aliases.canonical(city);
            if canonical.is_empty() {
                continue;
            }
            if !buckets.iter().any(|b| b.canonical == canonical) {
                buckets.push(CityBucket {
                    canonical,
                    places: Vec::new(),
                });
            }
        }

        // A city-less mention belongs to the sole mentioned city when there
        // is exactly one; with several it resolves unrestricted and lands in
        // the group of whatever city the catalog says it is in.
        let sole_city = (buckets.len() == 1).then(|| buckets[0].canonical.clone());

        for mention in mentions {
            let city = mention
                .city
                .as_deref()
                .map(|c| self.aliases.canonical(c))
                .or_else(|| sole_city.clone());
            let options = ResolveOptions {
                strict: false,
                city_variants: city.as_deref().map(|c| self.aliases.variants(c)),
                require_image: true,
            };
            let Some(place) = self
                .resolver
                .resolve_with(&mention.name, language, &options)
                .await
            else {
                tracing::debug!(name = %mention.name, "mention did not resolve, skipping");
                continue;
            };
            let group_city = city
                .or_else(|| place.city.as_deref().map(|c| self.aliases.canonical(c)))
                .unwrap_or_default();
            if group_city.is_empty() {
                continue;
            }
            match buckets.iter_mut().find(|b| b.canonical == group_city) {
                Some(bucket) => {
                    if !bucket.places.iter().any(|p| p.id == place.id) {
                        bucket.places.push(place);
                    }
                }
                None => buckets.push(CityBucket {
                    canonical: group_city,
                    places: vec![place],
                }),
            }
        }

        // The flat-vs-grouped decision follows how many distinct cities the
        // answer mentioned, not how many survive the imagery filter: a
        // two-city answer keeps its per-city grouping even when one city
        // ends up empty and is dropped.
        let mentioned_cities = buckets.len();

        for bucket in &mut buckets {
            self.supplement(bucket, language).await;
        }
        buckets.retain(|b| !b.places.is_empty());

        if mentioned_cities <= 1 {
            Assembled::Flat(buckets.pop().map(|b| b.places).unwrap_or_default())
        } else {
            Assembled::Grouped(
                buckets
                    .into_iter()
                    .map(|b| CityGroup {
                        city: b.canonical,
                        places: b.places,
                    })
                    .collect(),
            )
        }
    }

    /// Top up a thin city with its best-rated image-bearing catalog entries.
    async fn supplement(&self, bucket: &mut CityBucket, language: Language) {
        let needed = self
            .settings
            .min_city_places
            .saturating_sub(bucket.places.len());
        if needed == 0 {
            return;
        }
        let variants = self.aliases.variants(&bucket.canonical);
        let exclude: Vec<String> = bucket.places.iter().map(|p| p.id.clone()).collect();
        let found = match self
            .catalog
            .find_by_city(&variants, &exclude, self.settings.candidate_limit)
            .await
        {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(city = %bucket.canonical, error = %e, "city supplement lookup failed");
                return;
            }
        };
        bucket.places.extend(
            found
                .iter()
                .filter(|e| e.has_usable_image())
                .take(needed)
                .map(|e| e.project(language)),
        );
    }
}

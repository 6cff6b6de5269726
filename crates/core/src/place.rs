//! Catalog entity and resolved place views
//!
//! `CatalogEntity` mirrors the read-only record owned by the external place
//! catalog. This crate only re-projects it into the `ResolvedPlace` view
//! that is safe to hand to callers; the flattening of the two historical
//! tag representations into one deduplicated display list lives here.

use crate::Language;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A display tag, in either of the two shapes the catalog has accumulated:
/// legacy plain strings and the newer bilingual objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tag {
    Bilingual {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        en: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        zh: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    Legacy(String),
}

impl Tag {
    /// Display string for the requested language, falling back
    /// `lang -> en -> id`.
    pub fn display(&self, language: Language) -> Option<String> {
        match self {
            Tag::Legacy(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Tag::Bilingual { en, zh, id } => {
                let preferred = match language {
                    Language::En => en.as_deref(),
                    Language::Zh => zh.as_deref(),
                };
                preferred
                    .or(en.as_deref())
                    .or(id.as_deref())
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            }
        }
    }
}

/// The catalog's mixed tag payload: a structured key -> values map plus a
/// list of tag objects. Both shapes coexist in production data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagPayload {
    /// Structured map, e.g. "cuisine" -> ["italian", "pizza"]
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<String>>,
    /// Flat list of legacy/bilingual tag objects
    #[serde(default)]
    pub labels: Vec<Tag>,
}

impl TagPayload {
    /// Union of both representations as deduplicated display strings,
    /// preserving first-seen order.
    pub fn display_tags(&self, language: Language) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut push = |tag: String| {
            if seen.insert(tag.to_lowercase()) {
                out.push(tag);
            }
        };
        for values in self.groups.values() {
            for value in values {
                let value = value.trim();
                if !value.is_empty() {
                    push(value.to_string());
                }
            }
        }
        for label in &self.labels {
            if let Some(display) = label.display(language) {
                push(display);
            }
        }
        out
    }
}

/// A place record as stored by the external catalog service (read-only here).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntity {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u32>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub tags: TagPayload,
}

impl CatalogEntity {
    /// The cover image if set, else the first gallery image.
    pub fn primary_image(&self) -> Option<&str> {
        self.cover_image
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.images.first().map(|s| s.as_str()))
    }

    /// Whether the entity carries HTTP-addressable imagery. Consultation
    /// results must never surface entities failing this check.
    pub fn has_usable_image(&self) -> bool {
        self.primary_image().map(is_http_url).unwrap_or(false)
    }

    /// Project into the caller-facing view for the requested language.
    pub fn project(&self, language: Language) -> ResolvedPlace {
        ResolvedPlace {
            id: self.id.clone(),
            name: self.name.clone(),
            summary: self.summary.clone(),
            cover_image: self.primary_image().map(|s| s.to_string()),
            images: self.images.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            city: self.city.clone(),
            country: self.country.clone(),
            rating: self.rating,
            tags: self.tags.display_tags(language),
            verified: self.verified,
            phone: self.phone.clone(),
            website: self.website.clone(),
        }
    }
}

/// Recognized-scheme check for image URLs.
pub fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http://") || url.starts_with("https://")
}

/// The caller-facing projection of a catalog entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPlace {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

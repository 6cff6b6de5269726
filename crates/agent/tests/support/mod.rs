//! Scripted fakes for end-to-end resolution tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use waypoint_core::{
    CatalogEntity, Error, FragmentSearch, ImageSearcher, PlaceCatalog, Result, TagPayload,
};
use waypoint_llm::{LlmError, TextGenerator};

pub fn entity(id: &str, name: &str, city: &str) -> CatalogEntity {
    CatalogEntity {
        id: id.into(),
        name: name.into(),
        city: Some(city.into()),
        country: None,
        latitude: None,
        longitude: None,
        cover_image: Some(format!("https://img.example.com/{id}.jpg")),
        images: vec![],
        summary: Some(format!("About {name}")),
        category: None,
        rating: Some(4.0),
        rating_count: Some(100),
        verified: true,
        phone: None,
        website: None,
        tags: TagPayload::default(),
    }
}

pub fn entity_no_image(id: &str, name: &str, city: &str) -> CatalogEntity {
    let mut e = entity(id, name, city);
    e.cover_image = None;
    e
}

/// Generator scripted per prompt family; unscripted families error, which
/// exercises the fallback paths. Every prompt received is recorded.
#[derive(Default)]
pub struct ScriptedGenerator {
    pub classification: Option<String>,
    pub consultation: Option<String>,
    pub description: Option<String>,
    pub recovery: Option<String>,
    pub plain: Option<String>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    fn route(&self, prompt: &str) -> Option<String> {
        if prompt.contains("intent classifier") {
            self.classification.clone()
        } else if prompt.contains("travel consultant") {
            self.consultation.clone()
        } else if prompt.contains("trying to recall") {
            self.recovery.clone()
        } else if prompt.contains("describe") {
            self.description.clone()
        } else {
            self.plain.clone()
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, LlmError> {
        self.calls.lock().push(prompt.to_string());
        self.route(prompt)
            .ok_or_else(|| LlmError::Api("unscripted prompt".into()))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Generator whose every call fails; classification then degrades to the
/// rule cascade and generation to the apology texts.
pub struct DownGenerator;

#[async_trait]
impl TextGenerator for DownGenerator {
    async fn generate(&self, _prompt: &str) -> std::result::Result<String, LlmError> {
        Err(LlmError::Network("connection refused".into()))
    }

    fn model_name(&self) -> &str {
        "down"
    }
}

/// In-memory catalog over ASCII test data; name matching is lowercase
/// containment.
pub struct MockCatalog {
    entities: Vec<CatalogEntity>,
    pub image_updates: Mutex<Vec<(String, String)>>,
}

impl MockCatalog {
    pub fn new(entities: Vec<CatalogEntity>) -> Self {
        Self {
            entities,
            image_updates: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PlaceCatalog for MockCatalog {
    async fn find_by_name_fragment(
        &self,
        fragments: &[String],
        options: &FragmentSearch,
    ) -> Result<Vec<CatalogEntity>> {
        Ok(self
            .entities
            .iter()
            .filter(|e| {
                let name = e.name.to_lowercase();
                fragments.iter().all(|f| name.contains(&f.to_lowercase()))
            })
            .take(options.limit)
            .cloned()
            .collect())
    }

    async fn find_exact(&self, name: &str) -> Result<Vec<CatalogEntity>> {
        let needle = name.to_lowercase();
        Ok(self
            .entities
            .iter()
            .filter(|e| e.name.to_lowercase() == needle)
            .cloned()
            .collect())
    }

    async fn find_by_city(
        &self,
        city_variants: &[String],
        exclude_ids: &[String],
        limit: usize,
    ) -> Result<Vec<CatalogEntity>> {
        let variants: Vec<String> = city_variants.iter().map(|v| v.to_lowercase()).collect();
        let mut found: Vec<CatalogEntity> = self
            .entities
            .iter()
            .filter(|e| {
                e.city
                    .as_deref()
                    .map(|c| variants.contains(&c.to_lowercase()))
                    .unwrap_or(false)
                    && !exclude_ids.contains(&e.id)
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| b.rating.unwrap_or(0.0).total_cmp(&a.rating.unwrap_or(0.0)));
        found.truncate(limit);
        Ok(found)
    }

    async fn update_image(&self, id: &str, url: &str) -> Result<()> {
        self.image_updates
            .lock()
            .push((id.to_string(), url.to_string()));
        Ok(())
    }
}

/// Image searcher answering a fixed URL for every place.
pub struct FixedImageSearcher(pub String);

#[async_trait]
impl ImageSearcher for FixedImageSearcher {
    async fn find_image(&self, _place_name: &str, _city: Option<&str>) -> Result<Option<String>> {
        Ok(Some(self.0.clone()))
    }
}

/// Image searcher whose backend is down.
pub struct DownImageSearcher;

#[async_trait]
impl ImageSearcher for DownImageSearcher {
    async fn find_image(&self, _place_name: &str, _city: Option<&str>) -> Result<Option<String>> {
        Err(Error::Catalog("image backend unavailable".into()))
    }
}

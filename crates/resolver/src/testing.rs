//! In-memory catalog fakes shared by the resolver and assembler tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use waypoint_core::{CatalogEntity, Error, FragmentSearch, PlaceCatalog, Result, TagPayload};
use waypoint_text::normalize;

pub(crate) fn entity(id: &str, name: &str, city: &str) -> CatalogEntity {
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

pub(crate) fn entity_no_image(id: &str, name: &str, city: &str) -> CatalogEntity {
    let mut e = entity(id, name, city);
    e.cover_image = None;
    e
}

pub(crate) fn entity_rated(
    id: &str,
    name: &str,
    city: &str,
    rating: f32,
    rating_count: u32,
) -> CatalogEntity {
    let mut e = entity(id, name, city);
    e.rating = Some(rating);
    e.rating_count = Some(rating_count);
    e
}

/// In-memory catalog with the same matching semantics the production
/// backend promises: AND-containment fragment search, case-insensitive
/// exact match, rating-ordered city listing.
pub(crate) struct MockCatalog {
    entities: Vec<CatalogEntity>,
    pub(crate) image_updates: Mutex<Vec<(String, String)>>,
}

impl MockCatalog {
    pub(crate) fn new(entities: Vec<CatalogEntity>) -> Self {
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
        let fold = |s: &str| {
            if options.accent_insensitive {
                normalize(s)
            } else {
                s.to_lowercase()
            }
        };
        let found = self
            .entities
            .iter()
            .filter(|e| {
                let name = fold(&e.name);
                fragments.iter().all(|f| name.contains(&fold(f)))
            })
            .take(options.limit)
            .cloned()
            .collect();
        Ok(found)
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
        let variants: Vec<String> = city_variants.iter().map(|v| normalize(v)).collect();
        let mut found: Vec<CatalogEntity> = self
            .entities
            .iter()
            .filter(|e| {
                e.city
                    .as_deref()
                    .map(|c| variants.contains(&normalize(c)))
                    .unwrap_or(false)
                    && !exclude_ids.contains(&e.id)
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0))
                .then(b.rating_count.unwrap_or(0).cmp(&a.rating_count.unwrap_or(0)))
        });
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

/// Catalog whose every call errors, for degradation tests.
pub(crate) struct FailingCatalog;

#[async_trait]
impl PlaceCatalog for FailingCatalog {
    async fn find_by_name_fragment(
        &self,
        _fragments: &[String],
        _options: &FragmentSearch,
    ) -> Result<Vec<CatalogEntity>> {
        Err(Error::Catalog("catalog unavailable".into()))
    }

    async fn find_exact(&self, _name: &str) -> Result<Vec<CatalogEntity>> {
        Err(Error::Catalog("catalog unavailable".into()))
    }

    async fn find_by_city(
        &self,
        _city_variants: &[String],
        _exclude_ids: &[String],
        _limit: usize,
    ) -> Result<Vec<CatalogEntity>> {
        Err(Error::Catalog("catalog unavailable".into()))
    }

    async fn update_image(&self, _id: &str, _url: &str) -> Result<()> {
        Err(Error::Catalog("catalog unavailable".into()))
    }
}

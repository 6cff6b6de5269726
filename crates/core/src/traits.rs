//! Collaborator traits for external services
//!
//! The place catalog and the image-search backend are owned elsewhere; these
//! traits pin down exactly what this subsystem consumes so tests can swap in
//! in-memory fakes.

use crate::{CatalogEntity, Result};
use async_trait::async_trait;

/// Options for a name-fragment containment search.
#[derive(Debug, Clone)]
pub struct FragmentSearch {
    /// Match with accents/diacritics stripped on both sides when the
    /// backend supports it
    pub accent_insensitive: bool,
    /// Bounded result count
    pub limit: usize,
}

impl Default for FragmentSearch {
    fn default() -> Self {
        Self {
            accent_insensitive: true,
            limit: 20,
        }
    }
}

/// Read access to the external place catalog.
#[async_trait]
pub trait PlaceCatalog: Send + Sync {
    /// Substring/containment search: every fragment must occur in the
    /// entity name.
    async fn find_by_name_fragment(
        &self,
        fragments: &[String],
        options: &FragmentSearch,
    ) -> Result<Vec<CatalogEntity>>;

    /// Case-insensitive exact name match.
    async fn find_exact(&self, name: &str) -> Result<Vec<CatalogEntity>>;

    /// Entities in any of the given city name variants, excluding the given
    /// ids, ordered by rating then rating count, bounded by `limit`.
    async fn find_by_city(
        &self,
        city_variants: &[String],
        exclude_ids: &[String],
        limit: usize,
    ) -> Result<Vec<CatalogEntity>>;

    /// Fire-and-forget image write-back after an out-of-band image search.
    async fn update_image(&self, id: &str, url: &str) -> Result<()>;
}

/// Out-of-band image search collaborator, used when a strict-mode lookup
/// succeeds but the entity lacks imagery.
#[async_trait]
pub trait ImageSearcher: Send + Sync {
    /// Best-effort image URL for a named place.
    async fn find_image(&self, place_name: &str, city: Option<&str>) -> Result<Option<String>>;
}

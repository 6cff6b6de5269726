//! Core types and traits for the travel assistant query-resolution backend
//!
//! This crate provides the foundational types used across all other crates:
//! - Query and language definitions
//! - Intent classification types
//! - Catalog entity and resolved place views
//! - Collaborator traits for the external catalog and image search
//! - Error types

pub mod error;
pub mod intent;
pub mod language;
pub mod place;
pub mod query;
pub mod result;
pub mod traits;

pub use error::{Error, Result};
pub use intent::{Intent, IntentVerdict};
pub use language::Language;
pub use place::{is_http_url, CatalogEntity, ResolvedPlace, Tag, TagPayload};
pub use query::Query;
pub use result::{CityGroup, ResolutionResult};
pub use traits::{FragmentSearch, ImageSearcher, PlaceCatalog};

//! Final structured resolution results

use crate::{IntentVerdict, ResolvedPlace};
use serde::{Deserialize, Serialize};

/// Places grouped under one canonical city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityGroup {
    pub city: String,
    pub places: Vec<ResolvedPlace>,
}

/// The subsystem's output, one variant per orchestrator branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionResult {
    /// Plain text answer (non-travel queries, or degraded consultations)
    Text { text: String },
    /// Text plus a single resolved place (specific-place lookups).
    /// `place` is `None` when no catalog entity cleared the strict gate.
    Place {
        text: String,
        place: Option<ResolvedPlace>,
    },
    /// Consultation answer whose mentions all fell in one city
    Places {
        text: String,
        places: Vec<ResolvedPlace>,
    },
    /// Consultation answer spanning several cities
    CityGroups {
        text: String,
        groups: Vec<CityGroup>,
    },
    /// General search is delegated to the catalog's own search endpoint;
    /// the verdict carries the extracted category/city/count filters.
    Search { verdict: IntentVerdict },
}

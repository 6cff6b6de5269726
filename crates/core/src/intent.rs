//! Intent classification types

use serde::{Deserialize, Serialize};
use std::fmt;

/// High-level action category a query is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Find venues matching a category/city filter
    GeneralSearch,
    /// Learn about one named place
    SpecificPlace,
    /// Travel advice (itineraries, tickets, weather, packing, ...)
    TravelConsultation,
    /// Unrelated to travel
    NonTravel,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::GeneralSearch => "general_search",
            Intent::SpecificPlace => "specific_place",
            Intent::TravelConsultation => "travel_consultation",
            Intent::NonTravel => "non_travel",
        };
        write!(f, "{}", s)
    }
}

/// Classifier output, produced exactly once per query and never mutated.
///
/// `confidence` is advisory: no caller branches on it beyond logging, but
/// downstream systems inspect it, so it must survive serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentVerdict {
    pub intent: Intent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    pub confidence: f32,
}

impl IntentVerdict {
    /// A bare verdict with no extracted fields.
    pub fn new(intent: Intent, confidence: f32) -> Self {
        Self {
            intent,
            place_name: None,
            place_names: None,
            city: None,
            category: None,
            count: None,
            confidence,
        }
    }
}

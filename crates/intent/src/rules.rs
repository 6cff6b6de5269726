//! Deterministic rule-based intent detection
//!
//! An ordered decision cascade over injected keyword tables; first match
//! wins. Consultation phrasing is checked before specific-place extraction
//! so "how to buy tickets for X" never degrades into a bare lookup of X.
//! The safe default is `general_search`: the catalog is travel-specific,
//! so an ambiguous query is never classified as non-travel.

use once_cell::sync::Lazy;
use regex::Regex;
use waypoint_config::{CityAliases, KeywordTables};
use waypoint_core::{Intent, IntentVerdict, Query};
use waypoint_text::{normalize, significant_words};

/// "find X" / "tell me about X" style extraction.
static LOOKUP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:find|show me|tell me about|about|what is|where is|info(?:rmation)? (?:on|about))\s+(?:the\s+)?([\w][\w'&. -]{2,60})",
    )
    .expect("lookup pattern")
});

/// A bare capitalized phrase like "Eiffel Tower" or "Museum of Modern Art".
static PROPER_PHRASE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*([A-Z][\w'&-]*(?:\s+(?:of|the|de|la|le|du|des|di|da|e|d'\w+|[A-Z][\w'&-]*))+)\s*[?!.]?\s*$",
    )
    .expect("proper phrase pattern")
});

/// Chinese possessive phrase ending in a landmark-type noun, e.g. 巴黎的卢浮宫.
static ZH_LANDMARK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([\p{Han}]{2,}(?:的[\p{Han}]{1,})?(?:博物馆|美术馆|大教堂|教堂|城堡|广场|公园|宫|塔|寺|桥))",
    )
    .expect("zh landmark pattern")
});

/// Requested result count, e.g. "top 5 cafes" or "5个咖啡馆".
static COUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\b|^)(\d{1,2})(?:\s|个|家|处|$)").expect("count pattern"));

/// Rule-based fallback classifier. Pure, no I/O, microsecond-scale.
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    tables: KeywordTables,
    cities: CityAliases,
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new(KeywordTables::default(), CityAliases::default())
    }
}

impl RuleClassifier {
    pub fn new(tables: KeywordTables, cities: CityAliases) -> Self {
        Self { tables, cities }
    }

    /// Ordered cascade per the intent taxonomy; always returns a verdict.
    pub fn classify(&self, query: &Query) -> IntentVerdict {
        let text = normalize(&query.text);

        // 1. Non-travel vocabulary
        if self.any_keyword(&text, &self.tables.non_travel) {
            return IntentVerdict::new(Intent::NonTravel, 0.7);
        }

        // 2. Consultation families, deliberately before place detection
        for family in &self.tables.consultation {
            if self.any_keyword(&text, &family.keywords) {
                tracing::debug!(family = family.name, "consultation keyword family matched");
                let mut verdict = IntentVerdict::new(Intent::TravelConsultation, 0.8);
                verdict.city = self.cities.detect_in(&query.text);
                return verdict;
            }
        }

        let city = self.cities.detect_in(&query.text);
        let count = extract_count(&text);
        let extracted = self.extract_place_name(&query.text);

        // 3. Category noun present: prefer a specific place only when the
        // extracted name is long enough to be a real venue name
        // ("Vitra Design Museum") rather than a category restated
        // ("design museum").
        if let Some(category) = self.detect_category(&text) {
            if let Some(name) = &extracted {
                if self.looks_specific(name) {
                    let mut verdict = IntentVerdict::new(Intent::SpecificPlace, 0.7);
                    verdict.place_name = Some(name.clone());
                    verdict.city = city;
                    return verdict;
                }
            }
            let mut verdict = IntentVerdict::new(Intent::GeneralSearch, 0.7);
            verdict.category = Some(category.to_string());
            verdict.city = city;
            verdict.count = count;
            return verdict;
        }

        // 4. Specific-place extraction without a category signal
        if let Some(name) = extracted {
            if !self.is_bare_category(&name) {
                let mut verdict = IntentVerdict::new(Intent::SpecificPlace, 0.7);
                verdict.place_name = Some(name);
                verdict.city = city;
                return verdict;
            }
        }

        // 5. Known city alone
        if let Some(city) = city {
            let mut verdict = IntentVerdict::new(Intent::GeneralSearch, 0.6);
            verdict.city = Some(city);
            verdict.count = count;
            return verdict;
        }

        // 6. Safe default
        IntentVerdict::new(Intent::GeneralSearch, 0.4)
    }

    /// Keyword containment with word boundaries for ASCII keywords and raw
    /// substring matching for CJK (which has no word separators).
    fn any_keyword(&self, text: &str, keywords: &[String]) -> bool {
        let words: Vec<&str> = text
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .filter(|w| !w.is_empty())
            .collect();
        keywords.iter().any(|raw| {
            let keyword = normalize(raw);
            let keyword = keyword.trim();
            if keyword.is_empty() {
                return false;
            }
            if keyword.is_ascii() {
                let parts: Vec<&str> = keyword.split_whitespace().collect();
                words
                    .windows(parts.len().max(1))
                    .any(|window| window == parts.as_slice())
            } else {
                text.contains(keyword)
            }
        })
    }

    fn detect_category(&self, text: &str) -> Option<&'static str> {
        self.tables
            .categories
            .iter()
            .find(|c| self.any_keyword(text, &c.keywords))
            .map(|c| c.category)
    }

    /// Whether an extracted name is substantial enough to be a real venue
    /// name rather than a category restated. Word count carries the signal
    /// for whitespace languages; CJK names are one token, so character
    /// count stands in.
    fn looks_specific(&self, name: &str) -> bool {
        if self.is_bare_category(name) {
            return false;
        }
        let han_chars = name
            .chars()
            .filter(|c| ('\u{4e00}'..='\u{9fff}').contains(c))
            .count();
        if han_chars >= 4 {
            return true;
        }
        significant_words(name).len() >= self.tables.specific_name_min_words
    }

    /// Whether an extracted name is just a category restated ("design
    /// museum", "coffee shop"), with no proper-noun content.
    fn is_bare_category(&self, name: &str) -> bool {
        let normalized = normalize(name);
        let normalized = normalized.trim();
        self.tables.categories.iter().any(|c| {
            c.keywords
                .iter()
                .any(|k| normalize(k).trim() == normalized)
        })
    }

    fn extract_place_name(&self, text: &str) -> Option<String> {
        if let Some(captures) = ZH_LANDMARK_PATTERN.captures(text) {
            return Some(captures[1].to_string());
        }
        if let Some(captures) = LOOKUP_PATTERN.captures(text) {
            return clean_extracted(&captures[1]);
        }
        if let Some(captures) = PROPER_PHRASE_PATTERN.captures(text) {
            return clean_extracted(&captures[1]);
        }
        None
    }
}

fn clean_extracted(raw: &str) -> Option<String> {
    let name = raw.trim().trim_end_matches(['?', '!', '.', ',']).trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn extract_count(text: &str) -> Option<u32> {
    COUNT_PATTERN
        .captures(text)
        .and_then(|c| c[1].parse::<u32>().ok())
        .filter(|n| (1..=20).contains(n))
}

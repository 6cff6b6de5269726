//! Keyword tables for the rule-based intent detector
//!
//! These are injected into the detector rather than referenced as ambient
//! globals so unit tests can substitute trimmed-down sets. The built-in
//! tables cover English plus the Chinese vocabulary the assistant sees in
//! production.

/// One consultation keyword family, e.g. everything booking/ticket related.
#[derive(Debug, Clone)]
pub struct KeywordFamily {
    pub name: &'static str,
    pub keywords: Vec<String>,
}

/// A venue category with the keywords that signal it.
#[derive(Debug, Clone)]
pub struct CategoryKeywords {
    /// Canonical category name as the catalog stores it
    pub category: &'static str,
    pub keywords: Vec<String>,
}

/// Immutable keyword configuration for intent detection.
#[derive(Debug, Clone)]
pub struct KeywordTables {
    /// Vocabulary that marks a query as unrelated to travel
    pub non_travel: Vec<String>,
    /// Consultation families, checked before specific-place detection
    pub consultation: Vec<KeywordFamily>,
    /// Category nouns (cafe, museum, ...) with synonyms
    pub categories: Vec<CategoryKeywords>,
    /// Minimum significant-word count for a category-bearing name to be
    /// treated as a specific place rather than a search
    pub specific_name_min_words: usize,
}

fn family(name: &'static str, keywords: &[&str]) -> KeywordFamily {
    KeywordFamily {
        name,
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
    }
}

fn category(category: &'static str, keywords: &[&str]) -> CategoryKeywords {
    CategoryKeywords {
        category,
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
    }
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            non_travel: [
                "homework", "exercise", "workout", "gym routine", "coding", "programming",
                "debug", "resume", "cover letter", "medication", "symptom", "diagnosis",
                "therapy", "depressed", "anxiety", "lonely", "breakup", "salary", "exam",
                "studying", "work meeting", "深蹲", "健身", "编程", "代码", "作业", "症状",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            consultation: vec![
                family(
                    "how_when",
                    &[
                        "how to", "how do i", "how can i", "when to", "when should",
                        "best time to", "怎么", "如何", "什么时候",
                    ],
                ),
                family(
                    "booking",
                    &[
                        "ticket", "tickets", "book", "booking", "reserve", "reservation",
                        "entrance fee", "admission", "price", "cost", "budget", "expensive",
                        "cheap", "门票", "预订", "预约", "价格", "多少钱", "预算",
                    ],
                ),
                family(
                    "weather",
                    &["weather", "season", "rainy", "temperature", "climate", "天气", "季节"],
                ),
                family(
                    "transport",
                    &[
                        "get to", "get from", "transport", "metro", "train to", "bus to",
                        "airport transfer", "taxi", "交通", "地铁", "怎么去",
                    ],
                ),
                family(
                    "packing",
                    &["pack", "packing", "bring", "luggage", "suitcase", "行李", "带什么"],
                ),
                family(
                    "safety",
                    &["safe", "safety", "scam", "pickpocket", "dangerous", "安全", "骗局"],
                ),
                family("visa", &["visa", "passport", "customs", "签证", "护照"]),
                family(
                    "connectivity",
                    &["sim card", "wifi", "internet", "roaming", "language barrier", "电话卡"],
                ),
                family(
                    "accommodation",
                    &[
                        "where to stay", "which area", "which neighborhood", "neighbourhood",
                        "住哪里", "住在哪",
                    ],
                ),
                family(
                    "comparison",
                    &["versus", " vs ", "compare", "or better", "better than", "还是"],
                ),
                family(
                    "advice",
                    &[
                        "worth visiting", "worth it", "recommend", "suggestion", "itinerary",
                        "tips for", "guide to", "值得", "推荐", "攻略", "建议",
                    ],
                ),
            ],
            categories: vec![
                category("cafe", &["cafe", "cafes", "coffee", "coffee shop", "咖啡"]),
                category("museum", &["museum", "museums", "gallery", "galleries", "博物馆", "美术馆"]),
                category(
                    "restaurant",
                    &["restaurant", "restaurants", "dinner", "lunch", "eat", "food", "餐厅", "美食"],
                ),
                category("bar", &["bar", "bars", "pub", "cocktail", "nightlife", "酒吧"]),
                category("park", &["park", "parks", "garden", "gardens", "公园", "花园"]),
                category("shop", &["shop", "shopping", "market", "boutique", "商店", "市场"]),
                category("hotel", &["hotel", "hostel", "酒店", "旅馆"]),
                category("bakery", &["bakery", "bakeries", "patisserie", "面包店"]),
                category("church", &["church", "cathedral", "temple", "教堂", "寺庙"]),
            ],
            specific_name_min_words: 3,
        }
    }
}

//! Canonical city alias table
//!
//! The generative backend labels places with whatever city spelling it
//! produced (Rome/Roma, 威尼斯/Venice). Catalog lookups against city are
//! exact-match, so each mentioned city is expanded to its full variant set
//! before querying; fuzzy city matching would invite cross-city leakage.

use waypoint_text::normalize;

/// Fixed bilingual alias table, canonical variant first.
#[derive(Debug, Clone)]
pub struct CityAliases {
    groups: Vec<Vec<String>>,
}

const ALIAS_GROUPS: &[&[&str]] = &[
    &["Rome", "Roma", "罗马"],
    &["Venice", "Venezia", "威尼斯"],
    &["Florence", "Firenze", "佛罗伦萨"],
    &["Milan", "Milano", "米兰"],
    &["Naples", "Napoli", "那不勒斯"],
    &["Turin", "Torino", "都灵"],
    &["Munich", "München", "Muenchen", "慕尼黑"],
    &["Cologne", "Köln", "Koeln", "科隆"],
    &["Vienna", "Wien", "维也纳"],
    &["Zurich", "Zürich", "苏黎世"],
    &["Geneva", "Genève", "日内瓦"],
    &["Copenhagen", "København", "哥本哈根"],
    &["Prague", "Praha", "布拉格"],
    &["Lisbon", "Lisboa", "里斯本"],
    &["Seville", "Sevilla", "塞维利亚"],
    &["Athens", "Athina", "雅典"],
    &["Paris", "巴黎"],
    &["Nice", "尼斯"],
    &["London", "伦敦"],
    &["Barcelona", "巴塞罗那"],
    &["Madrid", "马德里"],
    &["Berlin", "柏林"],
    &["Amsterdam", "阿姆斯特丹"],
    &["Brussels", "Bruxelles", "布鲁塞尔"],
    &["Budapest", "布达佩斯"],
    &["Dublin", "都柏林"],
    &["Edinburgh", "爱丁堡"],
    &["Stockholm", "斯德哥尔摩"],
    &["Oslo", "奥斯陆"],
    &["Helsinki", "赫尔辛基"],
    &["Istanbul", "伊斯坦布尔"],
    &["Beijing", "北京"],
    &["Shanghai", "上海"],
    &["Hong Kong", "香港"],
    &["Tokyo", "东京"],
    &["Kyoto", "京都"],
    &["Osaka", "大阪"],
    &["Seoul", "首尔"],
    &["Singapore", "新加坡"],
    &["Bangkok", "曼谷"],
    &["New York", "纽约"],
    &["San Francisco", "旧金山"],
    &["Los Angeles", "洛杉矶"],
    &["Sydney", "悉尼"],
];

impl Default for CityAliases {
    fn default() -> Self {
        Self {
            groups: ALIAS_GROUPS
                .iter()
                .map(|g| g.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }
}

impl CityAliases {
    fn group_of(&self, city: &str) -> Option<&Vec<String>> {
        let needle = normalize(city);
        let needle = needle.trim();
        self.groups
            .iter()
            .find(|group| group.iter().any(|v| normalize(v) == needle))
    }

    /// Canonical spelling for a city, or the input itself when unknown.
    pub fn canonical(&self, city: &str) -> String {
        self.group_of(city)
            .map(|g| g[0].clone())
            .unwrap_or_else(|| city.trim().to_string())
    }

    /// The full variant set for exact-match catalog lookups. Unknown cities
    /// map to a singleton of themselves.
    pub fn variants(&self, city: &str) -> Vec<String> {
        self.group_of(city)
            .cloned()
            .unwrap_or_else(|| vec![city.trim().to_string()])
    }

    /// Whether the city is in the alias table.
    pub fn is_known(&self, city: &str) -> bool {
        self.group_of(city).is_some()
    }

    /// Scan free text for a known city mention; returns the canonical name.
    pub fn detect_in(&self, text: &str) -> Option<String> {
        let haystack = normalize(text);
        for group in &self.groups {
            for variant in group {
                let v = normalize(variant);
                let hit = if v.is_ascii() {
                    haystack
                        .split(|c: char| !c.is_alphanumeric())
                        .collect::<Vec<_>>()
                        .windows(v.split(' ').count().max(1))
                        .any(|w| w.join(" ") == v)
                } else {
                    haystack.contains(&v)
                };
                if hit {
                    return Some(group[0].clone());
                }
            }
        }
        None
    }
}

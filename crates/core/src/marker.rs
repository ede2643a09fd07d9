//! Section markers.
//!
//! A marker pairs a section key with the literal text that opens that
//! section inside a worksheet. Matching is a plain substring test on the
//! first cell of a row, tried in declared order; the first hit wins.

use serde::{Deserialize, Serialize};

/// One section key and the text that introduces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub key: String,
    pub pattern: String,
}

impl Marker {
    pub fn new(key: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            pattern: pattern.into(),
        }
    }
}

/// Ordered marker vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new(markers: Vec<Marker>) -> Self {
        Self { markers }
    }

    /// The six ranking tables of the stock analysis report.
    pub fn rankings() -> Self {
        Self::new(vec![
            Marker::new("stocks", "[個股排名 (Top 30)]"),
            Marker::new("industries", "[產業排名 (Top 10)]"),
            Marker::new("sub_industries", "[細產業排名 (Top 10)]"),
            Marker::new("related_industries", "[相關產業排名 (Top 10)]"),
            Marker::new("related_groups", "[相關集團排名 (Top 10)]"),
            Marker::new("industry_types", "[產業別排名 (Top 10)]"),
        ])
    }

    /// Key of the first marker whose pattern occurs in `text`.
    pub fn find(&self, text: &str) -> Option<&str> {
        self.markers
            .iter()
            .find(|marker| text.contains(marker.pattern.as_str()))
            .map(|marker| marker.key.as_str())
    }

    /// Section keys in declared order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(|marker| marker.key.as_str())
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::rankings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match() {
        let markers = MarkerSet::rankings();
        assert_eq!(markers.find("  [個股排名 (Top 30)] 2024"), Some("stocks"));
        assert_eq!(markers.find("[產業別排名 (Top 10)]"), Some("industry_types"));
        assert_eq!(markers.find("個股排名"), None);
    }

    #[test]
    fn test_first_declared_wins() {
        let markers = MarkerSet::new(vec![
            Marker::new("short", "排名"),
            Marker::new("long", "[產業排名 (Top 10)]"),
        ]);
        assert_eq!(markers.find("[產業排名 (Top 10)]"), Some("short"));
    }

    #[test]
    fn test_keys_in_order() {
        let markers = MarkerSet::rankings();
        let keys: Vec<_> = markers.keys().collect();
        assert_eq!(
            keys,
            vec![
                "stocks",
                "industries",
                "sub_industries",
                "related_industries",
                "related_groups",
                "industry_types"
            ]
        );
    }
}

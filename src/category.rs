use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of sector tags used for filtering and badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    AI,
    Fintech,
    Enterprise,
    Space,
    Consumer,
    Crypto,
    Health,
}

impl Category {
    /// Matching order used by [`normalize_category`]. The first entry that is a
    /// substring of the input wins.
    pub const ALL: [Category; 7] = [
        Category::AI,
        Category::Fintech,
        Category::Enterprise,
        Category::Space,
        Category::Consumer,
        Category::Crypto,
        Category::Health,
    ];

    pub const DEFAULT: Category = Category::Enterprise;

    pub fn label(&self) -> &'static str {
        match self {
            Category::AI => "AI",
            Category::Fintech => "Fintech",
            Category::Enterprise => "Enterprise",
            Category::Space => "Space",
            Category::Consumer => "Consumer",
            Category::Crypto => "Crypto",
            Category::Health => "Health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Collapses free-text sector labels like "Enterprise SoftwareData Intelligence"
/// onto the closed category set. Matching is case-sensitive substring
/// containment, tested in `Category::ALL` order.
pub fn normalize_category(sector: Option<&str>) -> Category {
    let text = match sector {
        Some(s) if !s.is_empty() => s,
        _ => return Category::DEFAULT,
    };

    Category::ALL
        .iter()
        .copied()
        .find(|c| text.contains(c.label()))
        .unwrap_or(Category::DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concatenated_labels_resolve_to_first_enumerated_match() {
        assert_eq!(
            normalize_category(Some("Enterprise SoftwareData Intelligence")),
            Category::Enterprise
        );
    }

    #[test]
    fn test_enumeration_order_beats_position_in_string() {
        // "Health" appears first in the text but AI comes first in the enumeration
        assert_eq!(normalize_category(Some("Health & AI diagnostics")), Category::AI);
        assert_eq!(normalize_category(Some("Crypto Fintech")), Category::Fintech);
    }

    #[test]
    fn test_absent_or_empty_defaults_to_enterprise() {
        assert_eq!(normalize_category(None), Category::Enterprise);
        assert_eq!(normalize_category(Some("")), Category::Enterprise);
        assert_eq!(normalize_category(Some("Hardware")), Category::Enterprise);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(normalize_category(Some("fintech")), Category::Enterprise);
        assert_eq!(normalize_category(Some("SPACE")), Category::Enterprise);
        assert_eq!(normalize_category(Some("Space & Defense")), Category::Space);
    }

    #[test]
    fn test_substring_inside_words_matches() {
        // "AI" inside "OpenAI Labs" is enough
        assert_eq!(normalize_category(Some("OpenAI Labs")), Category::AI);
        assert_eq!(normalize_category(Some("Digital Health")), Category::Health);
    }

    #[test]
    fn test_from_str_round_trips_labels() {
        for c in Category::ALL {
            assert_eq!(c.label().parse::<Category>().unwrap(), c);
        }
        assert!("All".parse::<Category>().is_err());
    }
}

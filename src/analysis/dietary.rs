use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Built-in risk keywords per dietary mode.
///
/// Matching is plain substring containment on lowercased text, so a term like
/// "egg" also hits "eggplant" and "milk-free" still hits "milk".
pub const DEFAULT_RISK_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "halal",
        &[
            "gelatin", "lard", "pork", "bacon", "alcohol", "wine", "whey", "casein", "milk",
            "egg",
        ],
    ),
    (
        "vegan",
        &[
            "gelatin", "lard", "pork", "bacon", "beef", "chicken", "fish", "milk", "whey",
            "casein", "lactose", "butter", "cream", "cheese", "egg", "honey", "carmine",
        ],
    ),
];

/// Outcome of scanning ingredient text for one dietary mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DietaryFlags {
    pub violation: bool,
    pub matched_terms: BTreeSet<String>,
}

/// Immutable table of risk terms keyed by mode name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskKeywords {
    modes: BTreeMap<String, BTreeSet<String>>,
}

impl Default for RiskKeywords {
    fn default() -> Self {
        Self::from_pairs(
            DEFAULT_RISK_KEYWORDS
                .iter()
                .map(|(mode, terms)| {
                    (mode.to_string(), terms.iter().map(|t| t.to_string()).collect())
                }),
        )
    }
}

impl RiskKeywords {
    /// Build a table; mode names and terms are lowercased and blank terms dropped
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let modes = pairs
            .into_iter()
            .map(|(mode, terms)| {
                let terms = terms
                    .iter()
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect();
                (mode.trim().to_lowercase(), terms)
            })
            .collect();
        Self { modes }
    }

    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }

    pub fn terms(&self, mode: &str) -> Option<&BTreeSet<String>> {
        self.modes.get(mode)
    }

    /// Scan for a single mode. Unknown modes never flag anything.
    pub fn scan(&self, ingredients: &str, mode: &str) -> DietaryFlags {
        let text = ingredients.to_lowercase();
        let matched_terms: BTreeSet<String> = self
            .modes
            .get(mode)
            .into_iter()
            .flatten()
            .filter(|term| text.contains(term.as_str()))
            .cloned()
            .collect();

        DietaryFlags {
            violation: !matched_terms.is_empty(),
            matched_terms,
        }
    }

    /// Scan for every configured mode
    pub fn scan_all(&self, ingredients: &str) -> BTreeMap<String, DietaryFlags> {
        self.modes
            .keys()
            .map(|mode| (mode.clone(), self.scan(ingredients, mode)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(terms: &[&str]) -> BTreeSet<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn scan_is_case_insensitive_and_order_independent() {
        let keywords = RiskKeywords::default();
        let a = keywords.scan("Pork Lard", "halal");
        let b = keywords.scan("lard, PORK", "halal");
        assert_eq!(a.matched_terms, set(&["lard", "pork"]));
        assert_eq!(a, b);
        assert!(a.violation);
    }

    #[test]
    fn scan_is_idempotent() {
        let keywords = RiskKeywords::default();
        let text = "Sugar, GELATIN, skimmed milk powder";
        assert_eq!(keywords.scan_all(text), keywords.scan_all(text));
    }

    #[test]
    fn empty_text_has_no_violation() {
        let keywords = RiskKeywords::default();
        for (mode, flags) in keywords.scan_all("") {
            assert!(!flags.violation, "mode {} flagged empty text", mode);
            assert!(flags.matched_terms.is_empty());
        }
    }

    #[test]
    fn negated_mentions_still_match() {
        // substring policy: "milk-free" is reported as milk
        let flags = RiskKeywords::default().scan("milk-free chocolate", "vegan");
        assert!(flags.matched_terms.contains("milk"));
    }

    #[test]
    fn modes_use_their_own_terms() {
        let keywords = RiskKeywords::default();
        let text = "honey, oats";
        assert!(!keywords.scan(text, "halal").violation);
        assert_eq!(keywords.scan(text, "vegan").matched_terms, set(&["honey"]));
    }

    #[test]
    fn unknown_mode_never_flags() {
        let flags = RiskKeywords::default().scan("pork", "kosher");
        assert!(!flags.violation);
    }

    #[test]
    fn custom_table_is_normalized() {
        let keywords = RiskKeywords::from_pairs(vec![(
            " Kosher ".to_string(),
            vec!["Pork".to_string(), " ".to_string(), "SHRIMP".to_string()],
        )]);
        assert_eq!(keywords.modes().collect::<Vec<_>>(), vec!["kosher"]);
        assert_eq!(keywords.terms("kosher"), Some(&set(&["pork", "shrimp"])));
        assert_eq!(
            keywords.scan("Shrimp paste", "kosher").matched_terms,
            set(&["shrimp"])
        );
    }
}

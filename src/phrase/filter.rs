//! Boundary filtering.
//!
//! A compound whose *first or last* component is a designated weak term
//! ("and", "&", prepositions, ...) is usually an artifact of adjacency
//! rather than a real expression. The filter flags such compounds for
//! removal, unless they are explicitly whitelisted. Interior components are
//! never inspected: `role_and_you` survives a stopword set of `{"and"}`.
//!
//! Stopword presets come from the `stop-words` crate; custom lists and the
//! empty filter are also available.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::phrase::table::{PhraseVocabulary, Removal};
use crate::types::{components, Token};

/// Identifies compounds with weak boundary terms.
#[derive(Debug, Clone)]
pub struct BoundaryFilter {
    /// Terms that disqualify a compound when leading or trailing.
    stopwords: FxHashSet<Token>,
    /// Compounds exempt from filtering regardless of their boundaries.
    whitelist: FxHashSet<Token>,
}

impl Default for BoundaryFilter {
    fn default() -> Self {
        Self::conjunctions()
    }
}

impl BoundaryFilter {
    /// A filter with no stopwords (flags nothing).
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
            whitelist: FxHashSet::default(),
        }
    }

    /// The minimal conjunction set: `and` and `&`.
    pub fn conjunctions() -> Self {
        Self::from_list(&["and", "&"])
    }

    /// A filter seeded with the full stopword list for a language.
    ///
    /// Unknown language codes fall back to English.
    pub fn for_language(language: &str) -> Self {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            _ => LANGUAGE::English,
        };
        Self {
            stopwords: get(lang).iter().map(|s| s.to_string()).collect(),
            whitelist: FxHashSet::default(),
        }
    }

    /// A filter from a custom stopword list.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_string()).collect(),
            whitelist: FxHashSet::default(),
        }
    }

    /// Exempt the given compound phrases from filtering.
    pub fn with_whitelist(mut self, phrases: &[&str]) -> Self {
        self.whitelist = phrases.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Add stopwords to the filter.
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_string());
        }
    }

    /// Whether a compound should be removed: more than one component, a
    /// stopword at either boundary, and not whitelisted.
    pub fn is_blacklisted(&self, compound: &str) -> bool {
        if self.whitelist.contains(compound) {
            return false;
        }
        let terms = components(compound);
        if terms.len() < 2 {
            return false;
        }
        // First or last component only; interior stopwords are fine.
        self.stopwords.contains(terms[0]) || self.stopwords.contains(terms[terms.len() - 1])
    }

    /// Collect every blacklisted compound in the vocabulary.
    pub fn blacklist(&self, phrases: &PhraseVocabulary) -> Vec<Token> {
        let mut out: Vec<Token> = phrases
            .iter()
            .filter(|(compound, _)| self.is_blacklisted(compound))
            .map(|(compound, _)| compound.to_string())
            .collect();
        // Deterministic removal order for logs and tests.
        out.sort_unstable();
        out
    }

    /// Remove every blacklisted compound from the vocabulary.
    ///
    /// Returns the number actually removed. Entries that disappeared between
    /// blacklisting and removal are skipped silently ([`Removal::Absent`]).
    pub fn apply(&self, phrases: &mut PhraseVocabulary) -> usize {
        self.blacklist(phrases)
            .iter()
            .filter(|compound| phrases.remove(compound) == Removal::Removed)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtractorConfig;
    use crate::vocab::Vocabulary;

    fn doc(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn vocabulary_with(pairs: &[(&str, &str)]) -> PhraseVocabulary {
        // Each pair becomes two identical documents; min_count 1 keeps the
        // fixture small.
        let corpus: Vec<Vec<String>> = pairs
            .iter()
            .flat_map(|&(a, b)| std::iter::repeat(doc(&[a, b])).take(2))
            .collect();
        let vocab = Vocabulary::count(&corpus);
        let config = ExtractorConfig::new().with_min_count(1).build().unwrap();
        PhraseVocabulary::build(&vocab, &config)
    }

    #[test]
    fn test_leading_and_trailing_stopwords_flagged() {
        let filter = BoundaryFilter::from_list(&["and"]);
        assert!(filter.is_blacklisted("and_then"));
        assert!(filter.is_blacklisted("salt_and"));
        assert!(!filter.is_blacklisted("salt_pepper"));
    }

    #[test]
    fn test_interior_stopword_not_flagged() {
        let filter = BoundaryFilter::from_list(&["and"]);
        // Only boundaries count: "role" and "you" are clean.
        assert!(!filter.is_blacklisted("role_and_you"));
    }

    #[test]
    fn test_unigrams_never_flagged() {
        let filter = BoundaryFilter::from_list(&["and"]);
        assert!(!filter.is_blacklisted("and"));
    }

    #[test]
    fn test_whitelist_overrides_stopwords() {
        let filter = BoundaryFilter::from_list(&["in"]).with_whitelist(&["walk_in"]);
        assert!(!filter.is_blacklisted("walk_in"));
        assert!(filter.is_blacklisted("drive_in"));
    }

    #[test]
    fn test_whitelist_overrides_even_double_stopword_boundary() {
        let filter = BoundaryFilter::from_list(&["all", "in"]).with_whitelist(&["all_in"]);
        assert!(!filter.is_blacklisted("all_in"));
    }

    #[test]
    fn test_apply_removes_from_vocabulary_and_pair_set() {
        let mut phrases = vocabulary_with(&[("walk", "in"), ("sit", "down")]);
        let filter = BoundaryFilter::from_list(&["in"]);

        let removed = filter.apply(&mut phrases);
        assert_eq!(removed, 1);
        assert!(!phrases.contains("walk_in"));
        assert!(!phrases.contains_pair("walk", "in"));
        assert!(phrases.contains("sit_down"));
    }

    #[test]
    fn test_apply_on_empty_vocabulary_is_noop() {
        let mut phrases = PhraseVocabulary::default();
        let filter = BoundaryFilter::conjunctions();
        assert_eq!(filter.apply(&mut phrases), 0);
    }

    #[test]
    fn test_language_preset_flags_common_words() {
        let filter = BoundaryFilter::for_language("en");
        assert!(filter.is_blacklisted("the_thing"));
        assert!(filter.is_blacklisted("thing_of"));
        assert!(!filter.is_blacklisted("walk_clinic"));
    }

    #[test]
    fn test_default_is_conjunction_set() {
        let filter = BoundaryFilter::default();
        assert!(filter.is_blacklisted("fish_and"));
        assert!(filter.is_blacklisted("&_co"));
        assert!(!filter.is_blacklisted("fish_chips"));
    }
}

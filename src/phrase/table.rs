//! Accepted-pair collection.
//!
//! The [`PhraseVocabulary`] is built once per round by scoring every pair
//! the counter observed. It is the single source of truth for the round:
//! the merger and the exporter read the same joined-form map, so removing a
//! filtered phrase guarantees it is never merged in the same round.

use rustc_hash::FxHashMap;

use crate::scoring::{Decision, PairScorer};
use crate::types::{join, ExtractorConfig, Token};
use crate::vocab::Vocabulary;

/// Result of removing a phrase from the vocabulary.
///
/// Best-effort removal: asking to remove a phrase that was never accepted
/// (a stale blacklist entry, say) is [`Removal::Absent`], not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The phrase was present and has been removed.
    Removed,
    /// The phrase was not in the vocabulary; nothing changed.
    Absent,
}

/// The set of token pairs accepted for merging this round, keyed by joined
/// form.
///
/// One map serves both roles: key membership is the accepted-pair set the
/// merger consults, and the values are the pair frequencies the export
/// table reads. A removal therefore updates both in a single O(1)
/// operation, and merging reflects filtering in the same round.
#[derive(Debug, Clone, Default)]
pub struct PhraseVocabulary {
    frequencies: FxHashMap<Token, u64>,
}

impl PhraseVocabulary {
    /// Score every observed pair and collect the accepted ones.
    ///
    /// Order-independent: the result is a mapping, and no decision depends
    /// on iteration order. Pairs with zero co-occurrence never reach the
    /// scorer because only observed pairs are iterated.
    pub fn build(vocab: &Vocabulary, config: &ExtractorConfig) -> Self {
        let scorer = PairScorer::new(vocab, config);
        let mut out = PhraseVocabulary::default();
        for ((a, b), &count) in &vocab.pairs {
            if let Decision::Accept { .. } = scorer.evaluate(a, b, count) {
                out.insert(a, b, count);
            }
        }
        out
    }

    fn insert(&mut self, a: &str, b: &str, count: u64) {
        self.frequencies.insert(join(a, b), count);
    }

    /// Whether the adjacent pair (a, b) should merge.
    pub fn contains_pair(&self, a: &str, b: &str) -> bool {
        self.frequencies.contains_key(&join(a, b))
    }

    /// Whether the joined compound was accepted.
    pub fn contains(&self, compound: &str) -> bool {
        self.frequencies.contains_key(compound)
    }

    /// Frequency of an accepted compound, zero if absent.
    pub fn frequency(&self, compound: &str) -> u64 {
        self.frequencies.get(compound).copied().unwrap_or(0)
    }

    /// Remove a compound from the vocabulary.
    ///
    /// The merger consults the same map, so a removed phrase is never
    /// merged later in the round.
    pub fn remove(&mut self, compound: &str) -> Removal {
        match self.frequencies.remove(compound) {
            Some(_) => Removal::Removed,
            None => Removal::Absent,
        }
    }

    /// Iterate over (joined compound, frequency) entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.frequencies.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Number of accepted phrases.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True when no pair was accepted.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
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

    fn build_clinic() -> PhraseVocabulary {
        let corpus = vec![
            doc(&["walk", "in", "clinic"]),
            doc(&["walk", "in", "clinic"]),
            doc(&["sit", "down", "restaurant"]),
        ];
        let vocab = Vocabulary::count(&corpus);
        let config = ExtractorConfig::new().with_min_count(2).build().unwrap();
        PhraseVocabulary::build(&vocab, &config)
    }

    #[test]
    fn test_build_accepts_frequent_associated_pairs() {
        let phrases = build_clinic();
        assert!(phrases.contains("walk_in"));
        assert!(phrases.contains("in_clinic"));
        assert_eq!(phrases.frequency("walk_in"), 2);
        // Below min_count 2:
        assert!(!phrases.contains("sit_down"));
    }

    #[test]
    fn test_contains_pair_matches_joined_form() {
        let phrases = build_clinic();
        assert!(phrases.contains_pair("walk", "in"));
        assert!(!phrases.contains_pair("in", "walk"));
    }

    #[test]
    fn test_remove_present_then_absent() {
        let mut phrases = build_clinic();
        assert_eq!(phrases.remove("walk_in"), Removal::Removed);
        assert!(!phrases.contains("walk_in"));
        assert!(!phrases.contains_pair("walk", "in"));
        // Second removal of the same key is a no-op.
        assert_eq!(phrases.remove("walk_in"), Removal::Absent);
        // Never-accepted key likewise.
        assert_eq!(phrases.remove("palo_alto"), Removal::Absent);
    }

    #[test]
    fn test_empty_vocabulary_builds_empty_table() {
        let config = ExtractorConfig::new().build().unwrap();
        let phrases = PhraseVocabulary::build(&Vocabulary::default(), &config);
        assert!(phrases.is_empty());
        assert_eq!(phrases.len(), 0);
    }

    #[test]
    fn test_frequency_of_absent_compound_is_zero() {
        let phrases = build_clinic();
        assert_eq!(phrases.frequency("no_such"), 0);
    }
}

//! Vocabulary counting.
//!
//! One pass over the corpus produces unigram frequencies, adjacent-pair
//! frequencies, and the total token count. Counts are rebuilt from scratch
//! every round; only the corpus itself carries state between rounds, via
//! compounds that are atomic tokens on the next pass.

use rustc_hash::FxHashMap;

use crate::types::{Corpus, Token};

/// Frequency counts for one pass over a corpus.
///
/// `total_tokens` is N, the normalization denominator for scoring: the total
/// number of tokens processed, i.e. the sum of all unigram frequencies. This
/// convention is fixed and identical in every round.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Frequency of each distinct token (unigram or previously-merged
    /// compound, which counts as one token here).
    pub unigrams: FxHashMap<Token, u64>,
    /// Frequency of each adjacent token pair, within document bounds.
    pub pairs: FxHashMap<(Token, Token), u64>,
    /// Total tokens processed. Invariant: equals the sum of `unigrams`
    /// values.
    pub total_tokens: u64,
}

impl Vocabulary {
    /// Count unigrams and adjacent pairs across the whole corpus.
    ///
    /// Empty documents contribute nothing; single-token documents contribute
    /// one unigram observation and no pair. Deterministic given corpus
    /// order.
    pub fn count(corpus: &Corpus) -> Self {
        let mut vocab = Vocabulary::default();
        for doc in corpus {
            vocab.count_document(doc);
        }
        vocab
    }

    fn count_document(&mut self, doc: &[Token]) {
        for token in doc {
            *self.unigrams.entry(token.clone()).or_insert(0) += 1;
            self.total_tokens += 1;
        }
        for window in doc.windows(2) {
            let key = (window[0].clone(), window[1].clone());
            *self.pairs.entry(key).or_insert(0) += 1;
        }
    }

    /// Frequency of a single token, zero if unseen.
    pub fn unigram_count(&self, token: &str) -> u64 {
        self.unigrams.get(token).copied().unwrap_or(0)
    }

    /// Frequency of an adjacent pair, zero if unseen.
    pub fn pair_count(&self, a: &str, b: &str) -> u64 {
        // Keyed by owned tuples; lookups are off the hot path (scoring
        // iterates the map directly).
        self.pairs
            .get(&(a.to_string(), b.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct tokens seen this pass.
    pub fn len(&self) -> usize {
        self.unigrams.len()
    }

    /// True when nothing was counted (empty corpus or all-empty documents).
    pub fn is_empty(&self) -> bool {
        self.unigrams.is_empty()
    }
}

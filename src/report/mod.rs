//! Derived, read-only views for inspection and export.
//!
//! The phrase table and the top-ngram buckets are recomputed from the
//! current vocabulary state on request; they hold no independent identity
//! and never mutate engine state.

use rustc_hash::FxHashMap;

use crate::phrase::table::PhraseVocabulary;
use crate::types::{order, Token, SEPARATOR};
use crate::vocab::Vocabulary;

/// Frequency-sorted phrase table: every accepted compound with its pair
/// frequency.
///
/// Sorted by frequency descending; ties broken by component count ascending,
/// then lexicographically. Entries are true merges by construction (every
/// key contains the separator), so there is nothing to strip.
pub fn phrase_table(phrases: &PhraseVocabulary) -> Vec<(Token, u64)> {
    let mut table: Vec<(Token, u64)> = phrases
        .iter()
        .map(|(compound, freq)| (compound.to_string(), freq))
        .collect();
    table.sort_unstable_by(|(a, fa), (b, fb)| {
        fb.cmp(fa)
            .then_with(|| order(a).cmp(&order(b)))
            .then_with(|| a.cmp(b))
    });
    table
}

/// Configuration for [`top_ngrams`].
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// How many vocabulary entries (by frequency) to consider.
    pub top_n: usize,
    /// Minimum frequency for an entry to appear in a bucket.
    pub min_freq: u64,
    /// Which phrase orders (component counts) to report.
    pub orders: Vec<usize>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 1000,
            min_freq: 2,
            orders: vec![1, 2, 3],
        }
    }
}

/// Bucket the most frequent vocabulary entries by phrase order.
///
/// Takes the `top_n` entries by frequency (ties broken lexicographically for
/// determinism), keeps those at or above `min_freq` whose order is in
/// `orders`, and groups them by order. Within a bucket, entries are sorted
/// by joined length ascending, then lexicographically.
///
/// Unlike [`phrase_table`], this reads the full unigram vocabulary, so
/// order-1 buckets report plain tokens alongside the compounds absorbed in
/// earlier rounds.
pub fn top_ngrams(
    vocab: &Vocabulary,
    config: &ReportConfig,
) -> FxHashMap<usize, Vec<(Token, u64)>> {
    let mut ranked: Vec<(&str, u64)> = vocab
        .unigrams
        .iter()
        .map(|(token, &freq)| (token.as_str(), freq))
        .collect();
    ranked.sort_unstable_by(|(a, fa), (b, fb)| fb.cmp(fa).then_with(|| a.cmp(b)));
    ranked.truncate(config.top_n);

    let mut buckets: FxHashMap<usize, Vec<(Token, u64)>> = FxHashMap::default();
    for (token, freq) in ranked {
        if freq < config.min_freq {
            continue;
        }
        let token_order = order(token);
        if config.orders.contains(&token_order) {
            buckets
                .entry(token_order)
                .or_default()
                .push((token.to_string(), freq));
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_unstable_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    }
    buckets
}

/// Count how many corpus tokens are compounds (contain the separator).
///
/// Useful as a cheap progress measure between rounds.
pub fn compound_token_count(corpus: &[Vec<Token>]) -> usize {
    corpus
        .iter()
        .flatten()
        .filter(|token| token.contains(SEPARATOR))
        .count()
}

//! NPMI association scoring.
//!
//! For a candidate pair (a, b) with probabilities `pa`, `pb`, `pab` over a
//! shared total N:
//!
//! ```text
//! pmi  = ln(pab / (pa * pb))
//! npmi = pmi / -ln(pab)
//! ```
//!
//! NPMI is bounded in `[-1, 1]`; independent pairs score near zero, perfect
//! collocations approach one. A pair with zero co-occurrence is rejected
//! before any arithmetic — the logs are never evaluated on zero.

use crate::types::ExtractorConfig;
use crate::vocab::Vocabulary;

/// Outcome of scoring one candidate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Pair passed the count gate and scored above the threshold.
    Accept {
        /// The NPMI score, in `[-1, 1]`.
        score: f64,
    },
    /// Pair failed the gate or scored at/below the threshold.
    Reject,
}

impl Decision {
    /// True for [`Decision::Accept`].
    pub fn is_accept(&self) -> bool {
        matches!(self, Decision::Accept { .. })
    }
}

/// Stateless scorer over one round's [`Vocabulary`].
///
/// Holds only borrowed counts and the configuration; every evaluation is a
/// pure function of its inputs.
#[derive(Debug)]
pub struct PairScorer<'a> {
    vocab: &'a Vocabulary,
    config: &'a ExtractorConfig,
}

impl<'a> PairScorer<'a> {
    pub fn new(vocab: &'a Vocabulary, config: &'a ExtractorConfig) -> Self {
        Self { vocab, config }
    }

    /// Score the pair (a, b) with the given co-occurrence count.
    ///
    /// Gate, applied before any arithmetic:
    /// - `pair_count >= min_count`;
    /// - each endpoint's unigram count `>= min_count`, except that when
    ///   exactly one endpoint is a connector word that endpoint is exempt —
    ///   common link words must not block an otherwise strong association.
    ///
    /// A pair with `pair_count == 0` is always rejected without touching the
    /// logs, as is anything scored against an empty vocabulary.
    pub fn evaluate(&self, a: &str, b: &str, pair_count: u64) -> Decision {
        if pair_count == 0 || self.vocab.total_tokens == 0 {
            return Decision::Reject;
        }
        if pair_count < self.config.min_count {
            return Decision::Reject;
        }

        let a_connector = self.config.is_connector(a);
        let b_connector = self.config.is_connector(b);
        // The exemption applies only when exactly one side is a connector.
        let exempt_a = a_connector && !b_connector;
        let exempt_b = b_connector && !a_connector;

        let count_a = self.vocab.unigram_count(a);
        let count_b = self.vocab.unigram_count(b);
        if !exempt_a && count_a < self.config.min_count {
            return Decision::Reject;
        }
        if !exempt_b && count_b < self.config.min_count {
            return Decision::Reject;
        }

        let score = npmi(count_a, count_b, pair_count, self.vocab.total_tokens);
        if score > self.config.threshold {
            Decision::Accept { score }
        } else {
            Decision::Reject
        }
    }
}

/// Normalized pointwise mutual information.
///
/// Callers must guarantee `pair_count > 0` and `total > 0`; the gate in
/// [`PairScorer::evaluate`] enforces this.
fn npmi(count_a: u64, count_b: u64, pair_count: u64, total: u64) -> f64 {
    let n = total as f64;
    let pa = count_a as f64 / n;
    let pb = count_b as f64 / n;
    let pab = pair_count as f64 / n;
    let pmi = (pab / (pa * pb)).ln();
    pmi / -pab.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtractorConfig;
    use crate::vocab::Vocabulary;

    fn doc(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn clinic_corpus() -> Vec<Vec<String>> {
        vec![
            doc(&["walk", "in", "clinic"]),
            doc(&["walk", "in", "clinic"]),
            doc(&["sit", "down", "restaurant"]),
        ]
    }

    #[test]
    fn test_strong_pair_accepted() {
        let vocab = Vocabulary::count(&clinic_corpus());
        let config = ExtractorConfig::new().with_min_count(1).build().unwrap();
        let scorer = PairScorer::new(&vocab, &config);

        let decision = scorer.evaluate("walk", "in", vocab.pair_count("walk", "in"));
        match decision {
            Decision::Accept { score } => {
                assert!(score > 0.0);
                assert!(score <= 1.0);
            }
            Decision::Reject => panic!("walk/in should be accepted"),
        }
    }

    #[test]
    fn test_zero_cooccurrence_rejected_without_arithmetic() {
        let vocab = Vocabulary::count(&clinic_corpus());
        let config = ExtractorConfig::new().with_min_count(1).build().unwrap();
        let scorer = PairScorer::new(&vocab, &config);

        // Both tokens exist, never adjacent. Must short-circuit cleanly.
        assert_eq!(scorer.evaluate("clinic", "walk", 0), Decision::Reject);
    }

    #[test]
    fn test_empty_vocabulary_rejects() {
        let vocab = Vocabulary::default();
        let config = ExtractorConfig::new().with_min_count(1).build().unwrap();
        let scorer = PairScorer::new(&vocab, &config);
        assert_eq!(scorer.evaluate("a", "b", 5), Decision::Reject);
    }

    #[test]
    fn test_min_count_gates_pair_frequency() {
        let vocab = Vocabulary::count(&clinic_corpus());
        let config = ExtractorConfig::new().with_min_count(3).build().unwrap();
        let scorer = PairScorer::new(&vocab, &config);

        // pair count 2 < min_count 3
        assert_eq!(
            scorer.evaluate("walk", "in", vocab.pair_count("walk", "in")),
            Decision::Reject
        );
    }

    #[test]
    fn test_min_count_gates_endpoint_frequency() {
        let mut vocab = Vocabulary::default();
        vocab.unigrams.insert("rare".into(), 2);
        vocab.unigrams.insert("word".into(), 50);
        vocab.pairs.insert(("rare".into(), "word".into()), 3);
        vocab.total_tokens = 100;

        let config = ExtractorConfig::new().with_min_count(3).build().unwrap();
        let scorer = PairScorer::new(&vocab, &config);
        // Pair count clears the bar but "rare" (2 < 3) does not.
        assert_eq!(scorer.evaluate("rare", "word", 3), Decision::Reject);
    }

    #[test]
    fn test_connector_endpoint_exempt_from_unigram_gate() {
        // "in" is a connector: its own frequency must not block the pair.
        // Build counts by hand so the connector is rarer than min_count
        // while the pair clears it.
        let mut vocab = Vocabulary::default();
        vocab.unigrams.insert("walk".into(), 10);
        vocab.unigrams.insert("in".into(), 2);
        vocab.unigrams.insert("clinic".into(), 30);
        vocab
            .pairs
            .insert(("walk".into(), "in".into()), 2);
        vocab.total_tokens = 42;

        let strict = ExtractorConfig::new().with_min_count(2).build().unwrap();
        let relaxed = ExtractorConfig::new()
            .with_min_count(3)
            .with_connector_words(&["in"])
            .build()
            .unwrap();

        // Without the connector set and min_count 2 everything clears.
        assert!(PairScorer::new(&vocab, &strict)
            .evaluate("walk", "in", 2)
            .is_accept());

        // min_count 3: the pair count itself (2) fails regardless.
        assert_eq!(
            PairScorer::new(&vocab, &relaxed).evaluate("walk", "in", 2),
            Decision::Reject
        );

        // Pair count 3 with connector "in" at unigram count 2 < 3: exempt,
        // so only "walk" (10 >= 3) is gated, and the pair is scored.
        vocab
            .pairs
            .insert(("walk".into(), "in".into()), 3);
        let decision = PairScorer::new(&vocab, &relaxed).evaluate("walk", "in", 3);
        assert!(decision.is_accept());
    }

    #[test]
    fn test_both_connectors_no_exemption() {
        let mut vocab = Vocabulary::default();
        vocab.unigrams.insert("of".into(), 2);
        vocab.unigrams.insert("the".into(), 2);
        vocab.pairs.insert(("of".into(), "the".into()), 2);
        vocab.total_tokens = 100;

        let config = ExtractorConfig::new()
            .with_min_count(2)
            .with_connector_words(&["of", "the"])
            .build()
            .unwrap();
        let scorer = PairScorer::new(&vocab, &config);

        // Exactly-one rule: with both endpoints connectors neither is
        // exempt, and both clear min_count here, so the gate passes and the
        // score decides.
        let decision = scorer.evaluate("of", "the", 2);
        assert!(decision.is_accept());

        // Drop one endpoint below the bar: rejected, no exemption applies.
        vocab.unigrams.insert("of".into(), 1);
        let scorer = PairScorer::new(&vocab, &config);
        assert_eq!(scorer.evaluate("of", "the", 2), Decision::Reject);
    }

    #[test]
    fn test_independent_pair_scores_near_zero() {
        // a and b each make up half the corpus and co-occur at chance.
        let mut vocab = Vocabulary::default();
        vocab.unigrams.insert("a".into(), 500);
        vocab.unigrams.insert("b".into(), 500);
        vocab.pairs.insert(("a".into(), "b".into()), 250);
        vocab.total_tokens = 1000;

        let config = ExtractorConfig::new().with_min_count(1).build().unwrap();
        let scorer = PairScorer::new(&vocab, &config);
        // pab = pa * pb exactly => pmi = 0 => npmi = 0, not above threshold.
        assert_eq!(scorer.evaluate("a", "b", 250), Decision::Reject);
    }

    #[test]
    fn test_high_threshold_rejects() {
        let vocab = Vocabulary::count(&clinic_corpus());
        let config = ExtractorConfig::new()
            .with_min_count(1)
            .with_threshold(2.0)
            .build()
            .unwrap();
        let scorer = PairScorer::new(&vocab, &config);
        // npmi is bounded by 1, so nothing can clear a threshold of 2.
        assert_eq!(
            scorer.evaluate("walk", "in", vocab.pair_count("walk", "in")),
            Decision::Reject
        );
    }
}

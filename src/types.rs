//! Core corpus types and engine configuration.
//!
//! A corpus is an ordered sequence of documents; a document is an ordered
//! sequence of string tokens, case-normalized upstream. The engine reserves
//! one joining character ([`SEPARATOR`]) to build compound tokens — raw
//! tokens must not contain it.

use rustc_hash::FxHashSet;
use thiserror::Error;

/// Character used to join the components of a merged phrase.
///
/// Ingestion must guarantee no raw token contains it; a token containing the
/// separator is by definition a compound produced by the engine.
pub const SEPARATOR: char = '_';

/// A single token. Opaque to the engine apart from the separator reservation.
pub type Token = String;

/// An ordered sequence of tokens. May be empty.
pub type Document = Vec<Token>;

/// An ordered sequence of documents. Document order is stable across rounds:
/// document `i` after merging corresponds to document `i` before.
pub type Corpus = Vec<Document>;

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum MweError {
    /// Configuration rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Underlying I/O failure while reading or writing corpus files.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A record or spec could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for one extraction run.
///
/// Built with the `with_*` setters and sealed by [`ExtractorConfig::build`],
/// which validates the numeric parameters. The sets are immutable once the
/// engine is constructed; there is no process-wide shared state.
///
/// ```
/// use mwe_miner::types::ExtractorConfig;
///
/// let config = ExtractorConfig::new()
///     .with_min_count(5)
///     .with_connector_words(&["of", "the", "in"])
///     .build()
///     .unwrap();
/// assert_eq!(config.min_count, 5);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Minimum frequency a pair (and its non-connector endpoints) must reach
    /// to be considered for acceptance.
    pub min_count: u64,
    /// NPMI acceptance threshold. A pair is accepted when its score is
    /// strictly above this. `0.0` accepts any positive association.
    pub threshold: f64,
    /// Tokens permitted as unscored interior links of longer phrases. A
    /// connector endpoint is exempt from the unigram minimum-count gate when
    /// the other endpoint is a content word.
    pub connector_words: FxHashSet<Token>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_count: 10,
            threshold: 0.0,
            connector_words: FxHashSet::default(),
        }
    }
}

impl ExtractorConfig {
    /// Start from the defaults: `min_count = 10`, `threshold = 0.0`, no
    /// connector words.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum pair count.
    pub fn with_min_count(mut self, min_count: u64) -> Self {
        self.min_count = min_count;
        self
    }

    /// Set the NPMI acceptance threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the connector-word set.
    pub fn with_connector_words(mut self, words: &[&str]) -> Self {
        self.connector_words = words.iter().map(|w| w.to_string()).collect();
        self
    }

    /// Validate and seal the configuration.
    ///
    /// Rejects `min_count == 0` (every pair would pass the gate, including
    /// hapax noise) and non-finite thresholds. The engine never runs with an
    /// invalid configuration.
    pub fn build(self) -> Result<Self, MweError> {
        if self.min_count == 0 {
            return Err(MweError::InvalidConfig(
                "min_count must be at least 1".into(),
            ));
        }
        if !self.threshold.is_finite() {
            return Err(MweError::InvalidConfig(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        Ok(self)
    }

    /// Check whether a token is a configured connector word.
    pub fn is_connector(&self, token: &str) -> bool {
        self.connector_words.contains(token)
    }
}

/// Split a compound token into its components.
///
/// A pass-through unigram yields a single component; a true merge yields two
/// or more.
pub fn components(compound: &str) -> Vec<&str> {
    compound.split(SEPARATOR).collect()
}

/// Number of original tokens a compound spans (component count).
pub fn order(compound: &str) -> usize {
    compound.matches(SEPARATOR).count() + 1
}

/// Join two tokens into a compound.
pub fn join(a: &str, b: &str) -> Token {
    let mut out = String::with_capacity(a.len() + b.len() + 1);
    out.push_str(a);
    out.push(SEPARATOR);
    out.push_str(b);
    out
}

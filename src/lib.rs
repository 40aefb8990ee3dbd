//! Multi-word expression detection and merging for tokenized corpora.
//!
//! `mwe-miner` finds statistically significant adjacent token sequences
//! ("walk in", "all you can eat") in a corpus and rewrites the corpus so
//! they become single compound tokens, joined by `_`. Candidate pairs are
//! scored with normalized pointwise mutual information (NPMI); accepted
//! pairs are merged greedily left to right, and repeated rounds discover
//! progressively longer expressions.
//!
//! # Quick start
//!
//! ```
//! use mwe_miner::pipeline::{Extractor, Stage};
//! use mwe_miner::types::ExtractorConfig;
//!
//! let doc = || vec!["walk".to_string(), "in".to_string(), "clinic".to_string()];
//! let corpus = vec![doc(), doc()];
//!
//! let config = ExtractorConfig::new().with_min_count(2).build().unwrap();
//! let mut extractor = Extractor::new(corpus, config);
//! extractor.run(&[Stage::Extract, Stage::Merge]);
//!
//! assert_eq!(extractor.corpus()[0][0], "walk_in");
//! ```
//!
//! # Pipeline
//!
//! A run is an ordered list of [`pipeline::Stage`]s over shared engine
//! state; the reference pipeline is
//! `[Extract, Merge, Extract, Export, Filter, RemoveFiltered]`, which finds
//! phrases of up to 3–4 original tokens. Runs can be described in JSON
//! ([`pipeline::ExtractorSpec`]) and are validated before execution.
//!
//! The engine is batch-oriented and single-threaded: the whole corpus and
//! vocabulary stay resident for the duration of a run, and counts are
//! rebuilt from scratch every round.

pub mod corpus;
pub mod phrase;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod types;
pub mod vocab;

pub use phrase::{BoundaryFilter, PhraseVocabulary};
pub use pipeline::{Extractor, ExtractorSpec, Stage};
pub use types::{Corpus, Document, ExtractorConfig, MweError, Token, SEPARATOR};
pub use vocab::Vocabulary;

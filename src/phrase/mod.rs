//! Phrase vocabulary, boundary filtering, and merging.
//!
//! [`table::PhraseVocabulary`] holds the pairs a round accepted;
//! [`filter::BoundaryFilter`] removes phrases with weak boundary terms;
//! [`merger`] rewrites documents so accepted pairs become single compound
//! tokens.

pub mod filter;
pub mod merger;
pub mod table;

pub use filter::BoundaryFilter;
pub use merger::{merge_corpus, merge_document};
pub use table::{PhraseVocabulary, Removal};

//! Corpus rewriting.
//!
//! A single greedy left-to-right pass per document: when the current and
//! next token form an accepted pair, emit the joined compound and advance
//! two positions; otherwise emit the current token and advance one. A token
//! consumed as the right half of a merge can never start another merge in
//! the same pass, so merges are non-overlapping and the pass is O(len).
//!
//! Longer phrases come from repeated rounds: a compound produced here is an
//! atomic token in the next round's count, where it can pair with its
//! neighbors again.

use crate::phrase::table::PhraseVocabulary;
use crate::types::{join, Corpus, Document};

/// Rewrite one document against the accepted-pair set.
pub fn merge_document(doc: &Document, phrases: &PhraseVocabulary) -> Document {
    let mut out = Document::with_capacity(doc.len());
    let mut i = 0;
    while i < doc.len() {
        if i + 1 < doc.len() {
            // The candidate compound doubles as the lookup key and, on a
            // hit, the emitted token.
            let joined = join(&doc[i], &doc[i + 1]);
            if phrases.contains(&joined) {
                out.push(joined);
                i += 2;
                continue;
            }
        }
        out.push(doc[i].clone());
        i += 1;
    }
    out
}

/// Rewrite every document, preserving corpus order.
pub fn merge_corpus(corpus: &Corpus, phrases: &PhraseVocabulary) -> Corpus {
    corpus
        .iter()
        .map(|doc| merge_document(doc, phrases))
        .collect()
}

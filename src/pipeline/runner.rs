//! Round controller — executes stages over shared engine state.
//!
//! The [`Extractor`] exclusively owns all mutable state for one run: the
//! current corpus, the current round's vocabulary and phrase vocabulary, the
//! exported phrase table, and the blacklist. [`Extractor::run`] executes an
//! ordered [`Stage`] list, threading that state between stages.
//!
//! Repeating `Extract` + `Merge` grows phrases: a compound produced in round
//! k is an atomic token in round k+1, where it can pair with its neighbors.
//! There is no hard limit on rounds — the vocabulary simply shrinks as
//! content is absorbed into compounds.

use tracing::debug_span;

use crate::phrase::filter::BoundaryFilter;
use crate::phrase::merger::merge_corpus;
use crate::phrase::table::{PhraseVocabulary, Removal};
use crate::pipeline::spec::{ExtractorSpec, Stage};
use crate::pipeline::validation::ValidationEngine;
use crate::report::{phrase_table, top_ngrams, ReportConfig};
use crate::types::{Corpus, ExtractorConfig, MweError, Token};
use crate::vocab::Vocabulary;

/// The extraction engine: corpus plus per-run state.
#[derive(Debug)]
pub struct Extractor {
    config: ExtractorConfig,
    filter: BoundaryFilter,
    corpus: Corpus,
    vocabulary: Option<Vocabulary>,
    phrases: PhraseVocabulary,
    table: Vec<(Token, u64)>,
    blacklist: Vec<Token>,
}

impl Extractor {
    /// Build an engine over a corpus with the given configuration and no
    /// boundary filtering.
    pub fn new(corpus: Corpus, config: ExtractorConfig) -> Self {
        Self {
            config,
            filter: BoundaryFilter::empty(),
            corpus,
            vocabulary: None,
            phrases: PhraseVocabulary::default(),
            table: Vec::new(),
            blacklist: Vec::new(),
        }
    }

    /// Replace the boundary filter.
    pub fn with_filter(mut self, filter: BoundaryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Build an engine from a deserialized run spec.
    ///
    /// The spec is validated first; any error-severity diagnostic rejects
    /// construction, so the engine never runs with an invalid configuration.
    pub fn from_spec(corpus: Corpus, spec: &ExtractorSpec) -> Result<Self, MweError> {
        let report = ValidationEngine::with_defaults().validate(spec);
        if report.has_errors() {
            let messages: Vec<String> = report
                .errors()
                .map(|d| format!("{}: {}", d.path, d.message))
                .collect();
            return Err(MweError::InvalidConfig(messages.join("; ")));
        }
        for diagnostic in report.warnings() {
            tracing::warn!(
                path = %diagnostic.path,
                message = %diagnostic.message,
                "spec validation warning"
            );
        }

        let connector_refs: Vec<&str> =
            spec.params.connector_words.iter().map(String::as_str).collect();
        let config = ExtractorConfig::new()
            .with_min_count(spec.params.min_count)
            .with_threshold(spec.params.threshold)
            .with_connector_words(&connector_refs)
            .build()?;

        let stopword_refs: Vec<&str> =
            spec.params.stopwords.iter().map(String::as_str).collect();
        let whitelist_refs: Vec<&str> =
            spec.params.whitelist.iter().map(String::as_str).collect();
        let filter = BoundaryFilter::from_list(&stopword_refs).with_whitelist(&whitelist_refs);

        Ok(Self::new(corpus, config).with_filter(filter))
    }

    /// Execute the stages in order.
    pub fn run(&mut self, stages: &[Stage]) {
        for &stage in stages {
            let span = debug_span!("stage", name = stage.as_str());
            let _guard = span.enter();
            self.run_stage(stage);
        }
    }

    /// Validate-and-run convenience over [`ExtractorSpec::stages`].
    pub fn run_spec(corpus: Corpus, spec: &ExtractorSpec) -> Result<Self, MweError> {
        let mut extractor = Self::from_spec(corpus, spec)?;
        extractor.run(&spec.stages);
        Ok(extractor)
    }

    fn run_stage(&mut self, stage: Stage) {
        match stage {
            Stage::Extract => self.extract(),
            Stage::Merge => self.merge(),
            Stage::Export => self.export(),
            Stage::Filter => self.filter_phrases(),
            Stage::RemoveFiltered => self.remove_filtered(),
        }
    }

    /// Count the current corpus and score every observed pair.
    ///
    /// Counts are rebuilt from scratch: no accumulation across rounds.
    fn extract(&mut self) {
        let vocabulary = Vocabulary::count(&self.corpus);
        self.phrases = PhraseVocabulary::build(&vocabulary, &self.config);
        tracing::debug!(
            tokens = vocabulary.total_tokens,
            distinct = vocabulary.len(),
            accepted = self.phrases.len(),
            "extracted phrase vocabulary"
        );
        self.vocabulary = Some(vocabulary);
    }

    /// Rewrite the corpus against the current accepted-pair set.
    ///
    /// With no preceding extract this is the identity transform.
    fn merge(&mut self) {
        self.corpus = merge_corpus(&self.corpus, &self.phrases);
    }

    /// Recompute the frequency-sorted phrase table.
    ///
    /// Exporting before any extraction yields an empty table, not an error.
    fn export(&mut self) {
        self.table = phrase_table(&self.phrases);
    }

    /// Identify phrases with weak boundary terms.
    fn filter_phrases(&mut self) {
        self.blacklist = self.filter.blacklist(&self.phrases);
        tracing::debug!(blacklisted = self.blacklist.len(), "boundary filter pass");
    }

    /// Remove blacklisted phrases from the vocabulary, then refresh the
    /// exported table so filtering is reflected in the same round. Stale
    /// blacklist entries are no-ops.
    fn remove_filtered(&mut self) {
        for compound in &self.blacklist {
            if self.phrases.remove(compound) == Removal::Absent {
                tracing::debug!(phrase = %compound, "blacklisted phrase already absent");
            }
        }
        if !self.table.is_empty() {
            self.table = phrase_table(&self.phrases);
        }
    }

    /// The corpus in its current (possibly merged) form.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Consume the engine, yielding the merged corpus.
    pub fn into_corpus(self) -> Corpus {
        self.corpus
    }

    /// The most recent round's counts, if an extract stage has run.
    pub fn vocabulary(&self) -> Option<&Vocabulary> {
        self.vocabulary.as_ref()
    }

    /// The current phrase vocabulary.
    pub fn phrases(&self) -> &PhraseVocabulary {
        &self.phrases
    }

    /// The exported phrase table (empty until an export stage runs).
    pub fn table(&self) -> &[(Token, u64)] {
        &self.table
    }

    /// Phrases flagged by the last filter stage.
    pub fn blacklist(&self) -> &[Token] {
        &self.blacklist
    }

    /// Bucket the most frequent vocabulary entries by phrase order.
    ///
    /// Empty before the first extract stage.
    pub fn top_ngrams(
        &self,
        report: &ReportConfig,
    ) -> rustc_hash::FxHashMap<usize, Vec<(Token, u64)>> {
        match &self.vocabulary {
            Some(vocabulary) => top_ngrams(vocabulary, report),
            None => rustc_hash::FxHashMap::default(),
        }
    }
}

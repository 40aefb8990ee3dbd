//! Run specification types.
//!
//! An [`ExtractorSpec`] names the stages to execute, in order, plus the
//! engine parameters. These types are the input to the
//! [`super::validation::ValidationEngine`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "stages": ["extract", "merge", "extract", "export", "filter", "remove_filtered"],
//!   "params": { "min_count": 10, "threshold": 0.0, "connector_words": ["of"] },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One step of the extraction pipeline.
///
/// Every stage is a total function over the engine state: running it when
/// its preconditions are unmet yields empty output or a no-op, never an
/// error. Illegal *combinations* (e.g. `remove_filtered` with no `filter`)
/// are caught at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Count the current corpus and score pairs into a phrase vocabulary.
    Extract,
    /// Rewrite the corpus, collapsing accepted pairs into compounds.
    Merge,
    /// Recompute the frequency-sorted phrase table.
    Export,
    /// Blacklist phrases with weak boundary terms.
    Filter,
    /// Remove blacklisted phrases from the vocabulary and the table.
    RemoveFiltered,
}

impl Stage {
    /// The user-facing name used in JSON and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::Merge => "merge",
            Self::Export => "export",
            Self::Filter => "filter",
            Self::RemoveFiltered => "remove_filtered",
        }
    }
}

/// Engine parameters carried by a spec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Minimum pair count (default 10).
    #[serde(default = "default_min_count")]
    pub min_count: u64,

    /// NPMI acceptance threshold (default 0).
    #[serde(default)]
    pub threshold: f64,

    /// Connector words permitted as unscored interior links.
    #[serde(default)]
    pub connector_words: Vec<String>,

    /// Boundary stopwords for the filter stage.
    #[serde(default)]
    pub stopwords: Vec<String>,

    /// Compounds exempt from boundary filtering.
    #[serde(default)]
    pub whitelist: Vec<String>,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_min_count() -> u64 {
    10
}

impl Default for ParamSpec {
    fn default() -> Self {
        Self {
            min_count: default_min_count(),
            threshold: 0.0,
            connector_words: Vec::new(),
            stopwords: Vec::new(),
            whitelist: Vec::new(),
            unknown_fields: HashMap::new(),
        }
    }
}

/// Top-level run specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorSpec {
    /// Spec version (currently `1`).
    pub v: u32,

    /// Ordered stage list. Empty means "do nothing" (warned about).
    #[serde(default)]
    pub stages: Vec<Stage>,

    /// Engine parameters.
    #[serde(default)]
    pub params: ParamSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    /// Used by the strict-mode validation rule.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for ExtractorSpec {
    fn default() -> Self {
        Self {
            v: 1,
            stages: Self::reference_stages(),
            params: ParamSpec::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl ExtractorSpec {
    /// The reference two-round pipeline: extract and merge, extract again on
    /// the merged corpus (finding phrases of up to 3–4 original tokens),
    /// then export, filter, and remove.
    pub fn reference_stages() -> Vec<Stage> {
        vec![
            Stage::Extract,
            Stage::Merge,
            Stage::Extract,
            Stage::Export,
            Stage::Filter,
            Stage::RemoveFiltered,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_spec() {
        let json = r#"{ "v": 1 }"#;
        let spec: ExtractorSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.v, 1);
        assert!(spec.stages.is_empty());
        assert_eq!(spec.params.min_count, 10);
        assert!(!spec.strict);
    }

    #[test]
    fn test_deserialize_full_spec() {
        let json = r#"{
            "v": 1,
            "stages": ["extract", "merge", "extract", "export", "filter", "remove_filtered"],
            "params": {
                "min_count": 5,
                "threshold": 0.1,
                "connector_words": ["of", "the"],
                "stopwords": ["and", "&"],
                "whitelist": ["walk_in"]
            },
            "strict": true
        }"#;
        let spec: ExtractorSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.stages, ExtractorSpec::reference_stages());
        assert_eq!(spec.params.min_count, 5);
        assert_eq!(spec.params.threshold, 0.1);
        assert_eq!(spec.params.connector_words, vec!["of", "the"]);
        assert!(spec.strict);
    }

    #[test]
    fn test_unknown_fields_captured() {
        let json = r#"{
            "v": 1,
            "bogus_top_level": 42,
            "params": { "min_count": 3, "bogus_param": "xyz" }
        }"#;
        let spec: ExtractorSpec = serde_json::from_str(json).unwrap();
        assert!(spec.unknown_fields.contains_key("bogus_top_level"));
        assert!(spec.params.unknown_fields.contains_key("bogus_param"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = r#"{"v":1,"stages":["extract","remove_filtered"]}"#;
        let spec: ExtractorSpec = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&spec).unwrap();
        assert_eq!(back["stages"][0], "extract");
        assert_eq!(back["stages"][1], "remove_filtered");
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::Extract.as_str(), "extract");
        assert_eq!(Stage::RemoveFiltered.as_str(), "remove_filtered");
    }
}

//! Validation engine for run specifications.
//!
//! The engine runs all registered [`ValidationRule`]s against an
//! [`ExtractorSpec`](super::spec::ExtractorSpec) and collects every
//! diagnostic into a [`ValidationReport`] — it never short-circuits on the
//! first error, so users see all problems at once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use mwe_miner::pipeline::validation::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&spec);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use serde::Serialize;

use super::spec::{ExtractorSpec, Stage};

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding: a JSON-pointer-ish path into the spec, a
/// message, and an optional hint.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ValidationDiagnostic {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Total number of diagnostics (errors + warnings).
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if there are no diagnostics at all.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects an [`ExtractorSpec`] and returns
/// zero or more diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so they can be shared
/// across threads (e.g., in a long-lived validation engine).
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"stage_order"`).
    fn name(&self) -> &str;

    /// Inspect `spec` and return any findings.
    fn validate(&self, spec: &ExtractorSpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against an [`ExtractorSpec`] and
/// collects all diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(SpecVersionRule));
        engine.add_rule(Box::new(ParamBoundsRule));
        engine.add_rule(Box::new(RemoveRequiresFilterRule));
        engine.add_rule(Box::new(StageOrderRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Run all rules against `spec` and return the collected report.
    pub fn validate(&self, spec: &ExtractorSpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 0. Spec version must be supported ──────────────────────────────────────

/// The only spec version this engine understands.
const SUPPORTED_VERSION: u32 = 1;

struct SpecVersionRule;

impl ValidationRule for SpecVersionRule {
    fn name(&self) -> &str {
        "spec_version"
    }

    fn validate(&self, spec: &ExtractorSpec) -> Vec<ValidationDiagnostic> {
        if spec.v != SUPPORTED_VERSION {
            vec![ValidationDiagnostic::error(
                "/v",
                format!(
                    "unsupported spec version {} (expected {SUPPORTED_VERSION})",
                    spec.v
                ),
            )
            .with_hint("Set \"v\": 1")]
        } else {
            vec![]
        }
    }
}

// ─── 1. Numeric parameters must be sane ─────────────────────────────────────

struct ParamBoundsRule;

impl ValidationRule for ParamBoundsRule {
    fn name(&self) -> &str {
        "param_bounds"
    }

    fn validate(&self, spec: &ExtractorSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if spec.params.min_count == 0 {
            out.push(
                ValidationDiagnostic::error(
                    "/params/min_count",
                    "min_count must be at least 1",
                )
                .with_hint("With min_count 0 every observed pair passes the count gate"),
            );
        }

        if !spec.params.threshold.is_finite() {
            out.push(ValidationDiagnostic::error(
                "/params/threshold",
                format!("threshold must be finite, got {}", spec.params.threshold),
            ));
        } else if spec.params.threshold >= 1.0 {
            out.push(
                ValidationDiagnostic::warning(
                    "/params/threshold",
                    "threshold >= 1 accepts nothing (npmi is bounded by 1)",
                )
                .with_hint("Use a threshold in [-1, 1), typically 0"),
            );
        }

        out
    }
}

// ─── 2. remove_filtered requires a preceding filter ─────────────────────────

struct RemoveRequiresFilterRule;

impl ValidationRule for RemoveRequiresFilterRule {
    fn name(&self) -> &str {
        "remove_requires_filter"
    }

    fn validate(&self, spec: &ExtractorSpec) -> Vec<ValidationDiagnostic> {
        let mut filter_seen = false;
        for (i, stage) in spec.stages.iter().enumerate() {
            match stage {
                Stage::Filter => filter_seen = true,
                Stage::RemoveFiltered if !filter_seen => {
                    return vec![ValidationDiagnostic::error(
                        format!("/stages/{i}"),
                        "remove_filtered requires a filter stage earlier in the list",
                    )
                    .with_hint("Insert \"filter\" before \"remove_filtered\"")];
                }
                _ => {}
            }
        }
        vec![]
    }
}

// ─── 3. Stage-order advisories ──────────────────────────────────────────────

struct StageOrderRule;

impl ValidationRule for StageOrderRule {
    fn name(&self) -> &str {
        "stage_order"
    }

    fn validate(&self, spec: &ExtractorSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if spec.stages.is_empty() {
            out.push(
                ValidationDiagnostic::warning("/stages", "stage list is empty; nothing will run")
                    .with_hint("Use the reference list: extract, merge, extract, export, filter, remove_filtered"),
            );
            return out;
        }

        // Stages before the first extract operate on an empty model. Legal
        // (they no-op or yield empty output) but almost certainly a mistake.
        let first_extract = spec.stages.iter().position(|s| *s == Stage::Extract);
        for (i, stage) in spec.stages.iter().enumerate() {
            let before_extract = first_extract.map_or(true, |e| i < e);
            if before_extract && matches!(stage, Stage::Merge | Stage::Export | Stage::Filter) {
                out.push(ValidationDiagnostic::warning(
                    format!("/stages/{i}"),
                    format!(
                        "{} before any extract stage operates on an empty vocabulary",
                        stage.as_str()
                    ),
                ));
            }
        }

        out
    }
}

// ─── 4. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    /// Collect unknown-field diagnostics at the given JSON pointer `path`
    /// from a `HashMap` of extra fields captured by `#[serde(flatten)]`.
    fn check_unknowns(
        path: &str,
        unknowns: &std::collections::HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        unknowns
            .keys()
            .map(|key| {
                let diag_fn: fn(String, String) -> ValidationDiagnostic = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    format!("{path}/{key}"),
                    format!("unrecognized field \"{key}\""),
                )
                .with_hint("Check spelling or remove this field")
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &ExtractorSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        out.extend(Self::check_unknowns("", &spec.unknown_fields, spec.strict));
        out.extend(Self::check_unknowns(
            "/params",
            &spec.params.unknown_fields,
            spec.strict,
        ));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

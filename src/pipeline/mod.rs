//! Pipeline: run specification, validation, and the round controller.
//!
//! A run is an ordered list of [`spec::Stage`]s executed by
//! [`runner::Extractor`] over shared engine state. Specs can be built in
//! code or deserialized from JSON and checked by the
//! [`validation::ValidationEngine`] before anything runs.

pub mod runner;
pub mod spec;
pub mod validation;

pub use runner::Extractor;
pub use spec::{ExtractorSpec, Stage};
pub use validation::{ValidationEngine, ValidationReport};

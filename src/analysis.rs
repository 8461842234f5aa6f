//! One-call analysis — optionally clarify, then generate and register.
//!
//! ```text
//! RelationTable ─→ Clarifier? ─→ ConceptStore ─→ Strategy::generate
//!                      │                               │
//!              ClarifierResult                   formal / semi / pre
//! ```
//!
//! With `clarify` set, concepts are computed over the clarified table; the
//! returned [`ClarifierResult`] maps them back to the original indices via
//! [`ClarifierResult::expand_extent`] and [`ClarifierResult::expand_intent`].

use crate::clarifier::{Clarifier, ClarifierConfig, ClarifierResult};
use crate::error::FcaResult;
use crate::generator::Strategy;
use crate::store::ConceptStore;
use crate::table::{validate_threshold, RelationTable};

/// Settings for [`Analysis::run`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisConfig {
    /// Generator to run.
    pub strategy: Strategy,
    /// Membership threshold; a cell holds when its value exceeds this.
    pub threshold: f64,
    /// Clarify the table before generating.
    pub clarify: bool,
    /// Clarifier settings, used only when `clarify` is set.
    pub clarifier: ClarifierConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::InClose,
            threshold: 0.0,
            clarify: false,
            clarifier: ClarifierConfig::default(),
        }
    }
}

/// Result of [`Analysis::run`].
#[derive(Clone, Debug)]
pub struct AnalysisOutcome {
    /// Store over the analysed table (clarified if requested).
    pub store: ConceptStore,
    /// Clarification details, present when `clarify` was set.
    pub clarification: Option<ClarifierResult>,
}

/// Entry point for the clarify → generate pipeline.
pub struct Analysis;

impl Analysis {
    /// Run the pipeline described by `config` over a copy of `table`.
    ///
    /// Every setting is validated before any work starts.
    pub fn run(table: &RelationTable, config: &AnalysisConfig) -> FcaResult<AnalysisOutcome> {
        validate_threshold(config.threshold)?;
        let clarifier = Clarifier::new(config.clarifier)?;

        let (working, clarification) = if config.clarify {
            let result = clarifier.clarify(table);
            (result.table.clone(), Some(result))
        } else {
            (table.clone(), None)
        };

        tracing::debug!(
            strategy = %config.strategy,
            clarified = config.clarify,
            objects = working.object_count(),
            attributes = working.attribute_count(),
            "analysis started"
        );

        let mut store = ConceptStore::new(working);
        store.generate(&config.strategy, config.threshold)?;
        Ok(AnalysisOutcome { store, clarification })
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

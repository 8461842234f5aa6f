//! Exhaustive generator — classify every subset of the object set.
//!
//! For each `A ⊆ G` the pair `(A, A′)` is classified. Since the intent is
//! `A′` by construction, every pair is either formal (when `A″ = A`) or semi.
//! Cost is `2^|G|` derivations; [`PowerSet`](crate::index_set::PowerSet)
//! refuses universes above
//! [`MAX_POWER_SET_UNIVERSE`](crate::index_set::MAX_POWER_SET_UNIVERSE).

use alloc::vec::Vec;

use super::{prepare, ConceptGenerator, Strategy};
use crate::concept::{Concept, ConceptKind, TOP_TAG};
use crate::error::FcaResult;
use crate::index_set::Extent;
use crate::table::RelationTable;

/// Power-set enumeration. Intended for small tables and cross-checking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Naive;

impl ConceptGenerator for Naive {
    fn strategy(&self) -> Strategy {
        Strategy::Naive
    }

    fn generate(&self, table: &RelationTable, threshold: f64) -> FcaResult<Vec<Concept>> {
        let derivation = prepare(table, threshold)?;
        let subsets = table.power_set_of_objects()?;
        tracing::debug!(subsets = subsets.subset_count(), "naive enumeration started");

        let object_count = table.object_count();
        let mut concepts = Vec::new();
        for subset in subsets {
            let extent = Extent::from_set(subset);
            let intent = derivation.attributes_of_unchecked(&extent);
            let closure = derivation.objects_of_unchecked(&intent);
            let kind = ConceptKind::from_images(&extent, &intent, &intent, &closure);

            let mut concept = Concept::new(extent, intent, kind);
            if kind == ConceptKind::Formal && concept.is_top(object_count) {
                concept = concept.with_tag(TOP_TAG);
            }
            tracing::trace!(concept = %concept, "classified subset");
            concepts.push(concept);
        }

        tracing::debug!(
            formal = concepts.iter().filter(|c| c.kind() == ConceptKind::Formal).count(),
            total = concepts.len(),
            "naive enumeration finished"
        );
        Ok(concepts)
    }
}

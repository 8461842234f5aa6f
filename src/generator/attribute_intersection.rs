//! Attribute-intersection generator.
//!
//! Extents of a context are closed under intersection, and every extent is
//! an intersection of attribute extents `{m}′` (the empty intersection being
//! `G` itself). Starting from the top `(G, G′)` and bottom `(M′, M)`, each
//! attribute's extent is intersected with every extent found so far,
//! including ones found earlier in the same pass; a new non-empty result `E`
//! becomes the formal concept `(E, E′)`.

use alloc::vec::Vec;

use hashbrown::HashSet;

use super::{prepare, ConceptGenerator, Strategy};
use crate::concept::{Concept, TOP_TAG};
use crate::error::FcaResult;
use crate::index_set::Extent;
use crate::table::RelationTable;

/// Closure of seed extents under intersection with attribute extents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttributeIntersection;

impl ConceptGenerator for AttributeIntersection {
    fn strategy(&self) -> Strategy {
        Strategy::AttributeIntersection
    }

    fn generate(&self, table: &RelationTable, threshold: f64) -> FcaResult<Vec<Concept>> {
        let derivation = prepare(table, threshold)?;
        let all_objects = Extent::from_set(table.all_objects());
        let all_attributes = table.all_attributes();

        let mut seen: HashSet<Extent> = HashSet::new();
        let mut concepts = Vec::new();

        let top_intent = derivation.attributes_of_unchecked(&all_objects);
        seen.insert(all_objects.clone());
        concepts.push(Concept::formal(all_objects, top_intent).with_tag(TOP_TAG));

        let bottom_extent = derivation.objects_of_unchecked(&all_attributes);
        if seen.insert(bottom_extent.clone()) {
            concepts.push(Concept::formal(bottom_extent, all_attributes.into()));
        }

        for attribute in 0..table.attribute_count() {
            let column = derivation.objects_with_unchecked(attribute);
            let mut index = 0;
            while index < concepts.len() {
                if let Some(extent) = concepts[index].extent().intersect(&column) {
                    if seen.insert(extent.clone()) {
                        let intent = derivation.attributes_of_unchecked(&extent);
                        tracing::trace!(attribute, extent = %extent, intent = %intent, "new extent");
                        concepts.push(Concept::formal(extent, intent));
                    }
                }
                index += 1;
            }
        }

        tracing::debug!(formal = concepts.len(), "attribute intersection finished");
        Ok(concepts)
    }
}

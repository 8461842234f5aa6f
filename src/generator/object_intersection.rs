//! Object-intersection generator, the dual of
//! [`AttributeIntersection`](super::AttributeIntersection).
//!
//! Intents are closed under intersection and every intent is an intersection
//! of object rows `{g}′` (the empty intersection being `M`). Starting from
//! the same top and bottom seeds, each object's row is intersected with every
//! intent found so far; a new non-empty result `I` becomes `(I′, I)`.

use alloc::vec::Vec;

use hashbrown::HashSet;

use super::{prepare, ConceptGenerator, Strategy};
use crate::concept::{Concept, TOP_TAG};
use crate::error::FcaResult;
use crate::index_set::{Extent, Intent};
use crate::table::RelationTable;

/// Closure of seed intents under intersection with object rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ObjectIntersection;

impl ConceptGenerator for ObjectIntersection {
    fn strategy(&self) -> Strategy {
        Strategy::ObjectIntersection
    }

    fn generate(&self, table: &RelationTable, threshold: f64) -> FcaResult<Vec<Concept>> {
        let derivation = prepare(table, threshold)?;
        let all_objects = Extent::from_set(table.all_objects());
        let all_attributes = Intent::from_set(table.all_attributes());

        let mut seen: HashSet<Intent> = HashSet::new();
        let mut concepts = Vec::new();

        let top_intent = derivation.attributes_of_unchecked(&all_objects);
        seen.insert(top_intent.clone());
        concepts.push(Concept::formal(all_objects, top_intent).with_tag(TOP_TAG));

        if seen.insert(all_attributes.clone()) {
            let bottom_extent = derivation.objects_of_unchecked(&all_attributes);
            concepts.push(Concept::formal(bottom_extent, all_attributes));
        }

        for object in 0..table.object_count() {
            let row = derivation.attributes_with_unchecked(object);
            let mut index = 0;
            while index < concepts.len() {
                if let Some(intent) = concepts[index].intent().intersect(&row) {
                    if seen.insert(intent.clone()) {
                        let extent = derivation.objects_of_unchecked(&intent);
                        tracing::trace!(object, extent = %extent, intent = %intent, "new intent");
                        concepts.push(Concept::formal(extent, intent));
                    }
                }
                index += 1;
            }
        }

        tracing::debug!(formal = concepts.len(), "object intersection finished");
        Ok(concepts)
    }
}

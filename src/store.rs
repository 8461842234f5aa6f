/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! The concept store — a relation table plus the concepts computed from it.
//!
//! [`ConceptStore`] owns a [`RelationTable`] and one concept partition per
//! stored [`ConceptKind`] (formal, semi, pre). Generators never touch the
//! partitions directly: they return concepts, and the store registers them
//! after the generator has finished, so a failed run registers nothing.
//!
//! # Invariants
//! - **One formal concept per extent** — a second formal concept with an
//!   already-registered extent is refused
//! - **Unknown is not stored** — only the three partitions exist
//! - **Frozen table** — the table is only reachable immutably; replacing it
//!   goes through [`ConceptStore::replace_table`], which clears every partition

use alloc::vec::Vec;

use hashbrown::HashSet;
use heapless::FnvIndexMap;

use crate::concept::{Concept, ConceptKind};
use crate::error::{FcaError, FcaResult};
use crate::generator::ConceptGenerator;
use crate::index_set::{Extent, Intent};
use crate::table::{validate_threshold, RelationTable};

/// Slots in the kind map; a power of two no smaller than `ConceptKind::STORED.len()`.
const KIND_SLOTS: usize = 4;

type Partitions = FnvIndexMap<ConceptKind, Vec<Concept>, KIND_SLOTS>;

/// A relation table and its kind-partitioned concepts.
#[derive(Clone, Debug)]
pub struct ConceptStore {
    table: RelationTable,
    partitions: Partitions,
    formal_extents: HashSet<Extent>,
}

impl ConceptStore {
    /// Take ownership of `table` with every partition empty.
    pub fn new(table: RelationTable) -> Self {
        Self {
            table,
            partitions: empty_partitions(),
            formal_extents: HashSet::new(),
        }
    }

    /// The owned table.
    pub fn table(&self) -> &RelationTable {
        &self.table
    }

    /// Give the table back, dropping every concept.
    pub fn into_table(self) -> RelationTable {
        self.table
    }

    /// Swap in a new table. All concepts computed so far are discarded.
    pub fn replace_table(&mut self, table: RelationTable) -> RelationTable {
        self.clear();
        core::mem::replace(&mut self.table, table)
    }

    /// Run `generator` over the owned table and register what it returns.
    ///
    /// Validation and generation complete before the first registration; on
    /// error the store is unchanged. Returns the number of concepts newly
    /// registered.
    pub fn generate(&mut self, generator: &dyn ConceptGenerator, threshold: f64) -> FcaResult<usize> {
        validate_threshold(threshold)?;
        if self.table.object_count() == 0 || self.table.attribute_count() == 0 {
            return Err(FcaError::invalid("relation table has no objects or no attributes"));
        }

        tracing::debug!(
            strategy = %generator.strategy(),
            objects = self.table.object_count(),
            attributes = self.table.attribute_count(),
            threshold,
            "generating concepts"
        );

        let concepts = generator.generate(&self.table, threshold)?;
        let produced = concepts.len();
        let mut registered = 0;
        for concept in concepts {
            if self.register(concept) {
                registered += 1;
            }
        }

        tracing::debug!(
            strategy = %generator.strategy(),
            produced,
            registered,
            formal = self.formal_concepts().len(),
            "concept generation complete"
        );
        Ok(registered)
    }

    /// Register one concept in its kind's partition.
    ///
    /// Returns `false` (and stores nothing) for [`ConceptKind::Unknown`] and
    /// for a formal concept whose extent is already registered.
    pub fn register(&mut self, concept: Concept) -> bool {
        let kind = concept.kind();
        if kind == ConceptKind::Formal && !self.formal_extents.insert(concept.extent().clone()) {
            tracing::trace!(extent = %concept.extent(), "formal extent already registered");
            return false;
        }
        match self.partitions.get_mut(&kind) {
            Some(partition) => {
                partition.push(concept);
                true
            }
            None => false,
        }
    }

    /// Concepts of one kind, in registration order. Empty for `Unknown`.
    pub fn concepts_of(&self, kind: ConceptKind) -> &[Concept] {
        self.partitions.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Shorthand for `concepts_of(ConceptKind::Formal)`.
    pub fn formal_concepts(&self) -> &[Concept] {
        self.concepts_of(ConceptKind::Formal)
    }

    /// Every stored concept, partition by partition.
    pub fn iter(&self) -> impl Iterator<Item = &Concept> + '_ {
        self.partitions.values().flat_map(|p| p.iter())
    }

    /// First concept of `kind` whose extent equals `extent`.
    pub fn concept_with_extent(&self, extent: &Extent, kind: ConceptKind) -> Option<&Concept> {
        self.concepts_of(kind).iter().find(|c| c.extent() == extent)
    }

    /// First concept of `kind` whose intent equals `intent`.
    pub fn concept_with_intent(&self, intent: &Intent, kind: ConceptKind) -> Option<&Concept> {
        self.concepts_of(kind).iter().find(|c| c.intent() == intent)
    }

    /// True if a concept of `kind` has this extent.
    pub fn has_extent(&self, extent: &Extent, kind: ConceptKind) -> bool {
        if kind == ConceptKind::Formal {
            return self.formal_extents.contains(extent);
        }
        self.concept_with_extent(extent, kind).is_some()
    }

    /// True if a concept of `kind` has this intent.
    pub fn has_intent(&self, intent: &Intent, kind: ConceptKind) -> bool {
        self.concept_with_intent(intent, kind).is_some()
    }

    /// The tagged top concept, if one was registered.
    pub fn top(&self) -> Option<&Concept> {
        self.formal_concepts().iter().find(|c| c.tag().is_some())
    }

    /// Classify a candidate pair against the owned table.
    pub fn classify(&self, extent: &Extent, intent: &Intent, threshold: f64) -> FcaResult<ConceptKind> {
        ConceptKind::classify(&self.table, extent, intent, threshold)
    }

    /// Total stored concepts across partitions.
    pub fn len(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    /// True if no concept is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every concept, keeping the table.
    pub fn clear(&mut self) {
        for partition in self.partitions.values_mut() {
            partition.clear();
        }
        self.formal_extents.clear();
    }
}

fn empty_partitions() -> Partitions {
    ConceptKind::STORED
        .into_iter()
        .map(|kind| (kind, Vec::new()))
        .collect()
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::TOP_TAG;
    use crate::generator::Strategy;
    use alloc::vec;

    fn reference() -> RelationTable {
        RelationTable::from_matrix(vec![
            vec![0.0, 0.0, 0.0, 0.0],
            vec![1.0, 1.0, 1.0, 1.0],
            vec![0.0, 1.0, 1.0, 0.0],
            vec![1.0, 1.0, 1.0, 1.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_register_partitions_by_kind() {
        let mut store = ConceptStore::new(reference());
        assert!(store.register(Concept::formal(Extent::from_iter([1, 3]), Intent::from_iter(0..4))));
        assert!(store.register(Concept::new(
            Extent::from_iter([2]),
            Intent::from_iter([1, 2]),
            ConceptKind::Semi
        )));
        assert!(!store.register(Concept::new(Extent::new(), Intent::new(), ConceptKind::Unknown)));
        assert_eq!(store.formal_concepts().len(), 1);
        assert_eq!(store.concepts_of(ConceptKind::Semi).len(), 1);
        assert!(store.concepts_of(ConceptKind::Pre).is_empty());
        assert!(store.concepts_of(ConceptKind::Unknown).is_empty());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_duplicate_formal_extent_refused() {
        let mut store = ConceptStore::new(reference());
        let c = Concept::formal(Extent::from_iter([1, 2, 3]), Intent::from_iter([1, 2]));
        assert!(store.register(c.clone()));
        assert!(!store.register(c));
        assert_eq!(store.formal_concepts().len(), 1);
    }

    #[test]
    fn test_lookups() {
        let mut store = ConceptStore::new(reference());
        store.register(Concept::formal(Extent::from_iter([1, 2, 3, 5]), Intent::from_iter([1])));
        let e = Extent::from_iter([1, 2, 3, 5]);
        let i = Intent::from_iter([1]);
        assert!(store.has_extent(&e, ConceptKind::Formal));
        assert!(store.has_intent(&i, ConceptKind::Formal));
        assert!(!store.has_extent(&e, ConceptKind::Semi));
        assert_eq!(store.concept_with_intent(&i, ConceptKind::Formal).map(|c| c.extent()), Some(&e));
        assert!(store.concept_with_extent(&Extent::new(), ConceptKind::Formal).is_none());
    }

    #[test]
    fn test_generate_registers_formal_concepts() {
        let mut store = ConceptStore::new(reference());
        let n = store.generate(&Strategy::InClose, 0.0).unwrap();
        assert_eq!(n, 4);
        assert_eq!(store.formal_concepts().len(), 4);
        let top = store.top().unwrap();
        assert_eq!(top.tag(), Some(TOP_TAG));
        assert_eq!(top.extent(), &Extent::from_iter(0..6));
    }

    #[test]
    fn test_failed_generation_registers_nothing() {
        let mut store = ConceptStore::new(reference());
        assert!(store.generate(&Strategy::Naive, f64::NAN).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_replace_table_clears_concepts() {
        let mut store = ConceptStore::new(reference());
        store.generate(&Strategy::InClose, 0.0).unwrap();
        let old = store.replace_table(RelationTable::from_matrix(vec![vec![1.0]]).unwrap());
        assert_eq!(old.object_count(), 6);
        assert!(store.is_empty());
        assert!(!store.has_extent(&Extent::from_iter([1, 3]), ConceptKind::Formal));
    }

    #[test]
    fn test_classify_uses_owned_table() {
        let store = ConceptStore::new(reference());
        let kind = store
            .classify(&Extent::from_iter([1, 3]), &Intent::from_iter(0..4), 0.0)
            .unwrap();
        assert_eq!(kind, ConceptKind::Formal);
    }
}

/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! In-Close — canonical depth-first concept enumeration.
//!
//! Each frame holds an extent `A[r]` and a partially built intent `B[r]`.
//! Scanning attributes `j` from the frame's start column:
//!
//! ```text
//!   C = A[r] ∩ {j}′
//!   C = ∅             → skip (the empty extent is handled once, at the end)
//!   C = A[r]          → j joins B[r]
//!   C canonical       → child frame (C, B[r] ∪ {j}) explored from j + 1
//! ```
//!
//! `C` is canonical at `j` when no attribute `k < j` outside `B[r]` holds for
//! every object of `C`. A non-canonical `C` has already been (or will be)
//! reached from an earlier column, so skipping it is what makes each extent
//! appear exactly once.
//!
//! # Invariants
//! - **No duplicate extents** — the canonicity test admits each closed
//!   extent from exactly one parent column
//! - **Top first** — `(G, G′)` is the first concept returned, tagged
//!   [`TOP_TAG`]
//! - **Empty bottom last** — `(∅, M)` is appended only when no object holds
//!   every attribute

use alloc::vec::Vec;

use super::{prepare, ConceptGenerator, Strategy};
use crate::concept::{Concept, TOP_TAG};
use crate::error::FcaResult;
use crate::index_set::{Extent, IndexSet, Intent};
use crate::table::RelationTable;

/// Canonical depth-first enumeration of formal concepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InClose;

impl ConceptGenerator for InClose {
    fn strategy(&self) -> Strategy {
        Strategy::InClose
    }

    fn generate(&self, table: &RelationTable, threshold: f64) -> FcaResult<Vec<Concept>> {
        let derivation = prepare(table, threshold)?;
        let mut search = Search {
            table,
            threshold,
            found: Vec::new(),
            rejected: 0,
        };

        let mut top = Frame {
            extent: (0..table.object_count()).collect(),
            intent: Vec::new(),
            depth: 0,
        };
        search.explore(&mut top, 0);

        let mut concepts = Vec::with_capacity(search.found.len() + 2);
        concepts.push(top.into_concept().with_tag(TOP_TAG));
        concepts.append(&mut search.found);

        let all_attributes = table.all_attributes();
        if derivation.objects_of_unchecked(&all_attributes).is_empty() {
            concepts.push(Concept::formal(Extent::new(), all_attributes.into()));
        }

        tracing::debug!(
            formal = concepts.len(),
            rejected = search.rejected,
            "in-close enumeration finished"
        );
        Ok(concepts)
    }
}

// ─── search state ────────────────────────────────────────────────────────────

/// One level of the depth-first search. Both vectors stay sorted: the extent
/// is filtered from a sorted parent, and intent columns are appended in
/// increasing order.
struct Frame {
    extent: Vec<usize>,
    intent: Vec<usize>,
    depth: usize,
}

impl Frame {
    fn into_concept(self) -> Concept {
        Concept::formal(
            Extent::from_set(IndexSet::from_sorted(self.extent)),
            Intent::from_set(IndexSet::from_sorted(self.intent)),
        )
    }
}

struct Search<'t> {
    table: &'t RelationTable,
    threshold: f64,
    found: Vec<Concept>,
    rejected: usize,
}

impl Search<'_> {
    /// Close `frame.intent` over columns `start..`, recursing into every
    /// canonical child. Children are emitted once their own scan completes.
    fn explore(&mut self, frame: &mut Frame, start: usize) {
        for column in start..self.table.attribute_count() {
            let child_extent: Vec<usize> = frame
                .extent
                .iter()
                .copied()
                .filter(|&g| self.holds(g, column))
                .collect();

            if child_extent.is_empty() {
                continue;
            }
            if child_extent.len() == frame.extent.len() {
                frame.intent.push(column);
                continue;
            }
            if !self.is_canonical(&frame.intent, &child_extent, column) {
                self.rejected += 1;
                tracing::trace!(depth = frame.depth, column, "non-canonical extent");
                continue;
            }

            let mut intent = Vec::with_capacity(frame.intent.len() + 1);
            intent.extend_from_slice(&frame.intent);
            intent.push(column);
            let mut child = Frame {
                extent: child_extent,
                intent,
                depth: frame.depth + 1,
            };
            self.explore(&mut child, column + 1);
            let concept = child.into_concept();
            tracing::trace!(depth = frame.depth + 1, concept = %concept, "concept closed");
            self.found.push(concept);
        }
    }

    /// True if no column before `column` and outside `closed` holds for all
    /// of `candidate`. `closed` is sorted and every entry is below `column`.
    fn is_canonical(&self, closed: &[usize], candidate: &[usize], column: usize) -> bool {
        let mut upper = column;
        for &member in closed.iter().rev() {
            if (member + 1..upper).rev().any(|k| self.implied(candidate, k)) {
                return false;
            }
            upper = member;
        }
        !(0..upper).rev().any(|k| self.implied(candidate, k))
    }

    fn implied(&self, objects: &[usize], column: usize) -> bool {
        objects.iter().all(|&g| self.holds(g, column))
    }

    #[inline]
    fn holds(&self, object: usize, column: usize) -> bool {
        self.table.holds(object, column, self.threshold)
    }
}

/// In-Close over `table` at `threshold`, returning only formal concepts.
///
/// Shorthand for `InClose.generate(table, threshold)`.
pub fn in_close(table: &RelationTable, threshold: f64) -> FcaResult<Vec<Concept>> {
    InClose.generate(table, threshold)
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use hashbrown::HashSet;

    #[test]
    fn test_reference_table_four_concepts() {
        let t = RelationTable::from_matrix(vec![
            vec![0.0, 0.0, 0.0, 0.0],
            vec![1.0, 1.0, 1.0, 1.0],
            vec![0.0, 1.0, 1.0, 0.0],
            vec![1.0, 1.0, 1.0, 1.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0],
        ])
        .unwrap();
        let concepts = in_close(&t, 0.0).unwrap();
        assert_eq!(concepts.len(), 4);
        assert_eq!(concepts[0].tag(), Some(TOP_TAG));
        assert!(concepts.iter().any(|c| c.extent() == &Extent::from_iter([1, 3])
            && c.intent() == &Intent::from_iter(0..4)));
    }

    #[test]
    fn test_no_duplicate_extents_on_dense_table() {
        let t = RelationTable::from_matrix(vec![
            vec![1.0, 1.0, 0.0, 1.0, 0.0],
            vec![1.0, 0.0, 1.0, 1.0, 0.0],
            vec![0.0, 1.0, 1.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 1.0, 1.0],
        ])
        .unwrap();
        let concepts = in_close(&t, 0.0).unwrap();
        let extents: HashSet<_> = concepts.iter().map(|c| c.extent().clone()).collect();
        assert_eq!(extents.len(), concepts.len());
        for c in &concepts {
            c.verify_formal(&t, 0.0).unwrap();
        }
    }

    #[test]
    fn test_empty_bottom_appended_last() {
        let t = RelationTable::from_matrix(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let concepts = in_close(&t, 0.0).unwrap();
        assert_eq!(concepts.len(), 4);
        let last = concepts.last().unwrap();
        assert!(last.extent().is_empty());
        assert_eq!(last.intent(), &Intent::from_iter([0, 1]));
    }

    #[test]
    fn test_all_zero_table() {
        let t = RelationTable::from_matrix(vec![vec![0.0, 0.0], vec![0.0, 0.0]]).unwrap();
        let concepts = in_close(&t, 0.0).unwrap();
        // Top ({0,1}, {}) and bottom ({}, {0,1}).
        assert_eq!(concepts.len(), 2);
        assert!(concepts[0].intent().is_empty());
    }

    #[test]
    fn test_attribute_held_by_all_joins_top_intent() {
        let t = RelationTable::from_matrix(vec![vec![1.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let concepts = in_close(&t, 0.0).unwrap();
        assert_eq!(concepts[0].intent(), &Intent::from_iter([0]));
        assert_eq!(concepts.len(), 2);
    }
}

//! Derivation operators — the two halves of the Galois connection.
//!
//! For an object set `A`, `A′` ([`attributes_of`]) is the set of attributes
//! held by every object of `A`. For an attribute set `B`, `B′`
//! ([`objects_of`]) is the set of objects holding every attribute of `B`.
//! The empty set derives to the full opposite universe (vacuous truth).
//!
//! Both maps are antitone, and their composites `A ↦ A″` and `B ↦ B″` are
//! closure operators (extensive, monotone, idempotent). A pair `(A, B)` with
//! `A′ = B` and `B′ = A` is a formal concept.
//!
//! [`Derivation`] binds a table and threshold once so that generators can
//! call the operators in tight loops without re-validating.

use alloc::vec::Vec;

use crate::error::FcaResult;
use crate::index_set::{Extent, IndexSet, Intent};
use crate::table::{validate_threshold, RelationTable};

/// Both derivation operators bound to one table and threshold.
#[derive(Clone, Copy, Debug)]
pub struct Derivation<'t> {
    table: &'t RelationTable,
    threshold: f64,
}

impl<'t> Derivation<'t> {
    /// Bind `table` at `threshold`. Fails on a non-finite threshold.
    pub fn new(table: &'t RelationTable, threshold: f64) -> FcaResult<Self> {
        validate_threshold(threshold)?;
        Ok(Self { table, threshold })
    }

    /// The bound table.
    pub fn table(&self) -> &'t RelationTable {
        self.table
    }

    /// The bound threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// `A′`: attributes common to every object in `objects`.
    pub fn attributes_of(&self, objects: &IndexSet) -> FcaResult<Intent> {
        self.check_objects(objects)?;
        Ok(self.attributes_of_unchecked(objects))
    }

    /// `B′`: objects holding every attribute in `attributes`.
    pub fn objects_of(&self, attributes: &IndexSet) -> FcaResult<Extent> {
        self.check_attributes(attributes)?;
        Ok(self.objects_of_unchecked(attributes))
    }

    /// `A″`: the smallest extent containing `objects`.
    pub fn close_objects(&self, objects: &IndexSet) -> FcaResult<Extent> {
        let intent = self.attributes_of(objects)?;
        Ok(self.objects_of_unchecked(&intent))
    }

    /// `B″`: the smallest intent containing `attributes`.
    pub fn close_attributes(&self, attributes: &IndexSet) -> FcaResult<Intent> {
        let extent = self.objects_of(attributes)?;
        Ok(self.attributes_of_unchecked(&extent))
    }

    /// `{m}′`, the objects holding a single attribute.
    pub fn objects_with(&self, attribute: usize) -> FcaResult<Extent> {
        if attribute >= self.table.attribute_count() {
            return Err(self.table.attribute_out_of_bounds(attribute));
        }
        Ok(self.objects_with_unchecked(attribute))
    }

    /// `{g}′`, the attributes of a single object.
    pub fn attributes_with(&self, object: usize) -> FcaResult<Intent> {
        if object >= self.table.object_count() {
            return Err(self.table.object_out_of_bounds(object));
        }
        Ok(self.attributes_with_unchecked(object))
    }

    // ── unchecked forms for generators; indices come from the table itself ──

    pub(crate) fn attributes_of_unchecked(&self, objects: &IndexSet) -> Intent {
        let kept: Vec<usize> = (0..self.table.attribute_count())
            .filter(|&m| objects.iter().all(|g| self.table.holds(g, m, self.threshold)))
            .collect();
        Intent::from_set(IndexSet::from_sorted(kept))
    }

    pub(crate) fn objects_of_unchecked(&self, attributes: &IndexSet) -> Extent {
        let kept: Vec<usize> = (0..self.table.object_count())
            .filter(|&g| attributes.iter().all(|m| self.table.holds(g, m, self.threshold)))
            .collect();
        Extent::from_set(IndexSet::from_sorted(kept))
    }

    pub(crate) fn objects_with_unchecked(&self, attribute: usize) -> Extent {
        let kept: Vec<usize> = (0..self.table.object_count())
            .filter(|&g| self.table.holds(g, attribute, self.threshold))
            .collect();
        Extent::from_set(IndexSet::from_sorted(kept))
    }

    pub(crate) fn attributes_with_unchecked(&self, object: usize) -> Intent {
        let kept: Vec<usize> = (0..self.table.attribute_count())
            .filter(|&m| self.table.holds(object, m, self.threshold))
            .collect();
        Intent::from_set(IndexSet::from_sorted(kept))
    }

    fn check_objects(&self, objects: &IndexSet) -> FcaResult<()> {
        objects.check_bound(self.table.object_count(), |index| self.table.object_out_of_bounds(index))
    }

    fn check_attributes(&self, attributes: &IndexSet) -> FcaResult<()> {
        attributes.check_bound(self.table.attribute_count(), |index| {
            self.table.attribute_out_of_bounds(index)
        })
    }
}

/// `A′` over `table` at `threshold`. See [`Derivation::attributes_of`].
pub fn attributes_of(table: &RelationTable, objects: &IndexSet, threshold: f64) -> FcaResult<Intent> {
    Derivation::new(table, threshold)?.attributes_of(objects)
}

/// `B′` over `table` at `threshold`. See [`Derivation::objects_of`].
pub fn objects_of(table: &RelationTable, attributes: &IndexSet, threshold: f64) -> FcaResult<Extent> {
    Derivation::new(table, threshold)?.objects_of(attributes)
}

/// `A″` over `table` at `threshold`.
pub fn closure_of_objects(table: &RelationTable, objects: &IndexSet, threshold: f64) -> FcaResult<Extent> {
    Derivation::new(table, threshold)?.close_objects(objects)
}

/// `B″` over `table` at `threshold`.
pub fn closure_of_attributes(table: &RelationTable, attributes: &IndexSet, threshold: f64) -> FcaResult<Intent> {
    Derivation::new(table, threshold)?.close_attributes(attributes)
}

// ─── Tests ────────────────────────────────────────────────────────────────

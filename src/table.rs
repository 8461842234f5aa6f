/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! The relation table — a formal context's incidence matrix.
//!
//! A [`RelationTable`] holds `object_count × attribute_count` real values in
//! dense row-major order together with the object and attribute labels. A
//! cell *holds* at threshold `t` iff its value is strictly greater than `t`,
//! so a binary 0/1 table is read with threshold `0.0`.
//!
//! Tables are constructed through [`TableBuilder`] from counts, from name
//! lists, or from a raw matrix; whichever two of the three are missing are
//! inferred. Inferred labels follow the `x1…xn` / `y1…ym` scheme.
//!
//! # Invariants
//! - **Shape** — every row has exactly `attribute_count` cells; both counts ≥ 1
//! - **Labels** — names are non-empty and positionally aligned with indices
//! - **Frozen for generation** — mutating a table after concepts were computed
//!   from it invalidates those concepts; nothing re-validates them

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::clarifier::{Clarifier, ClarifierResult};
use crate::error::{FcaError, FcaResult};
use crate::index_set::{IndexSet, PowerSet};

/// Object label prefix used when names are inferred.
pub const OBJECT_LABEL_PREFIX: &str = "x";

/// Attribute label prefix used when names are inferred.
pub const ATTRIBUTE_LABEL_PREFIX: &str = "y";

/// Reject thresholds that are NaN or infinite.
pub fn validate_threshold(threshold: f64) -> FcaResult<()> {
    if threshold.is_finite() {
        Ok(())
    } else {
        Err(FcaError::invalid(format!("threshold must be finite, got {threshold}")))
    }
}

fn generate_labels(count: usize, prefix: &str) -> Vec<String> {
    (1..=count).map(|i| format!("{prefix}{i}")).collect()
}

// ─── RelationTable ───────────────────────────────────────────────────────────

/// Dense incidence table between objects (rows) and attributes (columns).
///
/// Deserialization goes through [`TableBuilder`], so malformed input is
/// rejected with the builder's error instead of producing a broken table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTable")
)]
pub struct RelationTable {
    object_names: Vec<String>,
    attribute_names: Vec<String>,
    /// Row-major cells, `object_count * attribute_count` long.
    cells: Vec<f64>,
    /// Secondary table carried through untouched; no generator reads it.
    description_paths: Vec<Vec<i64>>,
}

impl RelationTable {
    /// Shorthand for `TableBuilder::from_matrix(rows).build()`.
    pub fn from_matrix(rows: Vec<Vec<f64>>) -> FcaResult<Self> {
        TableBuilder::from_matrix(rows).build()
    }

    /// Number of objects (rows).
    pub fn object_count(&self) -> usize {
        self.object_names.len()
    }

    /// Number of attributes (columns).
    pub fn attribute_count(&self) -> usize {
        self.attribute_names.len()
    }

    /// Object labels in row order.
    pub fn object_names(&self) -> &[String] {
        &self.object_names
    }

    /// Attribute labels in column order.
    pub fn attribute_names(&self) -> &[String] {
        &self.attribute_names
    }

    /// Header row for tabular export: the attribute names.
    pub fn header(&self) -> &[String] {
        &self.attribute_names
    }

    /// The inert description-path table supplied at construction, if any.
    pub fn description_paths(&self) -> &[Vec<i64>] {
        &self.description_paths
    }

    /// One object's row of raw values.
    pub fn row(&self, object: usize) -> FcaResult<&[f64]> {
        if object >= self.object_count() {
            return Err(self.object_out_of_bounds(object));
        }
        Ok(self.row_unchecked(object))
    }

    /// Row-major iteration, one slice per object, for external writers.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.cells.chunks(self.attribute_count())
    }

    /// Copy of the raw matrix, one `Vec` per object.
    pub fn to_matrix(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Raw value at `(object, attribute)`.
    pub fn value(&self, object: usize, attribute: usize) -> FcaResult<f64> {
        self.check_cell(object, attribute)?;
        Ok(self.cells[object * self.attribute_count() + attribute])
    }

    /// True iff the cell at `(object, attribute)` strictly exceeds `threshold`.
    ///
    /// Fails with [`FcaError::OutOfBounds`] when either index is outside the
    /// table, carrying both indices and both bounds.
    pub fn has_relation(&self, object: usize, attribute: usize, threshold: f64) -> FcaResult<bool> {
        self.check_cell(object, attribute)?;
        Ok(self.holds(object, attribute, threshold))
    }

    /// True iff every object in `objects` holds `attribute` above `threshold`.
    ///
    /// Vacuously true for an empty object set.
    pub fn all_objects_have_attribute(
        &self,
        objects: &IndexSet,
        attribute: usize,
        threshold: f64,
    ) -> FcaResult<bool> {
        if attribute >= self.attribute_count() {
            return Err(self.attribute_out_of_bounds(attribute));
        }
        objects.check_bound(self.object_count(), |index| self.object_out_of_bounds(index))?;
        Ok(objects.iter().all(|o| self.holds(o, attribute, threshold)))
    }

    /// Overwrite one cell. Any concepts computed earlier from this table are stale afterwards.
    pub fn set_relation(&mut self, object: usize, attribute: usize, value: f64) -> FcaResult<()> {
        self.check_cell(object, attribute)?;
        let m = self.attribute_count();
        self.cells[object * m + attribute] = value;
        Ok(())
    }

    /// Mark `(object, attribute)` as related (value `1.0`).
    pub fn add_relation(&mut self, object: usize, attribute: usize) -> FcaResult<()> {
        self.set_relation(object, attribute, 1.0)
    }

    /// Lazily enumerate every subset of the object universe.
    pub fn power_set_of_objects(&self) -> FcaResult<PowerSet> {
        PowerSet::new(self.object_count())
    }

    /// Lazily enumerate every subset of the attribute universe.
    pub fn power_set_of_attributes(&self) -> FcaResult<PowerSet> {
        PowerSet::new(self.attribute_count())
    }

    /// Every object index.
    pub fn all_objects(&self) -> IndexSet {
        IndexSet::universe(self.object_count())
    }

    /// Every attribute index.
    pub fn all_attributes(&self) -> IndexSet {
        IndexSet::universe(self.attribute_count())
    }

    /// Remove duplicate rows and columns using the default tolerance.
    ///
    /// Returns a new table; `self` is untouched. The survivors keep their
    /// labels in original relative order. Use [`Clarifier`] directly for the
    /// equivalence classes or a custom tolerance.
    pub fn clarify(&self) -> RelationTable {
        self.clarify_with_classes().table
    }

    /// Like [`clarify`](Self::clarify) but keeps the full [`ClarifierResult`].
    pub fn clarify_with_classes(&self) -> ClarifierResult {
        Clarifier::default().clarify(self)
    }

    // ── crate-internal accessors ─────────────────────────────────────────────

    /// Unchecked membership; callers guarantee both indices are in range.
    #[inline]
    pub(crate) fn holds(&self, object: usize, attribute: usize, threshold: f64) -> bool {
        self.cells[object * self.attribute_count() + attribute] > threshold
    }

    #[inline]
    pub(crate) fn row_unchecked(&self, object: usize) -> &[f64] {
        let m = self.attribute_count();
        &self.cells[object * m..(object + 1) * m]
    }

    pub(crate) fn object_out_of_bounds(&self, index: usize) -> FcaError {
        FcaError::ObjectOutOfBounds {
            index,
            object_count: self.object_count(),
            attribute_count: self.attribute_count(),
        }
    }

    pub(crate) fn attribute_out_of_bounds(&self, index: usize) -> FcaError {
        FcaError::AttributeOutOfBounds {
            index,
            object_count: self.object_count(),
            attribute_count: self.attribute_count(),
        }
    }

    /// Assemble a table from parts already known to be consistent.
    pub(crate) fn from_parts(
        object_names: Vec<String>,
        attribute_names: Vec<String>,
        cells: Vec<f64>,
        description_paths: Vec<Vec<i64>>,
    ) -> Self {
        debug_assert_eq!(cells.len(), object_names.len() * attribute_names.len());
        Self {
            object_names,
            attribute_names,
            cells,
            description_paths,
        }
    }

    fn check_cell(&self, object: usize, attribute: usize) -> FcaResult<()> {
        if object >= self.object_count() || attribute >= self.attribute_count() {
            return Err(FcaError::OutOfBounds {
                object,
                attribute,
                object_count: self.object_count(),
                attribute_count: self.attribute_count(),
            });
        }
        Ok(())
    }
}

/// Unvalidated wire form of [`RelationTable`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTable {
    object_names: Vec<String>,
    attribute_names: Vec<String>,
    cells: Vec<f64>,
    description_paths: Vec<Vec<i64>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTable> for RelationTable {
    type Error = FcaError;

    fn try_from(raw: RawTable) -> FcaResult<Self> {
        let m = raw.attribute_names.len();
        if m == 0 {
            return Err(FcaError::invalid("attribute names are empty"));
        }
        let expected = raw.object_names.len().checked_mul(m);
        if expected != Some(raw.cells.len()) {
            return Err(FcaError::invalid(format!(
                "{} cells cannot fill {} objects × {m} attributes",
                raw.cells.len(),
                raw.object_names.len()
            )));
        }
        let rows: Vec<Vec<f64>> = raw.cells.chunks(m).map(<[f64]>::to_vec).collect();
        TableBuilder::from_matrix(rows)
            .object_names(raw.object_names)
            .attribute_names(raw.attribute_names)
            .description_paths(raw.description_paths)
            .build()
    }
}

// ─── TableBuilder ────────────────────────────────────────────────────────────

/// Builder for [`RelationTable`].
///
/// Start from counts, names, or a matrix, then optionally override the
/// names. Every inconsistency is reported by [`build`](Self::build) as
/// [`FcaError::InvalidArgument`].
///
/// ```rust
/// use fca_core::table::TableBuilder;
///
/// let table = TableBuilder::from_matrix(vec![vec![1.0, 0.0], vec![0.0, 1.0]])
///     .object_names(["duck", "dog"])
///     .attribute_names(["flies", "barks"])
///     .build()
///     .unwrap();
/// assert!(table.has_relation(1, 1, 0.0).unwrap());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TableBuilder {
    object_count: Option<usize>,
    attribute_count: Option<usize>,
    object_names: Option<Vec<String>>,
    attribute_names: Option<Vec<String>>,
    matrix: Option<Vec<Vec<f64>>>,
    description_paths: Vec<Vec<i64>>,
}

impl TableBuilder {
    /// An all-zero table of the given shape with generated labels.
    pub fn with_counts(object_count: usize, attribute_count: usize) -> Self {
        Self {
            object_count: Some(object_count),
            attribute_count: Some(attribute_count),
            ..Self::default()
        }
    }

    /// An all-zero table shaped by the name lists.
    pub fn with_names<O, A>(object_names: O, attribute_names: A) -> Self
    where
        O: IntoIterator,
        O::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self::default()
            .object_names(object_names)
            .attribute_names(attribute_names)
    }

    /// A table holding `rows`, with labels generated unless overridden.
    pub fn from_matrix(rows: Vec<Vec<f64>>) -> Self {
        Self {
            matrix: Some(rows),
            ..Self::default()
        }
    }

    /// Override the object labels.
    pub fn object_names<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.object_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Override the attribute labels.
    pub fn attribute_names<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.attribute_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Attach an inert description-path table.
    pub fn description_paths(mut self, paths: Vec<Vec<i64>>) -> Self {
        self.description_paths = paths;
        self
    }

    /// Validate and produce the table.
    pub fn build(self) -> FcaResult<RelationTable> {
        let object_count = resolve_count(
            "object",
            self.object_count,
            self.object_names.as_ref().map(Vec::len),
            self.matrix.as_ref().map(Vec::len),
        )?;
        let attribute_count = resolve_count(
            "attribute",
            self.attribute_count,
            self.attribute_names.as_ref().map(Vec::len),
            self.matrix.as_ref().and_then(|m| m.first()).map(Vec::len),
        )?;

        let object_names = match self.object_names {
            Some(names) => check_names("object", names)?,
            None => generate_labels(object_count, OBJECT_LABEL_PREFIX),
        };
        let attribute_names = match self.attribute_names {
            Some(names) => check_names("attribute", names)?,
            None => generate_labels(attribute_count, ATTRIBUTE_LABEL_PREFIX),
        };

        let cells = match self.matrix {
            Some(rows) => {
                let mut cells = Vec::with_capacity(object_count * attribute_count);
                for (i, row) in rows.into_iter().enumerate() {
                    if row.len() != attribute_count {
                        return Err(FcaError::invalid(format!(
                            "row {i} has {} cells, expected {attribute_count}",
                            row.len()
                        )));
                    }
                    cells.extend(row);
                }
                cells
            }
            None => alloc::vec![0.0; object_count * attribute_count],
        };

        Ok(RelationTable::from_parts(
            object_names,
            attribute_names,
            cells,
            self.description_paths,
        ))
    }
}

/// Reconcile up to three sources for one dimension; all present ones must agree.
fn resolve_count(
    axis: &str,
    explicit: Option<usize>,
    from_names: Option<usize>,
    from_matrix: Option<usize>,
) -> FcaResult<usize> {
    let mut resolved: Option<(usize, &str)> = None;
    for (candidate, source) in [
        (explicit, "count"),
        (from_names, "name list"),
        (from_matrix, "matrix"),
    ] {
        let Some(n) = candidate else { continue };
        match resolved {
            Some((m, other)) if m != n => {
                return Err(FcaError::invalid(format!(
                    "{axis} {source} gives {n} but {other} gives {m}"
                )));
            }
            Some(_) => {}
            None => resolved = Some((n, source)),
        }
    }
    match resolved {
        Some((0, _)) => Err(FcaError::invalid(format!("{axis} count must be at least 1"))),
        Some((n, _)) => Ok(n),
        None => Err(FcaError::invalid(format!("{axis} dimension is unspecified"))),
    }
}

fn check_names(axis: &str, names: Vec<String>) -> FcaResult<Vec<String>> {
    if let Some(i) = names.iter().position(String::is_empty) {
        return Err(FcaError::invalid(format!("{axis} name at index {i} is empty")));
    }
    Ok(names)
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_from_matrix_infers_counts_and_labels() {
        let t = reference();
        assert_eq!(t.object_count(), 6);
        assert_eq!(t.attribute_count(), 4);
        assert_eq!(t.object_names()[0], "x1");
        assert_eq!(t.object_names()[5], "x6");
        assert_eq!(t.attribute_names()[3], "y4");
    }

    #[test]
    fn test_has_relation_is_strictly_above_threshold() {
        let t = RelationTable::from_matrix(vec![vec![0.5, 0.2]]).unwrap();
        assert!(t.has_relation(0, 0, 0.2).unwrap());
        assert!(!t.has_relation(0, 1, 0.2).unwrap());
        assert!(!t.has_relation(0, 0, 0.5).unwrap());
    }

    #[test]
    fn test_has_relation_out_of_bounds_reports_both_bounds() {
        let t = reference();
        let err = t.has_relation(6, 1, 0.0).unwrap_err();
        assert_eq!(
            err,
            FcaError::OutOfBounds {
                object: 6,
                attribute: 1,
                object_count: 6,
                attribute_count: 4,
            }
        );
        assert!(t.has_relation(0, 4, 0.0).is_err());
    }

    #[test]
    fn test_with_counts_builds_zero_table() {
        let t = TableBuilder::with_counts(2, 3).build().unwrap();
        assert_eq!(t.to_matrix(), vec![vec![0.0; 3]; 2]);
        assert_eq!(t.attribute_names(), &["y1", "y2", "y3"]);
    }

    #[test]
    fn test_with_names_shapes_table() {
        let t = TableBuilder::with_names(["a", "b"], ["p"]).build().unwrap();
        assert_eq!(t.object_count(), 2);
        assert_eq!(t.attribute_count(), 1);
        assert_eq!(t.object_names(), &["a", "b"]);
    }

    #[test]
    fn test_mismatched_names_rejected() {
        let err = TableBuilder::with_counts(2, 2)
            .object_names(["only-one"])
            .build()
            .unwrap_err();
        assert!(matches!(err, FcaError::InvalidArgument { .. }));

        let err = TableBuilder::from_matrix(vec![vec![1.0, 0.0]])
            .attribute_names(["a", "b", "c"])
            .build()
            .unwrap_err();
        assert!(matches!(err, FcaError::InvalidArgument { .. }));
    }

    #[test]
    fn test_empty_inputs_rejected() {
        assert!(TableBuilder::with_counts(0, 3).build().is_err());
        assert!(TableBuilder::with_counts(3, 0).build().is_err());
        assert!(RelationTable::from_matrix(vec![]).is_err());
        assert!(RelationTable::from_matrix(vec![vec![]]).is_err());
        let empty_names: [&str; 0] = [];
        assert!(TableBuilder::with_names(empty_names, ["a"]).build().is_err());
        assert!(TableBuilder::with_names(["a", ""], ["b"]).build().is_err());
        assert!(TableBuilder::default().build().is_err());
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let err = RelationTable::from_matrix(vec![vec![1.0, 0.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, FcaError::InvalidArgument { .. }));
    }

    #[test]
    fn test_set_relation_and_add_relation() {
        let mut t = TableBuilder::with_counts(2, 2).build().unwrap();
        t.add_relation(1, 0).unwrap();
        t.set_relation(0, 1, 0.75).unwrap();
        assert_eq!(t.value(1, 0).unwrap(), 1.0);
        assert_eq!(t.value(0, 1).unwrap(), 0.75);
        assert!(t.set_relation(2, 0, 1.0).is_err());
    }

    #[test]
    fn test_all_objects_have_attribute() {
        let t = reference();
        let objs: IndexSet = [1, 2, 3].into_iter().collect();
        assert!(t.all_objects_have_attribute(&objs, 1, 0.0).unwrap());
        assert!(!t.all_objects_have_attribute(&objs, 0, 0.0).unwrap());
        assert!(t.all_objects_have_attribute(&IndexSet::new(), 0, 0.0).unwrap());
        assert_eq!(
            t.all_objects_have_attribute(&objs, 9, 0.0).unwrap_err(),
            FcaError::AttributeOutOfBounds {
                index: 9,
                object_count: 6,
                attribute_count: 4,
            }
        );
    }

    #[test]
    fn test_rows_export_row_major() {
        let t = reference();
        let rows: Vec<&[f64]> = t.rows().collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[2], &[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(t.header().len(), 4);
        assert_eq!(t.row(5).unwrap(), &[0.0, 1.0, 0.0, 0.0]);
        assert!(t.row(6).is_err());
    }

    #[test]
    fn test_power_sets_are_lazy_and_sized() {
        let t = reference();
        assert_eq!(t.power_set_of_objects().unwrap().subset_count(), 64);
        assert_eq!(t.power_set_of_attributes().unwrap().count(), 16);
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(-3.5).is_ok());
        assert!(validate_threshold(f64::NAN).is_err());
        assert!(validate_threshold(f64::INFINITY).is_err());
    }

    #[test]
    fn test_description_paths_pass_through() {
        let t = TableBuilder::from_matrix(vec![vec![1.0]])
            .description_paths(vec![vec![0, 1, 2]])
            .build()
            .unwrap();
        assert_eq!(t.description_paths(), &[vec![0, 1, 2]]);
    }
}

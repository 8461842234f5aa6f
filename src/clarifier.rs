/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Clarification — collapsing duplicate rows and columns.
//!
//! Two objects with identical rows (or two attributes with identical columns)
//! are indistinguishable to the derivation operators, so keeping both only
//! inflates every extent (or intent) without changing the lattice shape.
//! [`Clarifier`] keeps the first index of each duplicate class and drops the
//! rest, producing a new [`RelationTable`].
//!
//! # Algorithm
//!
//! Rows: for each row `i` in order that is not already marked duplicate,
//! compare it against every later unmarked row `j`; matches are marked and
//! join `i`'s class. Columns are processed the same way on column vectors.
//! Cells compare equal when they differ by at most [`ClarifierConfig::epsilon`].
//!
//! Tolerance equality is not transitive, and dropping a column can make two
//! rows equal. [`Clarifier::clarify`] therefore alternates the row and column
//! passes on the shrinking table until a round removes nothing, composing the
//! classes of each round so they always name original indices.
//!
//! # Invariants
//! - **Pure** — the input table is never mutated
//! - **Order-preserving** — surviving rows/columns keep their relative order
//! - **Representative = first** — a class is represented by its smallest index
//! - **Idempotent** — clarifying a clarified table removes nothing
//! - **Lattice-preserving** — expanding a clarified concept's extent/intent by
//!   [`ClarifierResult::expand_extent`]/[`ClarifierResult::expand_intent`]
//!   gives the corresponding concept of the original table

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{FcaError, FcaResult};
use crate::index_set::{Extent, IndexSet, Intent};
use crate::table::RelationTable;

/// Default cell-equality tolerance for real-valued tables.
pub const DEFAULT_EPSILON: f64 = 1e-7;

// ─── Config ──────────────────────────────────────────────────────────────────

/// Tunables for [`Clarifier`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClarifierConfig {
    /// Two cells are equal when `|a - b| <= epsilon`.
    /// `0.0` gives exact equality (integer tables). Default: `1e-7`.
    pub epsilon: f64,
}

impl Default for ClarifierConfig {
    fn default() -> Self {
        Self { epsilon: DEFAULT_EPSILON }
    }
}

// ─── Result ──────────────────────────────────────────────────────────────────

/// Outcome of a clarification.
///
/// Carries both views of the clarification: the raw removed indices, and the
/// partition of every original index into equivalence classes (singletons
/// included), ordered by representative.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClarifierResult {
    /// The clarified table.
    pub table: RelationTable,
    /// Original row indices dropped as duplicates.
    pub removed_rows: IndexSet,
    /// Original column indices dropped as duplicates.
    pub removed_columns: IndexSet,
    /// Row equivalence classes; class `k` backs row `k` of the clarified table.
    pub row_classes: Vec<IndexSet>,
    /// Column equivalence classes; class `k` backs column `k` of the clarified table.
    pub column_classes: Vec<IndexSet>,
}

impl ClarifierResult {
    /// Map an extent of the clarified table back to the original objects.
    pub fn expand_extent(&self, extent: &Extent) -> FcaResult<Extent> {
        expand(&self.row_classes, extent.as_set()).map(Extent::from_set).map_err(|index| {
            FcaError::ObjectOutOfBounds {
                index,
                object_count: self.row_classes.len(),
                attribute_count: self.column_classes.len(),
            }
        })
    }

    /// Map an intent of the clarified table back to the original attributes.
    pub fn expand_intent(&self, intent: &Intent) -> FcaResult<Intent> {
        expand(&self.column_classes, intent.as_set()).map(Intent::from_set).map_err(|index| {
            FcaError::AttributeOutOfBounds {
                index,
                object_count: self.row_classes.len(),
                attribute_count: self.column_classes.len(),
            }
        })
    }

    /// True when nothing was removed.
    pub fn is_unchanged(&self) -> bool {
        self.removed_rows.is_empty() && self.removed_columns.is_empty()
    }
}

fn expand(classes: &[IndexSet], set: &IndexSet) -> Result<IndexSet, usize> {
    let mut out = IndexSet::new();
    for k in set.iter() {
        let class = classes.get(k).ok_or(k)?;
        out = out.union(class);
    }
    Ok(out)
}

// ─── Clarifier ───────────────────────────────────────────────────────────────

/// Duplicate row/column remover.
#[derive(Clone, Debug, Default)]
pub struct Clarifier {
    config: ClarifierConfig,
}

impl Clarifier {
    /// Build a clarifier. Fails if `epsilon` is negative or not finite.
    pub fn new(config: ClarifierConfig) -> FcaResult<Self> {
        if !config.epsilon.is_finite() || config.epsilon < 0.0 {
            return Err(FcaError::invalid(alloc::format!(
                "epsilon must be finite and non-negative, got {}",
                config.epsilon
            )));
        }
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &ClarifierConfig {
        &self.config
    }

    /// Collapse duplicate rows and duplicate columns until none remain.
    ///
    /// Row and column passes alternate on the shrinking table; a round that
    /// removes nothing ends the loop. The result is itself fully clarified.
    pub fn clarify(&self, table: &RelationTable) -> ClarifierResult {
        let mut row_classes = singletons(table.object_count());
        let mut column_classes = singletons(table.attribute_count());
        let mut rounds = 0usize;
        loop {
            rounds += 1;
            let current = project(table, &row_classes, &column_classes);
            let row_merge = self.duplicate_rows(&current);
            let rows_merged = row_merge.len() < current.object_count();
            row_classes = compose(&row_classes, &row_merge);

            let current = project(table, &row_classes, &column_classes);
            let column_merge = self.duplicate_columns(&current);
            let columns_merged = column_merge.len() < current.attribute_count();
            column_classes = compose(&column_classes, &column_merge);

            tracing::trace!(round = rounds, rows_merged, columns_merged, "clarification round");
            if !rows_merged && !columns_merged {
                break;
            }
        }
        self.finish(table, row_classes, column_classes)
    }

    /// Collapse duplicate rows only; every column is its own class.
    pub fn clarify_rows(&self, table: &RelationTable) -> ClarifierResult {
        let row_classes = self.duplicate_rows(table);
        let column_classes = singletons(table.attribute_count());
        self.finish(table, row_classes, column_classes)
    }

    /// Collapse duplicate columns only; every row is its own class.
    pub fn clarify_columns(&self, table: &RelationTable) -> ClarifierResult {
        let column_classes = self.duplicate_columns(table);
        let row_classes = singletons(table.object_count());
        self.finish(table, row_classes, column_classes)
    }

    fn same(&self, a: f64, b: f64) -> bool {
        let d = a - b;
        d <= self.config.epsilon && -d <= self.config.epsilon
    }

    fn duplicate_rows(&self, table: &RelationTable) -> Vec<IndexSet> {
        let n = table.object_count();
        let rows_equal = |i: usize, j: usize| {
            table
                .row_unchecked(i)
                .iter()
                .zip(table.row_unchecked(j))
                .all(|(&a, &b)| self.same(a, b))
        };
        partition(n, rows_equal)
    }

    fn duplicate_columns(&self, table: &RelationTable) -> Vec<IndexSet> {
        let m = table.attribute_count();
        let n = table.object_count();
        let columns_equal = |p: usize, q: usize| {
            (0..n).all(|i| {
                let row = table.row_unchecked(i);
                self.same(row[p], row[q])
            })
        };
        partition(m, columns_equal)
    }

    fn finish(
        &self,
        table: &RelationTable,
        row_classes: Vec<IndexSet>,
        column_classes: Vec<IndexSet>,
    ) -> ClarifierResult {
        let clarified = project(table, &row_classes, &column_classes);
        let removed_rows = non_representatives(&row_classes);
        let removed_columns = non_representatives(&column_classes);

        tracing::debug!(
            rows_removed = removed_rows.len(),
            columns_removed = removed_columns.len(),
            objects = clarified.object_count(),
            attributes = clarified.attribute_count(),
            "clarified relation table"
        );

        ClarifierResult {
            table: clarified,
            removed_rows,
            removed_columns,
            row_classes,
            column_classes,
        }
    }
}

/// Split `0..count` into classes of mutually equal positions, first index representative.
fn partition(count: usize, equal: impl Fn(usize, usize) -> bool) -> Vec<IndexSet> {
    let mut duplicate = alloc::vec![false; count];
    let mut classes = Vec::new();
    for i in 0..count {
        if duplicate[i] {
            continue;
        }
        let mut class = Vec::new();
        class.push(i);
        for j in (i + 1)..count {
            if !duplicate[j] && equal(i, j) {
                duplicate[j] = true;
                class.push(j);
            }
        }
        classes.push(IndexSet::from_sorted(class));
    }
    classes
}

/// Merge original-index classes by a partition of their positions.
///
/// `merge` partitions `0..classes.len()`; each merged class is the union of
/// the classes it names, and its smallest index stays the representative.
fn compose(classes: &[IndexSet], merge: &[IndexSet]) -> Vec<IndexSet> {
    merge
        .iter()
        .map(|positions| {
            positions
                .iter()
                .fold(IndexSet::new(), |acc, k| acc.union(&classes[k]))
        })
        .collect()
}

fn non_representatives(classes: &[IndexSet]) -> IndexSet {
    classes.iter().flat_map(|class| class.iter().skip(1)).collect()
}

/// The sub-table of class representatives, in class order.
fn project(table: &RelationTable, row_classes: &[IndexSet], column_classes: &[IndexSet]) -> RelationTable {
    let kept_rows: Vec<usize> = row_classes.iter().filter_map(IndexSet::first).collect();
    let kept_columns: Vec<usize> = column_classes.iter().filter_map(IndexSet::first).collect();

    let object_names: Vec<String> = kept_rows
        .iter()
        .map(|&i| table.object_names()[i].clone())
        .collect();
    let attribute_names: Vec<String> = kept_columns
        .iter()
        .map(|&j| table.attribute_names()[j].clone())
        .collect();

    let mut cells = Vec::with_capacity(kept_rows.len() * kept_columns.len());
    for &i in &kept_rows {
        let row = table.row_unchecked(i);
        cells.extend(kept_columns.iter().map(|&j| row[j]));
    }

    RelationTable::from_parts(
        object_names,
        attribute_names,
        cells,
        table.description_paths().to_vec(),
    )
}

fn singletons(count: usize) -> Vec<IndexSet> {
    (0..count).map(|i| IndexSet::from_sorted(alloc::vec![i])).collect()
}

// ─── Tests ────────────────────────────────────────────────────────────────

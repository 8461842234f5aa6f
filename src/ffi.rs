//! Python FFI bindings via PyO3.
//!
//! Exposes table construction, clarification and concept generation.
//! Concepts cross the boundary as plain `(extent, intent, kind)` tuples of
//! index lists and a kind name.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from fca_core import RelationTable, generate
//!
//! table = RelationTable(
//!     [[1, 0, 1], [1, 1, 0], [1, 0, 1]],
//!     object_names=["duck", "dog", "goose"],
//!     attribute_names=["animal", "barks", "flies"],
//! )
//! small = table.clarify()
//! print(small.object_count)          # 2
//! for extent, intent, kind in generate(small, strategy="inclose"):
//!     print(extent, intent, kind)
//! ```

use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

use crate::error::FcaError;
use crate::generator::{ConceptGenerator, Strategy};
use crate::table::{RelationTable, TableBuilder};

/// One concept as seen from Python.
type PyConcept = (Vec<usize>, Vec<usize>, &'static str);

fn to_py_err(err: FcaError) -> PyErr {
    if err.is_out_of_bounds() {
        PyIndexError::new_err(err.to_string())
    } else {
        PyValueError::new_err(err.to_string())
    }
}

// ── RelationTable ─────────────────────────────────────────────────────────────

/// Object × attribute table of real-valued cells.
///
/// A cell relates its object and attribute when its value exceeds the
/// threshold passed to each query (default 0.0).
#[pyclass(name = "RelationTable")]
#[derive(Clone)]
pub struct PyRelationTable {
    inner: RelationTable,
}

#[pymethods]
impl PyRelationTable {
    /// Build a table from a list of equal-length rows.
    ///
    /// Args:
    ///     matrix:          list of rows, one per object
    ///     object_names:    optional labels (default x1..xn)
    ///     attribute_names: optional labels (default y1..ym)
    #[new]
    #[pyo3(signature = (matrix, object_names=None, attribute_names=None))]
    pub fn new(
        matrix: Vec<Vec<f64>>,
        object_names: Option<Vec<String>>,
        attribute_names: Option<Vec<String>>,
    ) -> PyResult<Self> {
        let mut builder = TableBuilder::from_matrix(matrix);
        if let Some(names) = object_names {
            builder = builder.object_names(names);
        }
        if let Some(names) = attribute_names {
            builder = builder.attribute_names(names);
        }
        let inner = builder.build().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Number of objects (rows).
    #[getter]
    pub fn object_count(&self) -> usize {
        self.inner.object_count()
    }

    /// Number of attributes (columns).
    #[getter]
    pub fn attribute_count(&self) -> usize {
        self.inner.attribute_count()
    }

    /// Object labels.
    #[getter]
    pub fn object_names(&self) -> Vec<String> {
        self.inner.object_names().to_vec()
    }

    /// Attribute labels.
    #[getter]
    pub fn attribute_names(&self) -> Vec<String> {
        self.inner.attribute_names().to_vec()
    }

    /// True if the cell at (object, attribute) exceeds `threshold`.
    ///
    /// Raises IndexError for an index outside the table.
    #[pyo3(signature = (object, attribute, threshold=0.0))]
    pub fn has_relation(&self, object: usize, attribute: usize, threshold: f64) -> PyResult<bool> {
        self.inner
            .has_relation(object, attribute, threshold)
            .map_err(to_py_err)
    }

    /// A new table with duplicate rows and columns removed.
    pub fn clarify(&self) -> Self {
        Self {
            inner: self.inner.clarify(),
        }
    }

    /// The cells as a list of rows.
    pub fn to_matrix(&self) -> Vec<Vec<f64>> {
        self.inner.to_matrix()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!(
            "RelationTable(objects={}, attributes={})",
            self.inner.object_count(),
            self.inner.attribute_count()
        )
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

/// Enumerate the concepts of `table`.
///
/// Args:
///     table:     a RelationTable
///     strategy:  "naive", "attribute_intersection", "object_intersection"
///                or "inclose" (default)
///     threshold: membership threshold (default 0.0)
///
/// Returns:
///     list of (extent, intent, kind) tuples
#[pyfunction]
#[pyo3(signature = (table, strategy="inclose", threshold=0.0))]
pub fn generate(table: &PyRelationTable, strategy: &str, threshold: f64) -> PyResult<Vec<PyConcept>> {
    let strategy: Strategy = strategy.parse().map_err(to_py_err)?;
    let concepts = strategy.generate(&table.inner, threshold).map_err(to_py_err)?;
    Ok(concepts
        .into_iter()
        .map(|c| {
            let kind = c.kind().as_str();
            let (extent, intent) = c.into_parts();
            (extent.into_set().into(), intent.into_set().into(), kind)
        })
        .collect())
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Formal concept analysis over real-valued relation tables.
#[pymodule]
pub fn fca_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRelationTable>()?;
    m.add_function(wrap_pyfunction!(generate, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

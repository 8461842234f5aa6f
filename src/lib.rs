//! # fca-core
//!
//! Formal Concept Analysis over real-valued relation tables.
//!
//! ---
//!
//! ## What a concept is
//!
//! A relation table records, for every object and attribute, a real value.
//! At a threshold `t` an object *has* an attribute when its cell exceeds `t`.
//! Two derivation operators connect the sides:
//!
//! - `A′` — the attributes every object in `A` has
//! - `B′` — the objects having every attribute in `B`
//!
//! A **formal concept** is a pair `(A, B)` with `A′ = B` and `B′ = A`: a
//! maximal group of objects sharing a maximal set of attributes. Pairs closed
//! on only one side are **semi-concepts**; pairs with weak two-way
//! containment are **pre-concepts**.
//!
//! ---
//!
//! ## The pipeline
//!
//! ```text
//! RelationTable → Clarifier → ConceptStore ← ConceptGenerator
//!       ↑             ↓             ↑              ↑
//!  TableBuilder ClarifierResult  ConceptKind   Strategy (naive,
//!                (expand back)  (classify)    intersections, InClose)
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`error`] | [`FcaError`], [`FcaResult`] | Argument and bounds errors |
//! | [`index_set`] | [`IndexSet`], [`Extent`], [`Intent`], [`PowerSet`] | Sorted index sets and lazy power sets |
//! | [`table`] | [`RelationTable`], [`TableBuilder`] | The object × attribute table |
//! | [`derivation`] | [`Derivation`] | `A′`, `B′` and their closures |
//! | [`concept`] | [`Concept`], [`ConceptKind`], [`DiscoveryTag`] | Concepts and the kind classifier |
//! | [`clarifier`] | [`Clarifier`], [`ClarifierResult`] | Duplicate row/column removal |
//! | [`store`] | [`ConceptStore`] | Table plus kind-partitioned concepts |
//! | [`generator`] | [`ConceptGenerator`], [`Strategy`] | Four enumeration strategies |
//! | [`analysis`] | [`Analysis`], [`AnalysisConfig`] | Clarify-then-generate in one call |
//!
//! ## Example
//!
//! ```rust
//! use fca_core::{ConceptStore, RelationTable, Strategy};
//!
//! let table = RelationTable::from_matrix(vec![
//!     vec![1.0, 1.0, 0.0],
//!     vec![1.0, 0.0, 1.0],
//! ])
//! .unwrap();
//! let mut store = ConceptStore::new(table);
//! store.generate(&Strategy::InClose, 0.0).unwrap();
//! assert_eq!(store.formal_concepts().len(), 4);
//! ```
//!
//! ## `no_std`
//!
//! The crate is `#![no_std]` with `alloc` by default. Enable `std` for
//! `std::error::Error` interop, `serde` for serialisation derives, and
//! `python-ffi` for the PyO3 module.
//!
//! ## License
//!
//! Business Source License 1.1.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi", test)), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod error;
pub mod index_set;
pub mod table;
pub mod derivation;
pub mod concept;
pub mod clarifier;
pub mod store;
pub mod generator;
pub mod analysis;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use analysis::{Analysis, AnalysisConfig, AnalysisOutcome};
pub use clarifier::{Clarifier, ClarifierConfig, ClarifierResult};
pub use concept::{classify, Concept, ConceptKind, DiscoveryTag, TOP_TAG};
pub use derivation::{attributes_of, objects_of, Derivation};
pub use error::{FcaError, FcaResult};
pub use generator::{
    AttributeIntersection, ConceptGenerator, InClose, Naive, ObjectIntersection, Strategy,
};
pub use index_set::{Extent, IndexSet, Intent, PowerSet};
pub use store::ConceptStore;
pub use table::{RelationTable, TableBuilder};

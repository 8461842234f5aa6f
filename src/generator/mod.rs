/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Concept generators — four ways to enumerate the concepts of a table.
//!
//! Every strategy implements [`ConceptGenerator`]. A generator reads the
//! table, returns the concepts it found, and never mutates anything; the
//! [`ConceptStore`](crate::store::ConceptStore) registers the result.
//!
//! | Strategy | Module | Produces |
//! |---|---|---|
//! | [`Naive`] | `naive` | formal and semi concepts of every object subset |
//! | [`AttributeIntersection`] | `attribute_intersection` | formal concepts, closed under extent intersection |
//! | [`ObjectIntersection`] | `object_intersection` | formal concepts, closed under intent intersection |
//! | [`InClose`] | `in_close` | formal concepts, each extent exactly once |
//!
//! All four agree on the set of formal concepts for the same table and
//! threshold. Each tags the concept whose extent is every object with
//! [`TOP_TAG`](crate::concept::TOP_TAG).

use core::fmt;
use core::str::FromStr;

use alloc::vec::Vec;

use crate::concept::Concept;
use crate::derivation::Derivation;
use crate::error::{FcaError, FcaResult};
use crate::table::RelationTable;

pub mod attribute_intersection;
pub mod in_close;
pub mod naive;
pub mod object_intersection;

pub use attribute_intersection::AttributeIntersection;
pub use in_close::InClose;
pub use naive::Naive;
pub use object_intersection::ObjectIntersection;

// ─── ConceptGenerator ────────────────────────────────────────────────────────

/// A concept enumeration strategy.
///
/// Implementors validate their inputs before producing anything: a table
/// with no objects or attributes, or a non-finite threshold, is an
/// [`FcaError::InvalidArgument`].
pub trait ConceptGenerator {
    /// Which strategy this is, for logging and dispatch.
    fn strategy(&self) -> Strategy;

    /// Enumerate concepts of `table` at `threshold`.
    fn generate(&self, table: &RelationTable, threshold: f64) -> FcaResult<Vec<Concept>>;
}

/// Shared input validation; returns the bound derivation operators.
pub(crate) fn prepare(table: &RelationTable, threshold: f64) -> FcaResult<Derivation<'_>> {
    if table.object_count() == 0 || table.attribute_count() == 0 {
        return Err(FcaError::invalid("relation table has no objects or no attributes"));
    }
    Derivation::new(table, threshold)
}

// ─── Strategy ────────────────────────────────────────────────────────────────

/// Runtime selector over the four generators.
///
/// `Strategy` itself implements [`ConceptGenerator`] by dispatching to the
/// matching unit struct, so configuration can carry a plain enum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Classify every subset of the object set.
    Naive,
    /// Close the seed concepts under intersection with attribute extents.
    AttributeIntersection,
    /// Close the seed concepts under intersection with object intents.
    ObjectIntersection,
    /// Canonical depth-first enumeration.
    #[default]
    InClose,
}

impl Strategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Naive,
        Strategy::AttributeIntersection,
        Strategy::ObjectIntersection,
        Strategy::InClose,
    ];

    /// The generator this variant selects.
    pub fn generator(self) -> &'static dyn ConceptGenerator {
        match self {
            Strategy::Naive => &Naive,
            Strategy::AttributeIntersection => &AttributeIntersection,
            Strategy::ObjectIntersection => &ObjectIntersection,
            Strategy::InClose => &InClose,
        }
    }

    /// Snake-case name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Naive => "naive",
            Strategy::AttributeIntersection => "attribute_intersection",
            Strategy::ObjectIntersection => "object_intersection",
            Strategy::InClose => "inclose",
        }
    }
}

impl ConceptGenerator for Strategy {
    fn strategy(&self) -> Strategy {
        *self
    }

    fn generate(&self, table: &RelationTable, threshold: f64) -> FcaResult<Vec<Concept>> {
        self.generator().generate(table, threshold)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = FcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "naive" => Ok(Strategy::Naive),
            "attribute_intersection" | "attribute" => Ok(Strategy::AttributeIntersection),
            "object_intersection" | "object" => Ok(Strategy::ObjectIntersection),
            "inclose" | "in_close" => Ok(Strategy::InClose),
            other => Err(FcaError::invalid(alloc::format!("unknown strategy `{other}`"))),
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

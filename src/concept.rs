/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Concepts and the concept-type classifier.
//!
//! A candidate pair `(A, B)` is classified by comparing it with its images
//! under the derivation operators, `A′` and `B′`:
//!
//! ```text
//!   x = (A′ = B)          closed on the intent side
//!   y = (B′ = A)          closed on the extent side
//!
//!   x ∧ y                 → Formal   (Galois fixed point)
//!   x ⊕ y                 → Semi     (closed on exactly one side)
//!   B ⊇ A′ ∧ A ⊇ B′       → Pre      (weak two-way containment)
//!   otherwise             → Unknown
//! ```
//!
//! # Invariants
//! - **Formal ⇒ fixed point** — `A′ = B` and `B′ = A`
//! - **Set equality** — concepts compare and hash by `(extent, intent)` only;
//!   kind and discovery tag are metadata

use core::fmt;
use core::hash::{Hash, Hasher};

use crate::derivation::Derivation;
use crate::error::{FcaError, FcaResult};
use crate::index_set::{Extent, Intent};
use crate::table::RelationTable;

// ─── ConceptKind ─────────────────────────────────────────────────────────────

/// Closure class of an (extent, intent) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConceptKind {
    /// Mutual fixed point of the derivation operators.
    Formal,
    /// Closed on exactly one side.
    Semi,
    /// Two-way containment without equality.
    Pre,
    /// None of the above.
    Unknown,
}

impl ConceptKind {
    /// Kinds a [`ConceptStore`](crate::store::ConceptStore) keeps a partition for.
    pub const STORED: [ConceptKind; 3] = [ConceptKind::Formal, ConceptKind::Semi, ConceptKind::Pre];

    /// Classify `(extent, intent)` against `table` at `threshold`.
    ///
    /// Fails on a non-finite threshold or on indices outside the table.
    pub fn classify(
        table: &RelationTable,
        extent: &Extent,
        intent: &Intent,
        threshold: f64,
    ) -> FcaResult<ConceptKind> {
        let derivation = Derivation::new(table, threshold)?;
        let a_opr = derivation.attributes_of(extent)?;
        let b_opr = derivation.objects_of(intent)?;
        Ok(Self::from_images(extent, intent, &a_opr, &b_opr))
    }

    /// Decide the kind from a pair and its derivation images `A′`, `B′`.
    pub(crate) fn from_images(extent: &Extent, intent: &Intent, a_opr: &Intent, b_opr: &Extent) -> ConceptKind {
        let b_superset_a_opr = intent.is_superset(a_opr);
        let a_superset_b_opr = extent.is_superset(b_opr);
        let x = a_opr.is_superset(intent) && b_superset_a_opr;
        let y = b_opr.is_superset(extent) && a_superset_b_opr;

        match (x, y) {
            (true, true) => ConceptKind::Formal,
            (true, false) | (false, true) => ConceptKind::Semi,
            _ if b_superset_a_opr && a_superset_b_opr => ConceptKind::Pre,
            _ => ConceptKind::Unknown,
        }
    }

    /// Short lowercase name, used by the Python bindings and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConceptKind::Formal => "formal",
            ConceptKind::Semi => "semi",
            ConceptKind::Pre => "pre",
            ConceptKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ConceptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify `(extent, intent)`; see [`ConceptKind::classify`].
pub fn classify(
    table: &RelationTable,
    extent: &Extent,
    intent: &Intent,
    threshold: f64,
) -> FcaResult<ConceptKind> {
    ConceptKind::classify(table, extent, intent, threshold)
}

// ─── DiscoveryTag ────────────────────────────────────────────────────────────

/// Sequence marker distinguishing the top concept deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscoveryTag(pub usize);

/// Tag carried by the top concept (extent = every object).
pub const TOP_TAG: DiscoveryTag = DiscoveryTag(0);

// ─── Concept ─────────────────────────────────────────────────────────────────

/// An (extent, intent) pair with its kind and optional discovery tag.
///
/// Immutable once built; generators hand concepts to the store by value.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Concept {
    extent: Extent,
    intent: Intent,
    kind: ConceptKind,
    tag: Option<DiscoveryTag>,
}

impl Concept {
    /// A concept of the given kind.
    pub fn new(extent: Extent, intent: Intent, kind: ConceptKind) -> Self {
        Self { extent, intent, kind, tag: None }
    }

    /// A formal concept. The caller vouches for the fixed-point property;
    /// [`Concept::verify_formal`] checks it.
    pub fn formal(extent: Extent, intent: Intent) -> Self {
        Self::new(extent, intent, ConceptKind::Formal)
    }

    /// The same concept carrying `tag`.
    pub fn with_tag(mut self, tag: DiscoveryTag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Objects of the concept.
    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    /// Attributes of the concept.
    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    /// Closure class.
    pub fn kind(&self) -> ConceptKind {
        self.kind
    }

    /// Discovery tag, present only on the top concept.
    pub fn tag(&self) -> Option<DiscoveryTag> {
        self.tag
    }

    /// True if this concept's extent is all `object_count` objects.
    pub fn is_top(&self, object_count: usize) -> bool {
        self.extent.len() == object_count
    }

    /// Re-derive the kind against `table` and fail if this concept claims
    /// to be formal but is not a fixed point.
    pub fn verify_formal(&self, table: &RelationTable, threshold: f64) -> FcaResult<()> {
        let actual = ConceptKind::classify(table, &self.extent, &self.intent, threshold)?;
        if actual != ConceptKind::Formal {
            return Err(FcaError::invalid(alloc::format!(
                "({}, {}) is {actual}, not formal",
                self.extent, self.intent
            )));
        }
        Ok(())
    }

    /// Split into `(extent, intent)`.
    pub fn into_parts(self) -> (Extent, Intent) {
        (self.extent, self.intent)
    }
}

impl PartialEq for Concept {
    fn eq(&self, other: &Self) -> bool {
        self.extent == other.extent && self.intent == other.intent
    }
}

impl Eq for Concept {}

impl Hash for Concept {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.extent.hash(state);
        self.intent.hash(state);
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) [{}]", self.extent, self.intent, self.kind)?;
        if let Some(DiscoveryTag(n)) = self.tag {
            write!(f, " #{n}")?;
        }
        Ok(())
    }
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

    fn kind(t: &RelationTable, e: &[usize], i: &[usize]) -> ConceptKind {
        classify(
            t,
            &e.iter().copied().collect(),
            &i.iter().copied().collect(),
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn test_formal_concepts_classified_formal() {
        let t = reference();
        assert_eq!(kind(&t, &[1, 3], &[0, 1, 2, 3]), ConceptKind::Formal);
        assert_eq!(kind(&t, &[1, 2, 3], &[1, 2]), ConceptKind::Formal);
        assert_eq!(kind(&t, &[1, 2, 3, 5], &[1]), ConceptKind::Formal);
        assert_eq!(kind(&t, &[0, 1, 2, 3, 4, 5], &[]), ConceptKind::Formal);
    }

    #[test]
    fn test_semi_concept_closed_on_one_side() {
        let t = reference();
        // A′ = {1,2} = B, but B′ = {1,2,3} ≠ A.
        assert_eq!(kind(&t, &[1, 2], &[1, 2]), ConceptKind::Semi);
        assert_eq!(kind(&t, &[2], &[1, 2]), ConceptKind::Semi);
    }

    #[test]
    fn test_pre_concept_weak_containment() {
        let t = reference();
        // A′ = {} ⊆ B and B′ = {1,2,3,5} ⊆ A, neither equal.
        assert_eq!(kind(&t, &[0, 1, 2, 3, 5], &[1]), ConceptKind::Pre);
    }

    #[test]
    fn test_unknown_when_no_containment() {
        let t = reference();
        // A = {0}, B = {0}: A′ = {} ≠ B; B′ = {1,3} ⊄ A.
        assert_eq!(kind(&t, &[0], &[0]), ConceptKind::Unknown);
    }

    #[test]
    fn test_classify_rejects_out_of_range() {
        let t = reference();
        let err = classify(&t, &Extent::from_iter([9]), &Intent::new(), 0.0).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert!(classify(&t, &Extent::new(), &Intent::new(), f64::INFINITY).is_err());
    }

    #[test]
    fn test_equality_ignores_kind_and_tag() {
        let a = Concept::formal(Extent::from_iter([0, 1]), Intent::new()).with_tag(TOP_TAG);
        let b = Concept::new(Extent::from_iter([1, 0]), Intent::new(), ConceptKind::Semi);
        assert_eq!(a, b);
        assert_eq!(a.tag(), Some(DiscoveryTag(0)));
        assert_eq!(b.tag(), None);
    }

    #[test]
    fn test_verify_formal() {
        let t = reference();
        assert!(Concept::formal(Extent::from_iter([1, 3]), Intent::from_iter(0..4))
            .verify_formal(&t, 0.0)
            .is_ok());
        assert!(Concept::formal(Extent::from_iter([1, 2]), Intent::from_iter([1, 2]))
            .verify_formal(&t, 0.0)
            .is_err());
    }

    #[test]
    fn test_display() {
        let c = Concept::formal(Extent::from_iter([0, 1]), Intent::new()).with_tag(TOP_TAG);
        assert_eq!(alloc::format!("{c}"), "({0, 1}, {}) [formal] #0");
    }
}

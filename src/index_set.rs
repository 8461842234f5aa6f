//! Index sets — the extents and intents of a formal context.
//!
//! An [`IndexSet`] is an unordered, duplicate-free set of zero-based indices.
//! Internally it is a sorted `Vec<usize>`, which gives a canonical form: two
//! sets are equal (and hash equally) iff they hold the same indices,
//! regardless of insertion order.
//!
//! [`Extent`] and [`Intent`] are thin newtypes so that object sets and
//! attribute sets cannot be mixed up at the type level.
//!
//! # Invariants
//! - **Sorted + unique** — every constructor and mutator preserves it
//! - **`is_empty` means empty** — true iff the set holds no index

use alloc::vec::Vec;
use core::fmt;
use core::ops::Deref;

use crate::error::{FcaError, FcaResult};

/// Largest universe [`PowerSet`] will enumerate (bitmask counter width).
pub const MAX_POWER_SET_UNIVERSE: usize = 63;

// ─── IndexSet ────────────────────────────────────────────────────────────────

/// Canonical set of zero-based indices.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<usize>", into = "Vec<usize>"))]
pub struct IndexSet {
    indices: Vec<usize>,
}

impl IndexSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self { indices: Vec::new() }
    }

    /// The full universe `{0, 1, …, count - 1}`.
    pub fn universe(count: usize) -> Self {
        Self { indices: (0..count).collect() }
    }

    /// Build from an already sorted, duplicate-free vector.
    ///
    /// Callers in this crate produce such vectors by scanning indices in
    /// ascending order; debug builds verify it.
    pub(crate) fn from_sorted(indices: Vec<usize>) -> Self {
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        Self { indices }
    }

    /// Insert an index. Returns `true` if it was not already present.
    pub fn insert(&mut self, index: usize) -> bool {
        match self.indices.binary_search(&index) {
            Ok(_) => false,
            Err(pos) => {
                self.indices.insert(pos, index);
                true
            }
        }
    }

    /// Remove an index. Returns `true` if it was present.
    pub fn remove(&mut self, index: usize) -> bool {
        match self.indices.binary_search(&index) {
            Ok(pos) => {
                self.indices.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Membership test.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Number of indices in the set.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True iff the set holds no index.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Smallest index, if any.
    pub fn first(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    /// Largest index, if any.
    pub fn last(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Ascending iterator over the indices.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// The indices as an ascending slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    /// `self ⊇ other`.
    pub fn is_superset(&self, other: &IndexSet) -> bool {
        other.is_subset(self)
    }

    /// `self ⊆ other`. Linear merge over both sorted vectors.
    pub fn is_subset(&self, other: &IndexSet) -> bool {
        if self.len() > other.len() {
            return false;
        }
        let mut theirs = other.indices.iter();
        'outer: for &mine in &self.indices {
            for &t in theirs.by_ref() {
                if t == mine {
                    continue 'outer;
                }
                if t > mine {
                    return false;
                }
            }
            return false;
        }
        true
    }

    /// `self ∩ other`.
    pub fn intersection(&self, other: &IndexSet) -> IndexSet {
        let (mut i, mut j) = (0, 0);
        let mut out = Vec::with_capacity(self.len().min(other.len()));
        while i < self.indices.len() && j < other.indices.len() {
            let (a, b) = (self.indices[i], other.indices[j]);
            if a == b {
                out.push(a);
                i += 1;
                j += 1;
            } else if a < b {
                i += 1;
            } else {
                j += 1;
            }
        }
        IndexSet { indices: out }
    }

    /// `self ∪ other`.
    pub fn union(&self, other: &IndexSet) -> IndexSet {
        let (mut i, mut j) = (0, 0);
        let mut out = Vec::with_capacity(self.len() + other.len());
        while i < self.indices.len() && j < other.indices.len() {
            let (a, b) = (self.indices[i], other.indices[j]);
            if a == b {
                out.push(a);
                i += 1;
                j += 1;
            } else if a < b {
                out.push(a);
                i += 1;
            } else {
                out.push(b);
                j += 1;
            }
        }
        out.extend_from_slice(&self.indices[i..]);
        out.extend_from_slice(&other.indices[j..]);
        IndexSet { indices: out }
    }

    /// Fail with the first index that is not below `bound`.
    pub(crate) fn check_bound(
        &self,
        bound: usize,
        err: impl FnOnce(usize) -> FcaError,
    ) -> FcaResult<()> {
        match self.last() {
            Some(max) if max >= bound => Err(err(max)),
            _ => Ok(()),
        }
    }
}

impl FromIterator<usize> for IndexSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut indices: Vec<usize> = iter.into_iter().collect();
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }
}

impl From<Vec<usize>> for IndexSet {
    fn from(indices: Vec<usize>) -> Self {
        indices.into_iter().collect()
    }
}

impl From<IndexSet> for Vec<usize> {
    fn from(set: IndexSet) -> Self {
        set.indices
    }
}

impl<'a> IntoIterator for &'a IndexSet {
    type Item = usize;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter().copied()
    }
}

impl fmt::Debug for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.indices.iter()).finish()
    }
}

impl fmt::Display for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (n, i) in self.indices.iter().enumerate() {
            if n > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{i}")?;
        }
        f.write_str("}")
    }
}

// ─── Extent / Intent ─────────────────────────────────────────────────────────

macro_rules! index_set_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(IndexSet);

        impl $name {
            /// Create an empty set.
            pub fn new() -> Self {
                Self(IndexSet::new())
            }

            /// Wrap an existing index set.
            pub fn from_set(set: IndexSet) -> Self {
                Self(set)
            }

            /// Unwrap into the underlying index set.
            pub fn into_set(self) -> IndexSet {
                self.0
            }

            /// Borrow the underlying index set.
            pub fn as_set(&self) -> &IndexSet {
                &self.0
            }

            /// Insert an index. Returns `true` if it was not already present.
            pub fn insert(&mut self, index: usize) -> bool {
                self.0.insert(index)
            }

            /// Intersection, or `None` when it is empty.
            pub fn intersect(&self, other: &Self) -> Option<Self> {
                let shared = self.0.intersection(&other.0);
                if shared.is_empty() {
                    None
                } else {
                    Some(Self(shared))
                }
            }
        }

        impl Deref for $name {
            type Target = IndexSet;

            fn deref(&self) -> &IndexSet {
                &self.0
            }
        }

        impl From<IndexSet> for $name {
            fn from(set: IndexSet) -> Self {
                Self(set)
            }
        }

        impl FromIterator<usize> for $name {
            fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&self.0, f)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

index_set_newtype!(
    /// A set of object indices.
    Extent
);

index_set_newtype!(
    /// A set of attribute indices.
    Intent
);

// ─── PowerSet ────────────────────────────────────────────────────────────────

/// Lazy enumeration of every subset of `{0, …, n - 1}`.
///
/// Subsets are produced in bitmask order: the empty set first, the full set
/// last. Nothing is materialised beyond the subset currently yielded.
#[derive(Clone, Debug)]
pub struct PowerSet {
    size: usize,
    next_mask: u64,
    end_mask: u64,
}

impl PowerSet {
    /// Power set of a universe with `size` elements.
    ///
    /// Fails with [`FcaError::InvalidArgument`] above
    /// [`MAX_POWER_SET_UNIVERSE`] elements.
    pub fn new(size: usize) -> FcaResult<Self> {
        if size > MAX_POWER_SET_UNIVERSE {
            return Err(FcaError::invalid(alloc::format!(
                "power set universe of {size} exceeds {MAX_POWER_SET_UNIVERSE} elements"
            )));
        }
        Ok(Self {
            size,
            next_mask: 0,
            end_mask: 1u64 << size,
        })
    }

    /// Total number of subsets, `2^size`.
    pub fn subset_count(&self) -> u64 {
        self.end_mask
    }
}

impl Iterator for PowerSet {
    type Item = IndexSet;

    fn next(&mut self) -> Option<IndexSet> {
        if self.next_mask >= self.end_mask {
            return None;
        }
        let mask = self.next_mask;
        self.next_mask += 1;
        let indices = (0..self.size).filter(|i| (mask >> i) & 1 == 1).collect();
        Some(IndexSet::from_sorted(indices))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end_mask - self.next_mask).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn set(v: &[usize]) -> IndexSet {
        v.iter().copied().collect()
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut a = IndexSet::new();
        a.insert(3);
        a.insert(1);
        a.insert(2);
        assert_eq!(a, set(&[1, 2, 3]));
        assert_eq!(a.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_insert_duplicate_is_noop() {
        let mut a = IndexSet::new();
        assert!(a.insert(0));
        assert!(!a.insert(0));
        assert_eq!(a.len(), 1);
        assert!(a.contains(0));
    }

    #[test]
    fn test_is_empty_means_empty() {
        // Pinned explicitly: an empty set reports empty, a non-empty one does not.
        let mut a = IndexSet::new();
        assert!(a.is_empty());
        a.insert(5);
        assert!(!a.is_empty());
        assert!(!Extent::from_iter([0]).is_empty());
        assert!(Intent::new().is_empty());
    }

    #[test]
    fn test_subset_and_superset() {
        let a = set(&[1, 3]);
        let b = set(&[0, 1, 2, 3]);
        assert!(a.is_subset(&b));
        assert!(b.is_superset(&a));
        assert!(!b.is_subset(&a));
        assert!(IndexSet::new().is_subset(&a));
        assert!(!set(&[1, 4]).is_subset(&b));
        assert!(!set(&[5]).is_subset(&b));
    }

    #[test]
    fn test_intersection_and_union() {
        let a = set(&[0, 2, 4, 6]);
        let b = set(&[1, 2, 3, 4]);
        assert_eq!(a.intersection(&b), set(&[2, 4]));
        assert_eq!(a.union(&b), set(&[0, 1, 2, 3, 4, 6]));
    }

    #[test]
    fn test_newtype_intersect_returns_none_when_empty() {
        let a = Extent::from_iter([0, 1]);
        let b = Extent::from_iter([2, 3]);
        assert_eq!(a.intersect(&b), None);
        let c = Extent::from_iter([1, 2]);
        assert_eq!(a.intersect(&c), Some(Extent::from_iter([1])));
    }

    #[test]
    fn test_universe() {
        assert_eq!(IndexSet::universe(4), set(&[0, 1, 2, 3]));
        assert!(IndexSet::universe(0).is_empty());
    }

    #[test]
    fn test_power_set_enumerates_every_subset_once() {
        let subsets: Vec<IndexSet> = PowerSet::new(3).unwrap().collect();
        assert_eq!(subsets.len(), 8);
        assert_eq!(subsets[0], IndexSet::new());
        assert_eq!(subsets[7], set(&[0, 1, 2]));
        let mut sorted = subsets.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 8);
    }

    #[test]
    fn test_power_set_rejects_oversized_universe() {
        assert!(PowerSet::new(MAX_POWER_SET_UNIVERSE).is_ok());
        assert!(matches!(
            PowerSet::new(MAX_POWER_SET_UNIVERSE + 1),
            Err(FcaError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_power_set_size_hint_never_truncates() {
        let mut small = PowerSet::new(3).unwrap();
        assert_eq!(small.size_hint(), (8, Some(8)));
        small.next();
        assert_eq!(small.size_hint(), (7, Some(7)));

        let large = PowerSet::new(MAX_POWER_SET_UNIVERSE).unwrap();
        let (lower, upper) = large.size_hint();
        let total = large.subset_count();
        assert_eq!(upper, usize::try_from(total).ok());
        assert_eq!(lower as u64, total.min(usize::MAX as u64));
    }

    #[test]
    fn test_display() {
        assert_eq!(alloc::format!("{}", set(&[3, 1])), "{1, 3}");
        assert_eq!(alloc::format!("{}", Intent::new()), "{}");
    }
}

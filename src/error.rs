//! Error taxonomy for the FCA core.
//!
//! Every failure in this crate is a caller programming error against a pure
//! in-memory structure, so nothing here is retryable. Operations fail before
//! they mutate anything.

use alloc::string::String;

use thiserror::Error;

/// Errors raised by table construction, derivation, classification and generation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FcaError {
    /// Malformed construction parameters, empty name lists, mismatched
    /// dimensions, or an out-of-range threshold.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Human-readable description of the offending argument.
        reason: String,
    },

    /// A cell query addressed a position outside the table.
    #[error(
        "out of bounds: object index = {object}, attribute index = {attribute}, \
         object count = {object_count}, attribute count = {attribute_count}"
    )]
    OutOfBounds {
        /// Requested object (row) index.
        object: usize,
        /// Requested attribute (column) index.
        attribute: usize,
        /// Number of objects in the table.
        object_count: usize,
        /// Number of attributes in the table.
        attribute_count: usize,
    },

    /// An object index outside `[0, object_count)`.
    #[error(
        "object index {index} out of bounds \
         (object count = {object_count}, attribute count = {attribute_count})"
    )]
    ObjectOutOfBounds {
        /// Offending object index.
        index: usize,
        /// Number of objects in the table.
        object_count: usize,
        /// Number of attributes in the table.
        attribute_count: usize,
    },

    /// An attribute index outside `[0, attribute_count)`.
    #[error(
        "attribute index {index} out of bounds \
         (object count = {object_count}, attribute count = {attribute_count})"
    )]
    AttributeOutOfBounds {
        /// Offending attribute index.
        index: usize,
        /// Number of objects in the table.
        object_count: usize,
        /// Number of attributes in the table.
        attribute_count: usize,
    },
}

impl FcaError {
    /// Shorthand for [`FcaError::InvalidArgument`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        FcaError::InvalidArgument { reason: reason.into() }
    }

    /// True for any of the out-of-bounds variants.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            FcaError::OutOfBounds { .. }
                | FcaError::ObjectOutOfBounds { .. }
                | FcaError::AttributeOutOfBounds { .. }
        )
    }
}

/// Result type for FCA operations.
pub type FcaResult<T> = Result<T, FcaError>;

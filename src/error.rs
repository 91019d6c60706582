use alloc::string::String;
use alloc::vec::Vec;

/// Error raised when bounding volumes, or a request to build a hierarchy over them, are malformed.
///
/// Every variant describes a precondition violation. They are all detected before any
/// numeric work starts, so a failed call never produces partial results.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum VolumeError {
    /// The bounding volume kind tag is neither `aabb` nor `sphere`.
    #[error("unknown bounding volume kind `{0}`.")]
    InvalidVolumeKind(String),
    /// The last dimension of an array does not match the degrees of freedom of its volume kind.
    #[error("`{name}` must have a last dimension of size {expected}, found {found}.")]
    DimensionMismatch {
        /// The name of the offending input.
        name: &'static str,
        /// The degrees of freedom of the volume kind.
        expected: usize,
        /// The actual size of the last dimension.
        found: usize,
    },
    /// An array has fewer dimensions than the operation requires.
    #[error("`{name}` must have a rank of at least {expected}, found {found}.")]
    InsufficientRank {
        /// The name of the offending input.
        name: &'static str,
        /// The minimum rank accepted by the operation.
        expected: usize,
        /// The actual rank.
        found: usize,
    },
    /// Two arrays processed together do not have the same shape.
    #[error("`{name}` has shape {found:?} but shape {expected:?} was expected.")]
    ShapeMismatch {
        /// The name of the offending input.
        name: &'static str,
        /// The shape of the reference input.
        expected: Vec<usize>,
        /// The shape of the offending input.
        found: Vec<usize>,
    },
    /// The number of elements of an array does not match the product of its shape.
    #[error("`{name}` holds {found} elements but its shape requires {expected}.")]
    LengthMismatch {
        /// The name of the offending input.
        name: &'static str,
        /// The product of the shape.
        expected: usize,
        /// The actual number of elements.
        found: usize,
    },
    /// A scalar argument is out of its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The union of an empty set of bounding volumes was requested.
    #[error("cannot compute the union of an empty set of bounding volumes.")]
    EmptyVolumeSet,
}

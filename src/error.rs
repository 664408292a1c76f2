use std::collections::TryReserveError;

/// Hard failures of frame and transform operations.
///
/// Incompatibility between frames is never an error:
/// matching and selection report it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Scratch space for a match attempt could not be allocated.
    #[error("failed to allocate scratch space: {0}")]
    Allocation(#[from] TryReserveError),

    /// An axis permutation array is not a bijection.
    #[error("invalid axis permutation: {0}")]
    InvalidPermutation(String),

    /// An axis index refers to an axis which does not exist.
    #[error("invalid axis {axis} for frame with {naxes} axes")]
    AxisOutOfRange { axis: usize, naxes: usize },

    /// Transformations of incompatible dimensionality were combined.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Parallel axis selection arrays do not have the same length.
    #[error("axis selection length mismatch: expected {expected}, found {found}")]
    SelectionLength { expected: usize, found: usize },

    /// A transformation could not be constructed from the given parameters.
    #[error("invalid transformation: {0}")]
    InvalidTransform(String),
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

//! Matching of (possibly compound) coordinate frames.
//!
//! A [Frame] describes a coordinate system.
//! Matching a *template* frame against a *target* frame decides whether the target's axes
//! can be reinterpreted (and reordered) to satisfy the template;
//! if so, it produces a [Transformation] from target coordinates into the resulting frame,
//! along with records of which template and target axis each result axis came from.
//!
//! [CompoundFrame]s join two component frames and match by trying every way of
//! splitting the target's axes between their components.
use smallvec::SmallVec;

mod error;
pub use error::{Error, Result};

mod traits;
pub use traits::{Frame, FrameMatch, SubFrame, Transformation};

pub mod axes;
pub use axes::AxisPermutation;

mod compose;
pub use compose::{compose_parallel, compose_serial, is_null_permutation, permutation_or_identity};

pub mod frames;
pub use frames::{Axis, BasicFrame, CompoundFrame, MatchControls, find_match, pick_axes, select_axes};

pub mod transforms;
pub use transforms::{Identity, Parallel, Permutation, Series, SeriesBuilder, Zoom};

pub const COORD_SIZE: usize = 6;

/// A short vector type alias for convenience,
/// used for coordinates and axis index arrays, which are almost always small.
type ShortVec<T> = SmallVec<[T; COORD_SIZE]>;

/// An empty vec with room for `len` items,
/// reporting allocation failure rather than aborting.
pub(crate) fn reserved<T>(len: usize) -> Result<Vec<T>> {
    #[cfg(test)]
    tests::spend_allocation()?;
    let mut out = Vec::new();
    out.try_reserve_exact(len)?;
    Ok(out)
}

/// Allocate a scratch array of `len` copies of `value`,
/// reporting allocation failure rather than aborting.
pub(crate) fn scratch<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut out = reserved(len)?;
    out.resize(len, value);
    Ok(out)
}

/// Convenience function for turning a slice of sliceables into a vec of slices.
/// Allocates a new vec.
pub(crate) fn as_refs<T, Inner: AsRef<[T]>>(input: &[Inner]) -> Vec<&[T]> {
    input.iter().map(|v| v.as_ref()).collect()
}

/// Convenience function for turning a mut slice of sliceables into a vec of mut slices.
/// Allocates a new vec.
pub(crate) fn as_muts<T, Inner: AsMut<[T]>>(input: &mut [Inner]) -> Vec<&mut [T]> {
    input.iter_mut().map(|v| v.as_mut()).collect()
}

pub(crate) fn vec_of_vec<T: Copy>(outer_len: usize, inner_len: usize, val: T) -> Vec<Vec<T>> {
    vec![vec![val; inner_len]; outer_len]
}

//! Combinatorial utilities over axis indices.
//!
//! Axis associations which may be absent are `Option<usize>` throughout.
mod extra;
pub use extra::{add_extra_axes, renumber_axes};
mod partition;
pub use partition::{Component, partition_selection};
mod permutation;
pub use permutation::AxisPermutation;
mod selection;
pub use selection::AxisSelections;

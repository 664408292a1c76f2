//! Concrete coordinate transformations.
mod identity;
pub use identity::Identity;
mod parallel;
pub use parallel::Parallel;
mod permutation;
pub use permutation::Permutation;
mod series;
pub use series::{Series, SeriesBuilder};
mod zoom;
pub use zoom::Zoom;

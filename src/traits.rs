use std::sync::Arc;

use crate::Result;
use crate::frames::{Axis, MatchControls};

/// Core spatial transformation interface.
///
/// Implementations may not perform any bounds checks on the input,
/// as these transformations generally happen in performance-critical hot loops.
/// Therefore, they may panic if coordinates or output buffers of incorrect length are given.
///
/// Coordinates which cannot be computed (e.g. axes discarded by a [crate::Permutation])
/// are written as `f64::NAN`.
pub trait Transformation: std::fmt::Debug + Send + Sync {
    /// Transform a single point from the input space to the output space.
    /// Writes to a pre-allocated output buffer.
    fn transform_into(&self, pt: &[f64], buf: &mut [f64]);

    /// Transform multiple points from the input space into the output space.
    /// Writes to pre-allocated output buffers.
    ///
    /// The trait default implementation simply calls [Transformation::transform_into] in turn;
    /// specific transforms may override it.
    fn bulk_transform_into(&self, pts: &[&[f64]], bufs: &mut [&mut [f64]]) {
        for (pt, buf) in pts.iter().zip(bufs.iter_mut()) {
            self.transform_into(pt, buf);
        }
    }

    /// Transform multiple points given in columnar format.
    /// Writes to pre-allocated output buffers.
    ///
    /// The trait implementation is inefficient,
    /// simply wrapping [Transformation::transform_into],
    /// and should be overridden by implementors where optimisations are available.
    fn column_transform_into(&self, columns: &[&[f64]], bufs: &mut [&mut [f64]]) {
        let Some(n_pts) = columns.first().map(|c| c.len()) else {
            return;
        };
        let mut in_pt = vec![f64::NAN; self.input_ndim()];
        let mut out_pt = vec![f64::NAN; self.output_ndim()];
        for pt_idx in 0..n_pts {
            for (p, col) in in_pt.iter_mut().zip(columns.iter()) {
                *p = col[pt_idx];
            }
            self.transform_into(&in_pt, &mut out_pt);
            for (out_col, p) in bufs.iter_mut().zip(out_pt.iter()) {
                out_col[pt_idx] = *p;
            }
        }
    }

    /// Return the inverse transformation, if it exists.
    fn invert(&self) -> Option<Arc<dyn Transformation>>;

    /// Whether this transformation represents the identity,
    /// i.e. input and output are the same number of dimensions
    /// and the coordinate values (and positions) are not changed.
    ///
    /// `true` means it definitely is an identity;
    /// `false` is not definitive.
    fn is_identity(&self) -> bool;

    fn input_ndim(&self) -> usize;

    fn output_ndim(&self) -> usize;
}

/// The products of a successful match of a template frame against a target frame.
#[derive(Debug, Clone)]
pub struct FrameMatch {
    /// The coordinate system which results from applying `mapping` to the target.
    pub result: Arc<dyn Frame>,
    /// Converts target coordinates into `result` coordinates.
    pub mapping: Arc<dyn Transformation>,
    /// For each result axis, the template axis it derives from.
    pub template_axes: Vec<Option<usize>>,
    /// For each result axis, the target axis it derives from.
    pub target_axes: Vec<Option<usize>>,
}

/// A frame selected from the axes of another, with the mapping into it.
#[derive(Debug, Clone)]
pub struct SubFrame {
    pub frame: Arc<dyn Frame>,
    /// Converts coordinates in the original frame into `frame` coordinates.
    pub mapping: Arc<dyn Transformation>,
}

/// Capabilities of a coordinate system description.
///
/// Frames are immutable once shared;
/// anything which would temporarily alter a frame's attributes during matching
/// is instead passed in explicitly (see [Frame::match_with]).
pub trait Frame: std::fmt::Debug + Send + Sync {
    fn naxes(&self) -> usize;

    /// Fewest target axes this frame can match.
    fn min_axes(&self) -> usize;

    /// Most target axes this frame can match.
    fn max_axes(&self) -> usize;

    /// The explicitly-set domain, if any.
    fn domain(&self) -> Option<&str>;

    /// Match controls explicitly set on this frame.
    fn controls(&self) -> MatchControls;

    /// Description of the given axis, or `None` if the index is out of range.
    fn axis(&self, axis: usize) -> Option<&Axis>;

    /// The simple frame which ultimately describes the given axis,
    /// along with the index of that axis within it.
    fn primary_frame(&self, axis: usize) -> Option<(&dyn Frame, usize)>;

    /// Format a coordinate value for display on the given axis.
    fn format(&self, axis: usize, value: f64) -> Option<String>;

    /// Distance between two points, or NaN if it cannot be computed.
    fn distance(&self, point1: &[f64], point2: &[f64]) -> f64;

    /// Write into `buf` the point found by moving `offset` along the geodesic
    /// from `point1` towards `point2`.
    fn offset(&self, point1: &[f64], point2: &[f64], offset: f64, buf: &mut [f64]);

    /// Normalise a coordinate in place (e.g. wrap angles).
    fn norm(&self, value: &mut [f64]);

    /// Use this frame as a template to match the target,
    /// with `controls` as the effective match controls for this attempt.
    ///
    /// Returns `Ok(None)` if the frames are incompatible.
    fn match_with(&self, target: &dyn Frame, controls: &MatchControls)
    -> Result<Option<FrameMatch>>;

    /// Select axes from this frame, producing a new frame and the mapping into it.
    ///
    /// `None` entries (and indices out of range) in `target_axes` request extra, default axes.
    /// If a template is given, its attributes are overlaid on the result,
    /// using `template_axes` to associate each selected axis with a template axis.
    ///
    /// Returns `Ok(None)` if the selection cannot be made.
    fn sub_frame(
        &self,
        template: Option<&dyn Frame>,
        target_axes: &[Option<usize>],
        template_axes: Option<&[Option<usize>]>,
    ) -> Result<Option<SubFrame>>;
}

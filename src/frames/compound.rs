use std::sync::Arc;

use crate::frames::{Axis, MatchControls, matching, selecting};
use crate::{AxisPermutation, Frame, FrameMatch, Result, ShortVec, SubFrame};

/// A frame made by joining the axes of two component frames.
///
/// Internally the axes are those of the first component followed by those of the second;
/// externally they may be presented in any order, given by an [AxisPermutation].
#[derive(Debug, Clone)]
pub struct CompoundFrame {
    frame1: Arc<dyn Frame>,
    frame2: Arc<dyn Frame>,
    perm: AxisPermutation,
    domain: Option<String>,
    controls: MatchControls,
}

impl CompoundFrame {
    pub fn new(frame1: Arc<dyn Frame>, frame2: Arc<dyn Frame>) -> Self {
        let naxes = frame1.naxes() + frame2.naxes();
        Self {
            frame1,
            frame2,
            perm: AxisPermutation::identity(naxes),
            domain: None,
            controls: MatchControls::default(),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_controls(mut self, controls: MatchControls) -> Self {
        self.controls = controls;
        self
    }

    /// Reorder the external axes so that new axis `i` is the current axis `order[i]`.
    /// Successive reorderings accumulate.
    pub fn permuted(&self, order: &AxisPermutation) -> Result<Self> {
        Ok(Self {
            perm: self.perm.permuted(order)?,
            ..self.clone()
        })
    }

    pub fn frame1(&self) -> &Arc<dyn Frame> {
        &self.frame1
    }

    pub fn frame2(&self) -> &Arc<dyn Frame> {
        &self.frame2
    }

    pub fn perm(&self) -> &AxisPermutation {
        &self.perm
    }

    /// The component holding the given external axis, and the axis' index within it.
    fn component(&self, axis: usize) -> Option<(&dyn Frame, usize)> {
        let internal = self.perm.internal(axis)?;
        let naxes1 = self.frame1.naxes();
        if internal < naxes1 {
            Some((self.frame1.as_ref(), internal))
        } else {
            Some((self.frame2.as_ref(), internal - naxes1))
        }
    }

    /// Coordinates in internal order, or `None` if any is NaN.
    fn to_internal(&self, point: &[f64]) -> Option<ShortVec<f64>> {
        if point.iter().any(|v| v.is_nan()) {
            return None;
        }
        let mut out: ShortVec<f64> = smallvec::smallvec![f64::NAN; self.perm.len()];
        self.perm.to_internal(point, &mut out);
        Some(out)
    }

    fn component_distances(&self, p1: &[f64], p2: &[f64]) -> (f64, f64) {
        let naxes1 = self.frame1.naxes();
        (
            self.frame1.distance(&p1[..naxes1], &p2[..naxes1]),
            self.frame2.distance(&p1[naxes1..], &p2[naxes1..]),
        )
    }
}

impl Frame for CompoundFrame {
    fn naxes(&self) -> usize {
        self.perm.len()
    }

    fn min_axes(&self) -> usize {
        self.frame1.min_axes() + self.frame2.min_axes()
    }

    fn max_axes(&self) -> usize {
        self.frame1.max_axes() + self.frame2.max_axes()
    }

    fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    fn controls(&self) -> MatchControls {
        self.controls
    }

    fn axis(&self, axis: usize) -> Option<&Axis> {
        let (frame, local) = self.component(axis)?;
        frame.axis(local)
    }

    fn primary_frame(&self, axis: usize) -> Option<(&dyn Frame, usize)> {
        let (frame, local) = self.component(axis)?;
        frame.primary_frame(local)
    }

    fn format(&self, axis: usize, value: f64) -> Option<String> {
        let (frame, local) = self.component(axis)?;
        frame.format(local, value)
    }

    fn distance(&self, point1: &[f64], point2: &[f64]) -> f64 {
        let (Some(p1), Some(p2)) = (self.to_internal(point1), self.to_internal(point2)) else {
            return f64::NAN;
        };
        let (dist1, dist2) = self.component_distances(&p1, &p2);
        (dist1 * dist1 + dist2 * dist2).sqrt()
    }

    fn offset(&self, point1: &[f64], point2: &[f64], offset: f64, buf: &mut [f64]) {
        buf.fill(f64::NAN);
        let (Some(p1), Some(p2)) = (self.to_internal(point1), self.to_internal(point2)) else {
            return;
        };
        let (dist1, dist2) = self.component_distances(&p1, &p2);
        let dist = (dist1 * dist1 + dist2 * dist2).sqrt();
        if dist.is_nan() || (dist == 0.0 && offset != 0.0) {
            return;
        }
        // split the offset so that the path still passes through point2
        let (offset1, offset2) = if dist == 0.0 {
            (0.0, 0.0)
        } else {
            (offset * dist1 / dist, offset * dist2 / dist)
        };

        let naxes1 = self.frame1.naxes();
        let mut p3: ShortVec<f64> = smallvec::smallvec![f64::NAN; self.perm.len()];
        let (p3a, p3b) = p3.split_at_mut(naxes1);
        self.frame1.offset(&p1[..naxes1], &p2[..naxes1], offset1, p3a);
        self.frame2.offset(&p1[naxes1..], &p2[naxes1..], offset2, p3b);
        if p3.iter().any(|v| v.is_nan()) {
            return;
        }
        self.perm.to_external(&p3, buf);
    }

    fn norm(&self, value: &mut [f64]) {
        let naxes1 = self.frame1.naxes();
        let mut v: ShortVec<f64> = smallvec::smallvec![f64::NAN; self.perm.len()];
        self.perm.to_internal(value, &mut v);
        let (v1, v2) = v.split_at_mut(naxes1);
        self.frame1.norm(v1);
        self.frame2.norm(v2);
        self.perm.to_external(&v, value);
    }

    fn match_with(
        &self,
        target: &dyn Frame,
        controls: &MatchControls,
    ) -> Result<Option<FrameMatch>> {
        matching::match_compound(self, target, controls)
    }

    fn sub_frame(
        &self,
        template: Option<&dyn Frame>,
        target_axes: &[Option<usize>],
        template_axes: Option<&[Option<usize>]>,
    ) -> Result<Option<SubFrame>> {
        selecting::select_from_compound(self, template, target_axes, template_axes)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_ulps_eq;

    use super::CompoundFrame;
    use crate::frames::{Axis, BasicFrame};
    use crate::{AxisPermutation, Frame};

    fn labelled(labels: &[&str]) -> Arc<dyn Frame> {
        Arc::new(
            BasicFrame::new(labels.len())
                .with_axes(labels.iter().map(|l| Axis::default().with_label(*l)).collect())
                .unwrap()
                .with_axis_range(labels.len(), labels.len() + 1),
        )
    }

    fn make_frame() -> CompoundFrame {
        // external order: c, a, b
        CompoundFrame::new(labelled(&["a", "b"]), labelled(&["c"]))
            .permuted(&AxisPermutation::try_new(&[2, 0, 1]).unwrap())
            .unwrap()
    }

    fn label(f: &dyn Frame, axis: usize) -> Option<String> {
        f.axis(axis)?.label.clone()
    }

    #[test]
    fn test_axes_through_perm() {
        let f = make_frame();
        assert_eq!(f.naxes(), 3);
        assert_eq!(f.min_axes(), 3);
        assert_eq!(f.max_axes(), 5);
        assert_eq!(label(&f, 0).as_deref(), Some("c"));
        assert_eq!(label(&f, 1).as_deref(), Some("a"));
        assert_eq!(label(&f, 2).as_deref(), Some("b"));
        assert!(f.axis(3).is_none());
    }

    #[test]
    fn test_permuted_accumulates() {
        let f = make_frame()
            .permuted(&AxisPermutation::try_new(&[1, 2, 0]).unwrap())
            .unwrap();
        assert_eq!(f.perm().as_slice(), &[0, 1, 2]);
        assert_eq!(label(&f, 0).as_deref(), Some("a"));
        assert!(make_frame().permuted(&AxisPermutation::identity(2)).is_err());
    }

    #[test]
    fn test_primary_frame_nested() {
        let inner: Arc<dyn Frame> = Arc::new(make_frame());
        let outer = CompoundFrame::new(labelled(&["d"]), inner.clone())
            .permuted(&AxisPermutation::try_new(&[3, 0, 1, 2]).unwrap())
            .unwrap();
        // outer axis 0 is inner axis 2, which is "b"
        let (frame, local) = outer.primary_frame(0).unwrap();
        assert_eq!(local, 1);
        assert_eq!(label(frame, local).as_deref(), Some("b"));
        let (frame, local) = outer.primary_frame(1).unwrap();
        assert_eq!((local, label(frame, local).as_deref()), (0, Some("d")));
        assert!(outer.primary_frame(4).is_none());
    }

    #[test]
    fn test_distance() {
        let f = make_frame();
        // component 1 moves by (3, 4), component 2 by 12
        let d = f.distance(&[0.0, 0.0, 0.0], &[12.0, 3.0, 4.0]);
        assert_ulps_eq!(d, 13.0);
        assert!(f.distance(&[0.0, f64::NAN, 0.0], &[1.0, 1.0, 1.0]).is_nan());
    }

    #[test]
    fn test_offset() {
        let f = make_frame();
        let mut buf = [0.0; 3];
        f.offset(&[0.0, 0.0, 0.0], &[12.0, 3.0, 4.0], 26.0, &mut buf);
        assert_ulps_eq!(buf[0], 24.0);
        assert_ulps_eq!(buf[1], 6.0);
        assert_ulps_eq!(buf[2], 8.0);

        f.offset(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 0.0, &mut buf);
        assert_eq!(buf, [1.0, 2.0, 3.0]);
        f.offset(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 1.0, &mut buf);
        assert!(buf.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_format_and_norm() {
        let f = make_frame();
        assert_eq!(f.format(0, 0.5).as_deref(), Some("0.5000000"));
        assert!(f.format(3, 0.5).is_none());

        let mut v = [1.0, 2.0, 3.0];
        f.norm(&mut v);
        assert_eq!(v, [1.0, 2.0, 3.0]);
    }
}
